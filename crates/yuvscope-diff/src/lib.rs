//! # yuvscope-diff
//!
//! 10 位 `yuv420p10le` 帧的逐样本差分与恢复.
//!
//! - 生成: `d = (a - b + 512) & 0x3ff`
//! - 恢复: `a = (b + d - 512) & 0x3ff`
//!
//! 对任意 10 位样本 `a`, `b` 都有 `add_sample(b, diff_sample(a, b)) == a`,
//! 因此差分图加参考图可以无损还原原图.

use std::io::{Read, Write};

use log::{debug, warn};
use yuvscope_core::{FrameLayout, Plane, ScopeError, ScopeResult};
use yuvscope_hist::{FrameReader, RawFrame, RawSampleBuffer};

/// 差分偏移 (10 位中点)
pub const VALUE_OFFSET: u16 = 512;
/// 10 位样本掩码
pub const VALUE_MASK: u16 = 0x03ff;

/// 10 位差分 `a - b`
pub const fn diff_sample(a: u16, b: u16) -> u16 {
    a.wrapping_sub(b).wrapping_add(VALUE_OFFSET) & VALUE_MASK
}

/// 10 位恢复 `b + d`
pub const fn add_sample(b: u16, d: u16) -> u16 {
    b.wrapping_add(d).wrapping_sub(VALUE_OFFSET) & VALUE_MASK
}

/// 处理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// 由 A, B 生成差分图 D
    Generate,
    /// 由 B, D 恢复原图 A
    Recover,
}

impl DiffMode {
    /// 对一对样本执行本模式的运算
    pub const fn apply(&self, first: u16, second: u16) -> u16 {
        match self {
            Self::Generate => diff_sample(first, second),
            Self::Recover => add_sample(first, second),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Recover => "recover",
        }
    }
}

/// 处理统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// 处理的帧数
    pub frames: u64,
    /// 处理的样本数
    pub samples: u64,
    /// 输入中超出 10 位范围的样本数 (运算时被掩码截断)
    pub out_of_range: u64,
}

/// 对两个平面逐样本运算
pub fn combine_planes(
    mode: DiffMode,
    first: &RawSampleBuffer,
    second: &RawSampleBuffer,
) -> ScopeResult<RawSampleBuffer> {
    if first.plane() != second.plane() || first.sample_count() != second.sample_count() {
        return Err(ScopeError::InvalidArgument(format!(
            "平面不匹配: {} ({} 样本) 与 {} ({} 样本)",
            first.plane(),
            first.sample_count(),
            second.plane(),
            second.sample_count()
        )));
    }
    let out: Vec<u16> = first
        .samples()
        .zip(second.samples())
        .map(|(a, b)| mode.apply(a, b))
        .collect();
    Ok(RawSampleBuffer::from_samples(first.plane(), &out))
}

fn count_out_of_range(frame: &RawFrame) -> u64 {
    frame
        .planes()
        .into_iter()
        .flat_map(|p| p.samples())
        .filter(|&s| s > VALUE_MASK)
        .count() as u64
}

/// 逐帧处理两路输入并写出结果
///
/// `first` 在帧边界处结束即正常停止; `second` 先结束, 或任一路在帧中途结束,
/// 都视为 `TruncatedRead`. `max_frames` 限制最多处理的帧数.
pub fn process_streams<A, B, W>(
    mode: DiffMode,
    layout: &FrameLayout,
    first: &mut A,
    second: &mut B,
    out: &mut W,
    max_frames: Option<u64>,
) -> ScopeResult<DiffStats>
where
    A: Read + ?Sized,
    B: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut first_reader = FrameReader::new(first, *layout);
    let mut second_reader = FrameReader::new(second, *layout);
    let mut stats = DiffStats::default();

    while max_frames.is_none_or(|max| stats.frames < max) {
        let Some(a) = first_reader.next_frame()? else {
            break;
        };
        let b = second_reader.read_frame()?;
        stats.out_of_range += count_out_of_range(&a) + count_out_of_range(&b);

        for plane in Plane::ALL {
            let idx = plane.index();
            let result = combine_planes(mode, a.planes()[idx], b.planes()[idx])?;
            out.write_all(result.as_bytes())?;
            stats.samples += result.sample_count() as u64;
        }
        stats.frames += 1;
    }
    out.flush()?;

    if stats.out_of_range > 0 {
        warn!(
            "{} 个输入样本超出 10 位范围, 已按 0x3ff 掩码截断",
            stats.out_of_range
        );
    }
    debug!(
        "{} 完成: {} 帧, {} 样本",
        mode.name(),
        stats.frames,
        stats.samples
    );
    Ok(stats)
}
