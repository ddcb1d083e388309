//! 多帧直方图累加驱动.

use std::io::{Read, Seek};

use log::{debug, trace};
use yuvscope_core::{FrameLayout, Plane, ScopeError, ScopeResult};

use crate::bin_edges::BinEdges;
use crate::histogram::{PlaneHistograms, accumulate, bin_samples};
use crate::reader::{FrameReader, RawSampleBuffer};

/// 要统计的帧范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    /// 起始帧索引
    pub offset: u64,
    /// 帧数
    pub count: u64,
}

impl FrameRange {
    pub fn new(offset: u64, count: u64) -> Self {
        Self { offset, count }
    }

    /// 结束帧索引 (不含), 超出 u64 时取 `u64::MAX`
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.count)
    }
}

/// 直方图累加器
///
/// 持有三个平面的累计直方图, 只接受与自身布局一致的平面数据.
pub struct HistogramAccumulator {
    layout: FrameLayout,
    edges: BinEdges,
    totals: PlaneHistograms,
}

impl HistogramAccumulator {
    pub fn new(layout: FrameLayout, edges: BinEdges) -> ScopeResult<Self> {
        if edges.bit_depth() != layout.bit_depth() {
            return Err(ScopeError::InvalidArgument(format!(
                "分箱位深 {} 与帧布局位深 {} 不一致",
                edges.bit_depth(),
                layout.bit_depth()
            )));
        }
        let totals = PlaneHistograms::new(edges.bin_count());
        Ok(Self {
            layout,
            edges,
            totals,
        })
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    /// 对一个平面分箱并累加到对应平面的总数中
    pub fn add_plane(&mut self, buffer: &RawSampleBuffer) -> ScopeResult<()> {
        let plane = buffer.plane();
        let expected = self.layout.plane_sample_count(plane);
        if buffer.sample_count() as u64 != expected {
            return Err(ScopeError::InvalidArgument(format!(
                "{plane} 平面样本数 {} 与布局 {expected} 不一致",
                buffer.sample_count()
            )));
        }
        let counts = bin_samples(buffer, &self.edges);
        accumulate(self.totals.get_mut(plane), &counts)
    }

    /// 当前累计结果
    pub fn totals(&self) -> &PlaneHistograms {
        &self.totals
    }

    /// 结束累加, 交出三个平面的直方图
    pub fn finish(self) -> PlaneHistograms {
        self.totals
    }
}

/// 统计 `range` 内所有帧的 Y/U/V 直方图
///
/// 先定位一次, 然后每帧按 Y, U, V 顺序读取、分箱、累加.
/// 任何一步失败都直接返回错误, 不产生部分结果.
pub fn accumulate_frames<R: Read + Seek + ?Sized>(
    stream: &mut R,
    layout: &FrameLayout,
    edges: &BinEdges,
    range: FrameRange,
) -> ScopeResult<PlaneHistograms> {
    let mut acc = HistogramAccumulator::new(*layout, edges.clone())?;
    let mut reader = FrameReader::new(stream, *layout);
    reader.seek_to_frame(range.offset)?;

    for i in 0..range.count {
        for plane in Plane::ALL {
            let buffer = reader.read_plane(plane)?;
            acc.add_plane(&buffer)?;
        }
        trace!("第 {} 帧统计完成", range.offset.saturating_add(i));
    }

    let totals = acc.finish();
    debug!(
        "直方图统计完成: 帧 {}..{}, Y 样本 {}, U 样本 {}, V 样本 {}",
        range.offset,
        range.end(),
        totals.y.samples(),
        totals.u.samples(),
        totals.v.samples()
    );
    Ok(totals)
}
