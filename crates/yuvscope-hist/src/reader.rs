//! 帧定位与平面读取.
//!
//! 流由调用方打开和关闭, 这里只负责定位和按平面精确读取.
//! 每次读取必须拿到完整的 `sample_count * 2` 字节, 否则立即报
//! [`ScopeError::TruncatedRead`]: 错位的 2 字节样本会破坏之后的每一个平面.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};
use log::trace;
use yuvscope_core::{FrameLayout, Plane, ScopeError, ScopeResult};

/// 每个样本在磁盘上的字节数 (u16 小端)
const SAMPLE_BYTES: usize = 2;

/// 单次读取平面时预分配的上限 (64 MiB)
const MAX_PREALLOC: usize = 64 << 20;

/// 一个平面的原始样本数据
///
/// 长度恒为偶数, 按 u16 小端解释.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSampleBuffer {
    plane: Plane,
    bytes: Vec<u8>,
}

impl RawSampleBuffer {
    /// 由原始字节构造, 字节数必须为偶数
    pub fn from_bytes(plane: Plane, bytes: Vec<u8>) -> ScopeResult<Self> {
        if bytes.len() % SAMPLE_BYTES != 0 {
            return Err(ScopeError::InvalidArgument(format!(
                "{plane} 平面字节数 {} 不是 {SAMPLE_BYTES} 的整数倍",
                bytes.len()
            )));
        }
        Ok(Self { plane, bytes })
    }

    /// 由样本值构造 (编码为 u16 小端)
    pub fn from_samples(plane: Plane, samples: &[u16]) -> Self {
        let mut bytes = vec![0u8; samples.len() * SAMPLE_BYTES];
        LittleEndian::write_u16_into(samples, &mut bytes);
        Self { plane, bytes }
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn sample_count(&self) -> usize {
        self.bytes.len() / SAMPLE_BYTES
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 按顺序逐个解码样本
    pub fn samples(&self) -> impl Iterator<Item = u16> + '_ {
        self.bytes
            .chunks_exact(SAMPLE_BYTES)
            .map(LittleEndian::read_u16)
    }

    /// 一次性解码全部样本
    pub fn decode(&self) -> Vec<u16> {
        let mut out = vec![0u16; self.sample_count()];
        LittleEndian::read_u16_into(&self.bytes, &mut out);
        out
    }
}

/// 将流定位到第 `frame_offset` 帧的起始位置
///
/// 不检查流长度, 越界由后续读取报告.
pub fn seek_to_frame<S: Seek + ?Sized>(
    stream: &mut S,
    layout: &FrameLayout,
    frame_offset: u64,
) -> ScopeResult<u64> {
    let pos = layout.frame_offset(frame_offset)?;
    stream.seek(SeekFrom::Start(pos))?;
    trace!("定位到第 {} 帧, 字节偏移 {}", frame_offset, pos);
    Ok(pos)
}

/// 读取一个平面的 `sample_count` 个样本
pub fn read_plane<R: Read + ?Sized>(
    stream: &mut R,
    plane: Plane,
    sample_count: u64,
) -> ScopeResult<RawSampleBuffer> {
    let expected = sample_count
        .checked_mul(SAMPLE_BYTES as u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            ScopeError::InvalidArgument(format!("{plane} 平面样本数 {sample_count} 过大"))
        })?;

    // 预分配不超过 MAX_PREALLOC, 其余随实际读取增长
    let mut bytes = Vec::with_capacity(expected.min(MAX_PREALLOC));
    (&mut *stream).take(expected as u64).read_to_end(&mut bytes)?;
    let actual = bytes.len();
    if actual < expected {
        return Err(ScopeError::TruncatedRead {
            plane,
            expected,
            actual,
        });
    }
    Ok(RawSampleBuffer { plane, bytes })
}

/// 一帧的三个平面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub y: RawSampleBuffer,
    pub u: RawSampleBuffer,
    pub v: RawSampleBuffer,
}

impl RawFrame {
    /// 按 Y, U, V 顺序遍历平面
    pub fn planes(&self) -> [&RawSampleBuffer; 3] {
        [&self.y, &self.u, &self.v]
    }
}

/// 按帧布局顺序读取的帧读取器
///
/// 借用调用方的流, 不接管其生命周期.
pub struct FrameReader<'a, R: ?Sized> {
    stream: &'a mut R,
    layout: FrameLayout,
    frames_read: u64,
}

impl<'a, R: Read + ?Sized> FrameReader<'a, R> {
    pub fn new(stream: &'a mut R, layout: FrameLayout) -> Self {
        Self {
            stream,
            layout,
            frames_read: 0,
        }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    /// 已完整读取的帧数
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// 读取当前帧的一个平面
    ///
    /// 调用方必须按 Y, U, V 顺序调用, 读取器不记录平面位置.
    pub fn read_plane(&mut self, plane: Plane) -> ScopeResult<RawSampleBuffer> {
        let buffer = read_plane(
            &mut *self.stream,
            plane,
            self.layout.plane_sample_count(plane),
        )?;
        if plane == Plane::V {
            self.frames_read += 1;
        }
        Ok(buffer)
    }

    /// 读取完整一帧, 任何平面不完整都报错
    pub fn read_frame(&mut self) -> ScopeResult<RawFrame> {
        let y = self.read_plane(Plane::Y)?;
        let u = self.read_plane(Plane::U)?;
        let v = self.read_plane(Plane::V)?;
        Ok(RawFrame { y, u, v })
    }

    /// 读取下一帧
    ///
    /// 恰好在帧边界遇到 EOF 时返回 `Ok(None)`; 帧中途结束仍是 `TruncatedRead`.
    pub fn next_frame(&mut self) -> ScopeResult<Option<RawFrame>> {
        let y = match self.read_plane(Plane::Y) {
            Ok(y) => y,
            Err(ScopeError::TruncatedRead {
                plane: Plane::Y,
                actual: 0,
                ..
            }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let u = self.read_plane(Plane::U)?;
        let v = self.read_plane(Plane::V)?;
        Ok(Some(RawFrame { y, u, v }))
    }
}

impl<R: Read + Seek + ?Sized> FrameReader<'_, R> {
    /// 定位到第 `frame_offset` 帧
    pub fn seek_to_frame(&mut self, frame_offset: u64) -> ScopeResult<u64> {
        seek_to_frame(&mut *self.stream, &self.layout, frame_offset)
    }
}
