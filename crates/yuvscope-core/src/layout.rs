//! 平面 4:2:0 帧的字节布局.
//!
//! 每帧按 Y, U, V 顺序连续存放, 无帧头无填充. 每个样本固定 2 字节小端,
//! 因此一帧的大小和任意帧的起始偏移都可以直接算出.

use log::debug;

use crate::error::{ScopeError, ScopeResult};
use crate::pixel_format::PixelFormat;
use crate::plane::Plane;

/// 唯一受支持的位深
pub const SUPPORTED_BIT_DEPTH: u32 = 10;

/// 帧布局
///
/// 只能通过 [`FrameLayout::new`] 构造, 构造成功即保证宽高为非零偶数,
/// 且格式为 10 位 4:2:0 平面小端.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    width: u32,
    height: u32,
    bit_depth: u32,
    pixel_format: PixelFormat,
    /// 构造时以溢出检查算出, 其余尺寸都不超过它
    frame_byte_size: u64,
}

/// 宽高必须为非零偶数
pub fn check_dimensions(width: u32, height: u32) -> ScopeResult<()> {
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return Err(ScopeError::InvalidDimension { width, height });
    }
    Ok(())
}

impl FrameLayout {
    /// 校验参数并计算帧布局
    ///
    /// 宽高检查先于格式检查, 两者都不涉及任何 I/O.
    pub fn new(
        width: u32,
        height: u32,
        bit_depth: u32,
        pixel_format: PixelFormat,
    ) -> ScopeResult<Self> {
        check_dimensions(width, height)?;
        if !pixel_format.is_little_endian() {
            return Err(ScopeError::UnsupportedFormat(format!(
                "像素格式 {pixel_format} 为大端存放, 仅支持小端"
            )));
        }
        if !pixel_format.is_supported() {
            return Err(ScopeError::UnsupportedFormat(format!(
                "像素格式 {pixel_format}, 仅支持 yuv420p10le"
            )));
        }
        if bit_depth != SUPPORTED_BIT_DEPTH || bit_depth != pixel_format.bits_per_component() {
            return Err(ScopeError::UnsupportedFormat(format!(
                "位深 {bit_depth}, 仅支持 {SUPPORTED_BIT_DEPTH} 位"
            )));
        }

        let (sub_h, sub_v) = pixel_format.chroma_subsampling();
        let w = u64::from(width);
        let h = u64::from(height);
        let frame_byte_size = (w * h)
            .checked_add(((w >> sub_h) * (h >> sub_v)) * 2)
            .and_then(|samples| samples.checked_mul(pixel_format.bytes_per_sample() as u64))
            .ok_or(ScopeError::InvalidDimension { width, height })?;

        let layout = Self {
            width,
            height,
            bit_depth,
            pixel_format,
            frame_byte_size,
        };
        debug!(
            "帧布局: {}x{}, 格式={}, 位深={}, 帧大小={} 字节",
            width,
            height,
            pixel_format,
            bit_depth,
            layout.frame_byte_size()
        );
        Ok(layout)
    }

    /// 按格式名构造, 宽高检查仍先于格式名解析
    pub fn from_format_name(
        width: u32,
        height: u32,
        bit_depth: u32,
        pixel_format: &str,
    ) -> ScopeResult<Self> {
        check_dimensions(width, height)?;
        Self::new(width, height, bit_depth, pixel_format.parse()?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Y 平面样本数 (width * height)
    pub fn y_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// 单个色度平面样本数 (width * height / 4)
    pub fn chroma_count(&self) -> u64 {
        let (sub_h, sub_v) = self.pixel_format.chroma_subsampling();
        (u64::from(self.width) >> sub_h) * (u64::from(self.height) >> sub_v)
    }

    /// 指定平面的样本数
    pub fn plane_sample_count(&self, plane: Plane) -> u64 {
        if plane.is_chroma() {
            self.chroma_count()
        } else {
            self.y_count()
        }
    }

    /// 指定平面的字节数
    pub fn plane_byte_size(&self, plane: Plane) -> u64 {
        self.plane_sample_count(plane) * self.pixel_format.bytes_per_sample() as u64
    }

    /// 一帧的样本总数 (Y + U + V)
    pub fn frame_sample_count(&self) -> u64 {
        self.y_count() + 2 * self.chroma_count()
    }

    /// 一帧的字节数
    pub fn frame_byte_size(&self) -> u64 {
        self.frame_byte_size
    }

    /// 第 `frame_index` 帧在流中的绝对字节偏移
    pub fn frame_offset(&self, frame_index: u64) -> ScopeResult<u64> {
        frame_index
            .checked_mul(self.frame_byte_size())
            .ok_or_else(|| {
                ScopeError::InvalidArgument(format!("帧偏移 {frame_index} 超出可寻址范围"))
            })
    }
}
