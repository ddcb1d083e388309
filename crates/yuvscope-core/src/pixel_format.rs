//! 像素格式定义.
//!
//! 命名与 FFmpeg 的 `-pix_fmt` 一致. 能识别常见的平面 YUV 格式名,
//! 但直方图与差分工具只接受 `yuv420p10le` 一种.

use std::fmt;
use std::str::FromStr;

use crate::error::ScopeError;

/// 像素格式
///
/// 命名规则: 颜色空间 + 采样方式 + 位深 + 字节序 (LE/BE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// YUV 4:2:0 平面格式, 8 位
    Yuv420p,
    /// YUV 4:2:2 平面格式, 8 位
    Yuv422p,
    /// YUV 4:4:4 平面格式, 8 位
    Yuv444p,
    /// YUV 4:2:0 平面格式, 10 位小端 (唯一受支持的格式)
    Yuv420p10le,
    /// YUV 4:2:0 平面格式, 10 位大端
    Yuv420p10be,
    /// YUV 4:2:2 平面格式, 10 位小端
    Yuv422p10le,
    /// YUV 4:4:4 平面格式, 10 位小端
    Yuv444p10le,
}

impl PixelFormat {
    /// 单个 Y/U/V 分量的位深
    pub const fn bits_per_component(&self) -> u32 {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p => 8,
            Self::Yuv420p10le | Self::Yuv420p10be | Self::Yuv422p10le | Self::Yuv444p10le => 10,
        }
    }

    /// 获取色度子采样 (水平, 垂直)
    ///
    /// 返回 (log2 水平子采样, log2 垂直子采样).
    /// 例如 YUV420 返回 (1, 1), 表示色度分辨率为亮度的 1/2 x 1/2.
    pub const fn chroma_subsampling(&self) -> (u32, u32) {
        match self {
            Self::Yuv420p | Self::Yuv420p10le | Self::Yuv420p10be => (1, 1),
            Self::Yuv422p | Self::Yuv422p10le => (1, 0),
            Self::Yuv444p | Self::Yuv444p10le => (0, 0),
        }
    }

    /// 每个样本在磁盘上占用的字节数
    pub const fn bytes_per_sample(&self) -> usize {
        if self.bits_per_component() > 8 { 2 } else { 1 }
    }

    /// 多字节样本是否按小端存放
    pub const fn is_little_endian(&self) -> bool {
        !matches!(self, Self::Yuv420p10be)
    }

    /// 是否为直方图/差分工具支持的格式
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Yuv420p10le)
    }

    /// 按 FFmpeg 名称查找像素格式
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "yuv420p" => Self::Yuv420p,
            "yuv422p" => Self::Yuv422p,
            "yuv444p" => Self::Yuv444p,
            "yuv420p10le" => Self::Yuv420p10le,
            "yuv420p10be" => Self::Yuv420p10be,
            "yuv422p10le" => Self::Yuv422p10le,
            "yuv444p10le" => Self::Yuv444p10le,
            _ => return None,
        })
    }
}

impl FromStr for PixelFormat {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ScopeError::UnsupportedFormat(format!("未知像素格式 '{s}'")))
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yuv420p => "yuv420p",
            Self::Yuv422p => "yuv422p",
            Self::Yuv444p => "yuv444p",
            Self::Yuv420p10le => "yuv420p10le",
            Self::Yuv420p10be => "yuv420p10be",
            Self::Yuv422p10le => "yuv422p10le",
            Self::Yuv444p10le => "yuv444p10le",
        };
        write!(f, "{name}")
    }
}
