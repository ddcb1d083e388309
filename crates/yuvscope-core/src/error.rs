//! 统一错误类型定义.
//!
//! 所有 yuvscope crate 共用的错误类型. 任何错误都是致命的:
//! 调用方收到错误后不应输出任何部分结果.

use thiserror::Error;

use crate::plane::Plane;

/// yuvscope 统一错误类型
#[derive(Debug, Error)]
pub enum ScopeError {
    /// 宽高不是偶数 (4:2:0 色度子采样要求), 或为 0
    #[error("无效分辨率: {width}x{height}, 宽和高都必须是非零偶数")]
    InvalidDimension { width: u32, height: u32 },

    /// 像素格式或位深不在支持范围内
    #[error("不支持的格式: {0}")]
    UnsupportedFormat(String),

    /// 平面数据不足, 流提前结束
    #[error("{plane} 平面读取不完整: 需要 {expected} 字节, 实际 {actual} 字节")]
    TruncatedRead {
        plane: Plane,
        expected: usize,
        actual: usize,
    },

    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 渲染/图像编码错误
    #[error("渲染错误: {0}")]
    Render(String),

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// yuvscope 统一 Result 类型
pub type ScopeResult<T> = Result<T, ScopeError>;
