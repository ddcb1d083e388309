//! # yuvscope-core
//!
//! yuvscope 核心库, 提供基础类型定义与错误处理.
//!
//! 其余 crate (直方图统计、渲染、差分工具) 都建立在这里的帧布局和错误类型之上.

pub mod error;
pub mod layout;
pub mod pixel_format;
pub mod plane;

// 重导出常用类型
pub use error::{ScopeError, ScopeResult};
pub use layout::FrameLayout;
pub use pixel_format::PixelFormat;
pub use plane::Plane;
