//! # yuvscope
//!
//! 原始 10 位 YUV 帧文件的分析工具集.
//!
//! - **直方图**: 读取 `yuv420p10le` 帧, 统计 Y/U/V 平面样本值分布
//! - **渲染**: 三联 PNG 直方图与 JSON 摘要
//! - **差分**: 10 位帧的逐样本差分生成与无损恢复
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use yuvscope::core::{FrameLayout, PixelFormat};
//! use yuvscope::hist::{BinEdges, FrameRange, accumulate_frames};
//!
//! let layout = FrameLayout::new(3840, 2160, 10, PixelFormat::Yuv420p10le)?;
//! let edges = BinEdges::new(256, 10)?;
//! let mut input = BufReader::new(File::open("input.yuv")?);
//! let hist = accumulate_frames(&mut input, &layout, &edges, FrameRange::new(0, 1))?;
//! println!("Y 平面样本数: {}", hist.y.samples());
//! # Ok::<(), yuvscope::core::ScopeError>(())
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `yuvscope-core` | 错误类型, 像素格式, 帧布局 |
//! | `yuvscope-hist` | 样本读取, 分箱, 直方图累加 |
//! | `yuvscope-render` | PNG 与 JSON 渲染 |
//! | `yuvscope-diff` | 10 位帧差分与恢复 |

/// 核心类型 (错误, 像素格式, 帧布局)
pub use yuvscope_core as core;

/// 样本读取与直方图统计
pub use yuvscope_hist as hist;

/// 直方图渲染
pub use yuvscope_render as render;

/// 帧差分与恢复
pub use yuvscope_diff as diff;

/// 获取 yuvscope 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
