//! # yuvscope-hist
//!
//! 原始 `yuv420p10le` 帧的定位读取与直方图统计.
//!
//! 处理流程是一条直线:
//!
//! ```text
//! Seek → { 读 Y → 分箱 → 累加, 读 U → 分箱 → 累加, 读 V → 分箱 → 累加 } × 帧数 → 完成
//! ```
//!
//! 任何一步失败都会中止整个统计, 不返回部分结果.
//!
//! ## 使用示例
//!
//! ```rust
//! use std::io::Cursor;
//! use yuvscope_core::{FrameLayout, PixelFormat};
//! use yuvscope_hist::{BinEdges, FrameRange, accumulate_frames};
//!
//! let layout = FrameLayout::new(4, 2, 10, PixelFormat::Yuv420p10le).unwrap();
//! let edges = BinEdges::new(4, 10).unwrap();
//! let mut stream = Cursor::new(vec![0u8; 24]);
//! let hist = accumulate_frames(&mut stream, &layout, &edges, FrameRange::new(0, 1)).unwrap();
//! assert_eq!(hist.y.counts(), &[8, 0, 0, 0]);
//! ```

pub mod accumulator;
pub mod bin_edges;
pub mod histogram;
pub mod reader;

pub use accumulator::{FrameRange, HistogramAccumulator, accumulate_frames};
pub use bin_edges::BinEdges;
pub use histogram::{PlaneHistogram, PlaneHistograms, accumulate, bin_samples};
pub use reader::{FrameReader, RawFrame, RawSampleBuffer, read_plane, seek_to_frame};
