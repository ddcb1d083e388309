//! # yuvscope-render
//!
//! 直方图统计结果的输出端. 渲染只消费纯数值数组 (三个平面的计数、分箱边界、位深),
//! 与统计过程完全解耦.
//!
//! ## 支持的输出
//!
//! - **png**: 三联 (Y/U/V) 阶梯填充直方图, 内置点阵字体绘制刻度和标签
//! - **json**: 计数、边界和每个平面的样本/丢弃统计

pub mod canvas;
pub mod figure;
pub mod font;
pub mod summary;

use std::io::Write;

use yuvscope_core::{FrameLayout, ScopeResult};
use yuvscope_hist::{BinEdges, FrameRange, PlaneHistograms};

pub use canvas::Canvas;
pub use figure::{FigureStyle, PngFigureRenderer, render_figure};
pub use summary::JsonSummaryRenderer;

/// 一次统计的完整结果, 交给渲染器
#[derive(Debug, Clone, Copy)]
pub struct HistogramReport<'a> {
    pub layout: &'a FrameLayout,
    pub range: FrameRange,
    pub edges: &'a BinEdges,
    pub histograms: &'a PlaneHistograms,
}

/// 渲染器 trait
///
/// 将统计结果序列化到输出端. 输出端由调用方打开和关闭.
pub trait HistogramRenderer {
    /// 渲染器名称
    fn name(&self) -> &str;

    /// 渲染并写入 `out`
    fn render(&self, report: &HistogramReport<'_>, out: &mut dyn Write) -> ScopeResult<()>;

    /// 渲染到内存缓冲区
    fn render_to_vec(&self, report: &HistogramReport<'_>) -> ScopeResult<Vec<u8>> {
        let mut out = Vec::new();
        self.render(report, &mut out)?;
        Ok(out)
    }
}
