//! JSON 直方图摘要.

use std::io::Write;

use serde::Serialize;
use yuvscope_core::{ScopeError, ScopeResult};
use yuvscope_hist::PlaneHistogram;

use crate::{HistogramRenderer, HistogramReport};

/// 完整摘要
#[derive(Serialize)]
struct Summary<'a> {
    width: u32,
    height: u32,
    pixel_format: String,
    bit_depth: u32,
    frame_offset: u64,
    frame_count: u64,
    bin_count: usize,
    bin_edges: &'a [f64],
    planes: Vec<PlaneSummary<'a>>,
}

/// 单个平面的统计, 直方图字段 (counts, samples, dropped) 平铺输出
#[derive(Serialize)]
struct PlaneSummary<'a> {
    plane: &'static str,
    #[serde(flatten)]
    histogram: &'a PlaneHistogram,
}

/// JSON 摘要渲染器
#[derive(Debug, Clone, Default)]
pub struct JsonSummaryRenderer {
    /// 缩进输出
    pub pretty: bool,
}

impl HistogramRenderer for JsonSummaryRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn render(&self, report: &HistogramReport<'_>, out: &mut dyn Write) -> ScopeResult<()> {
        let summary = Summary {
            width: report.layout.width(),
            height: report.layout.height(),
            pixel_format: report.layout.pixel_format().to_string(),
            bit_depth: report.edges.bit_depth(),
            frame_offset: report.range.offset,
            frame_count: report.range.count,
            bin_count: report.edges.bin_count(),
            bin_edges: report.edges.as_slice(),
            planes: report
                .histograms
                .iter()
                .map(|(plane, histogram)| PlaneSummary {
                    plane: plane.name(),
                    histogram,
                })
                .collect(),
        };
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &summary)
        } else {
            serde_json::to_writer(&mut *out, &summary)
        };
        result.map_err(|e| ScopeError::Render(format!("JSON 序列化失败: {e}")))?;
        writeln!(out)?;
        Ok(())
    }
}
