//! 三联直方图 PNG.
//!
//! 上中下三个面板依次为 Y, U, V. 面板位置沿用 8x12 英寸竖排子图的比例:
//! 左右边距 12.5% / 10%, 上下边距 5%, 面板间距为面板高度的 0.3 倍.

use std::io::Write;

use log::debug;
use yuvscope_core::{Plane, ScopeError, ScopeResult};
use yuvscope_hist::{BinEdges, PlaneHistogram, PlaneHistograms};

use crate::canvas::{BLACK, Canvas, Rgb, SALMON, WHITE};
use crate::font::{draw_text, draw_text_vertical, text_height, text_width};
use crate::{HistogramRenderer, HistogramReport};

/// 图像最小尺寸, 小于此尺寸时文字无法容纳
const MIN_WIDTH: u32 = 240;
const MIN_HEIGHT: u32 = 360;

/// 图像样式
#[derive(Debug, Clone)]
pub struct FigureStyle {
    /// 图像宽度 (像素)
    pub width: u32,
    /// 图像高度 (像素)
    pub height: u32,
    pub background: Rgb,
    /// 直方图填充色
    pub fill: Rgb,
    /// 直方图轮廓与坐标轴颜色
    pub edge: Rgb,
    /// 横轴刻度数 (均匀分布在 `[0, 2^bit_depth]`)
    pub x_tick_count: usize,
    pub x_label: String,
    pub y_label: String,
}

impl Default for FigureStyle {
    /// 8x12 英寸, 300 dpi
    fn default() -> Self {
        Self {
            width: 2400,
            height: 3600,
            background: WHITE,
            fill: SALMON,
            edge: BLACK,
            x_tick_count: 17,
            x_label: "pixel value".into(),
            y_label: "count".into(),
        }
    }
}

impl FigureStyle {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// 检查尺寸与刻度数, 不涉及任何绘制
    pub fn validate(&self) -> ScopeResult<()> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ScopeError::InvalidArgument(format!(
                "图像尺寸 {}x{} 过小, 至少 {MIN_WIDTH}x{MIN_HEIGHT}",
                self.width, self.height
            )));
        }
        if self.x_tick_count < 2 {
            return Err(ScopeError::InvalidArgument("横轴刻度数至少为 2".into()));
        }
        Ok(())
    }
}

/// 面板在画布上的位置 (像素, 闭区间)
#[derive(Debug, Clone, Copy)]
struct PanelRect {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl PanelRect {
    fn width(&self) -> f64 {
        (self.right - self.left) as f64
    }

    fn height(&self) -> f64 {
        (self.bottom - self.top) as f64
    }
}

/// 计算三个面板的位置
fn panel_rects(width: u32, height: u32) -> [PanelRect; 3] {
    let w = f64::from(width);
    let h = f64::from(height);
    let axes_h = h * 0.9 / 3.6;
    let gap = axes_h * 0.3;
    let left = (w * 0.125).round() as i64;
    let right = (w * 0.9).round() as i64;
    std::array::from_fn(|i| {
        let top = h * 0.05 + i as f64 * (axes_h + gap);
        PanelRect {
            left,
            top: top.round() as i64,
            right,
            bottom: (top + axes_h).round() as i64,
        }
    })
}

/// 计算纵轴上限和刻度步长, 上方留出约 5% 空白
pub(crate) fn nice_axis(peak: u64) -> (u64, u64) {
    if peak == 0 {
        return (1, 1);
    }
    let target = peak + peak.div_ceil(20);
    let raw = target as f64 / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = ((nice * magnitude).round() as u64).max(1);
    (target.div_ceil(step) * step, step)
}

/// 刻度标签: 百万以下直接显示整数, 以上用科学计数法 (如 2.5e6)
pub(crate) fn format_tick(value: f64) -> String {
    if value.abs() < 1e6 {
        if value.fract() == 0.0 {
            return format!("{}", value as i64);
        }
        return format!("{value:.1}");
    }
    let exp = value.abs().log10().floor() as i32;
    let mantissa = value / 10f64.powi(exp);
    let text = format!("{mantissa:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}e{exp}")
}

/// 绘制三联直方图
pub fn render_figure(
    histograms: &PlaneHistograms,
    edges: &BinEdges,
    style: &FigureStyle,
) -> ScopeResult<Canvas> {
    style.validate()?;

    let mut canvas = Canvas::new(style.width, style.height, style.background);
    let rects = panel_rects(style.width, style.height);
    for (plane, rect) in Plane::ALL.into_iter().zip(rects) {
        draw_panel(&mut canvas, rect, plane, histograms.get(plane), edges, style);
    }
    debug!(
        "直方图渲染完成: {}x{}, {} 箱",
        style.width,
        style.height,
        edges.bin_count()
    );
    Ok(canvas)
}

fn draw_panel(
    canvas: &mut Canvas,
    rect: PanelRect,
    plane: Plane,
    hist: &PlaneHistogram,
    edges: &BinEdges,
    style: &FigureStyle,
) {
    let scale = (style.height / 600).max(1);
    let title_scale = scale + scale / 2;
    let line = i64::from((scale / 3).max(1));
    let tick_len = i64::from(scale) * 2;
    let pad = i64::from(scale) * 2;

    // 横轴覆盖最低边界到 2^bit_depth, 两侧各留 2%
    let full = f64::from(1u32 << edges.bit_depth());
    let lo = edges.lower().min(0.0);
    let hi = edges.upper().max(full);
    let margin = (hi - lo) * 0.02;
    let (x_min, x_max) = (lo - margin, hi + margin);
    let map_x =
        |v: f64| rect.left + ((v - x_min) / (x_max - x_min) * rect.width()).round() as i64;

    let (y_max, y_step) = nice_axis(hist.peak());
    let map_y = |v: u64| rect.bottom - (v as f64 / y_max as f64 * rect.height()).round() as i64;

    // 填充
    let e = edges.as_slice();
    for (i, &count) in hist.counts().iter().enumerate() {
        if count == 0 {
            continue;
        }
        canvas.fill_rect(
            map_x(e[i]),
            map_y(count),
            map_x(e[i + 1]),
            rect.bottom,
            style.fill,
        );
    }

    // 阶梯轮廓
    let mut prev_y = rect.bottom;
    for (i, &count) in hist.counts().iter().enumerate() {
        let x0 = map_x(e[i]);
        let x1 = map_x(e[i + 1]);
        let y = map_y(count);
        canvas.vline(x0, prev_y, y, line, style.edge);
        canvas.hline(x0, x1, y, line, style.edge);
        prev_y = y;
    }
    let last_x = map_x(edges.upper());
    canvas.vline(last_x, prev_y, rect.bottom, line, style.edge);
    canvas.hline(map_x(edges.lower()), last_x, rect.bottom, line, style.edge);

    // 坐标轴边框
    canvas.stroke_rect(rect.left, rect.top, rect.right, rect.bottom, line, style.edge);

    // 横轴刻度
    let label_h = i64::from(text_height(scale));
    let divisions = (style.x_tick_count - 1) as f64;
    for i in 0..style.x_tick_count {
        let value = full * i as f64 / divisions;
        let x = map_x(value);
        canvas.vline(x, rect.bottom, rect.bottom + tick_len, line, style.edge);
        let label = format_tick(value);
        let w = i64::from(text_width(&label, scale));
        let label_y = rect.bottom + tick_len + pad;
        draw_text(canvas, &label, x - w / 2, label_y, scale, style.edge);
    }

    // 纵轴刻度
    let mut widest = 0i64;
    let mut value = 0u64;
    while value <= y_max {
        let y = map_y(value);
        canvas.hline(rect.left - tick_len, rect.left, y, line, style.edge);
        let label = format_tick(value as f64);
        let w = i64::from(text_width(&label, scale));
        widest = widest.max(w);
        let label_x = rect.left - tick_len - pad - w;
        draw_text(canvas, &label, label_x, y - label_h / 2, scale, style.edge);
        value += y_step;
    }

    // 标题与轴标签
    let title = format!("{plane} histogram");
    let title_w = i64::from(text_width(&title, title_scale));
    let title_h = i64::from(text_height(title_scale));
    let center_x = (rect.left + rect.right) / 2;
    let title_y = rect.top - title_h - pad * 2;
    draw_text(canvas, &title, center_x - title_w / 2, title_y, title_scale, style.edge);

    let x_label_w = i64::from(text_width(&style.x_label, scale));
    let x_label_y = rect.bottom + tick_len + pad * 2 + label_h;
    let x_label_x = center_x - x_label_w / 2;
    draw_text(canvas, &style.x_label, x_label_x, x_label_y, scale, style.edge);

    let y_label_len = i64::from(text_width(&style.y_label, scale));
    let y_label_x = rect.left - tick_len - pad * 2 - widest - label_h;
    let center_y = (rect.top + rect.bottom) / 2;
    let y_label_y = center_y + y_label_len / 2;
    draw_text_vertical(canvas, &style.y_label, y_label_x, y_label_y, scale, style.edge);
}

/// PNG 三联图渲染器
#[derive(Debug, Clone, Default)]
pub struct PngFigureRenderer {
    style: FigureStyle,
}

impl PngFigureRenderer {
    pub fn new(style: FigureStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &FigureStyle {
        &self.style
    }
}

impl HistogramRenderer for PngFigureRenderer {
    fn name(&self) -> &str {
        "png"
    }

    fn render(&self, report: &HistogramReport<'_>, out: &mut dyn Write) -> ScopeResult<()> {
        let canvas = render_figure(report.histograms, report.edges, &self.style)?;
        canvas.write_png(out)
    }
}
