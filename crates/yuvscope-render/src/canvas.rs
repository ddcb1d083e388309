//! RGB24 光栅画布.
//!
//! 只提供直方图需要的几种图元: 像素、矩形填充、水平/垂直线.
//! 所有坐标都会被裁剪到画布范围内, 越界绘制静默忽略.

use std::io::Write;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use yuvscope_core::{ScopeError, ScopeResult};

/// RGB 颜色
pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const BLACK: Rgb = (0, 0, 0);
/// matplotlib 的 "salmon"
pub const SALMON: Rgb = (250, 128, 114);

/// RGB24 画布, 行优先紧密排列
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// 创建填充为 `background` 的画布
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let (r, g, b) = background;
        let data = [r, g, b].repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// 读取像素 (越界返回 None)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 3;
        Some((self.data[off], self.data[off + 1], self.data[off + 2]))
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let off = (y as usize * self.width as usize + x as usize) * 3;
        self.data[off] = color.0;
        self.data[off + 1] = color.1;
        self.data[off + 2] = color.2;
    }

    /// 填充 `[x0, x1) x [y0, y1)`
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
        let x0 = x0.clamp(0, i64::from(self.width));
        let x1 = x1.clamp(0, i64::from(self.width));
        let y0 = y0.clamp(0, i64::from(self.height));
        let y1 = y1.clamp(0, i64::from(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// 水平线 `[x0, x1]`, 线宽向下延伸
    pub fn hline(&mut self, x0: i64, x1: i64, y: i64, thickness: i64, color: Rgb) {
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.fill_rect(lo, y, hi + 1, y + thickness.max(1), color);
    }

    /// 垂直线 `[y0, y1]`, 线宽向右延伸
    pub fn vline(&mut self, x: i64, y0: i64, y1: i64, thickness: i64, color: Rgb) {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.fill_rect(x, lo, x + thickness.max(1), hi + 1, color);
    }

    /// 矩形边框
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, thickness: i64, color: Rgb) {
        self.hline(x0, x1, y0, thickness, color);
        self.hline(x0, x1, y1, thickness, color);
        self.vline(x0, y0, y1, thickness, color);
        self.vline(x1, y0, y1, thickness, color);
    }

    /// 编码为 PNG 写入 `out`
    pub fn write_png(&self, out: &mut dyn Write) -> ScopeResult<()> {
        PngEncoder::new(out)
            .write_image(
                &self.data,
                self.width,
                self.height,
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| ScopeError::Render(format!("PNG 编码失败: {e}")))
    }
}
