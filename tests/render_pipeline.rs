//! 直方图渲染集成测试.
//!
//! 统计结果 → PNG 三联图 / JSON 摘要, 再解码验证输出.

use std::io::Cursor;

use yuvscope::core::{FrameLayout, PixelFormat};
use yuvscope::hist::{BinEdges, FrameRange, PlaneHistograms, accumulate_frames};
use yuvscope::render::canvas::SALMON;
use yuvscope::render::{
    FigureStyle, HistogramRenderer, HistogramReport, JsonSummaryRenderer, PngFigureRenderer,
};

fn encode(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

struct Fixture {
    layout: FrameLayout,
    edges: BinEdges,
    range: FrameRange,
    histograms: PlaneHistograms,
}

impl Fixture {
    fn new() -> Self {
        let layout = FrameLayout::new(4, 2, 10, PixelFormat::Yuv420p10le).unwrap();
        let edges = BinEdges::new(4, 10).unwrap();
        let range = FrameRange::new(0, 1);
        let data = encode(&[0, 0, 300, 300, 600, 600, 1023, 1023, 100, 900, 512, 512]);
        let histograms =
            accumulate_frames(&mut Cursor::new(data), &layout, &edges, range).unwrap();
        Self {
            layout,
            edges,
            range,
            histograms,
        }
    }

    fn report(&self) -> HistogramReport<'_> {
        HistogramReport {
            layout: &self.layout,
            range: self.range,
            edges: &self.edges,
            histograms: &self.histograms,
        }
    }
}

#[test]
fn test_png_decodes_with_requested_size() {
    let fixture = Fixture::new();
    let renderer = PngFigureRenderer::new(FigureStyle::with_size(600, 900));
    assert_eq!(renderer.name(), "png");
    let bytes = renderer.render_to_vec(&fixture.report()).unwrap();

    let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(img.width(), 600);
    assert_eq!(img.height(), 900);

    let salmon = image::Rgb([SALMON.0, SALMON.1, SALMON.2]);
    assert!(img.pixels().any(|p| *p == salmon));
    // 背景为白色
    assert_eq!(*img.get_pixel(0, 0), image::Rgb([255, 255, 255]));
}

#[test]
fn test_png_default_size() {
    let fixture = Fixture::new();
    let bytes = PngFigureRenderer::new(FigureStyle::default())
        .render_to_vec(&fixture.report())
        .unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (2400, 3600));
}

#[test]
fn test_png_rejects_tiny_figure() {
    let fixture = Fixture::new();
    let result =
        PngFigureRenderer::new(FigureStyle::with_size(50, 50)).render_to_vec(&fixture.report());
    assert!(result.is_err());
}

#[test]
fn test_json_summary_fields() {
    let fixture = Fixture::new();
    let renderer = JsonSummaryRenderer { pretty: false };
    assert_eq!(renderer.name(), "json");
    let bytes = renderer.render_to_vec(&fixture.report()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["width"], 4);
    assert_eq!(value["height"], 2);
    assert_eq!(value["pixel_format"], "yuv420p10le");
    assert_eq!(value["bit_depth"], 10);
    assert_eq!(value["frame_offset"], 0);
    assert_eq!(value["frame_count"], 1);
    assert_eq!(value["bin_count"], 4);
    assert_eq!(
        value["bin_edges"],
        serde_json::json!([-1.0, 255.0, 511.0, 767.0, 1023.0])
    );

    let planes = value["planes"].as_array().unwrap();
    assert_eq!(planes.len(), 3);
    assert_eq!(planes[0]["plane"], "Y");
    assert_eq!(planes[0]["counts"], serde_json::json!([2, 2, 2, 2]));
    assert_eq!(planes[1]["plane"], "U");
    assert_eq!(planes[1]["counts"], serde_json::json!([1, 0, 0, 1]));
    assert_eq!(planes[2]["plane"], "V");
    assert_eq!(planes[2]["counts"], serde_json::json!([0, 0, 2, 0]));
    assert_eq!(planes[2]["dropped"], 0);
}
