//! yuv-histogram - 原始 YUV 帧像素值直方图生成工具
//!
//! 从 `yuv420p10le` 原始帧文件中读取指定帧范围, 统计 Y/U/V 三个平面的
//! 10 位样本值分布, 输出为三联 PNG 直方图 (可选附带 JSON 摘要).

mod logging;

use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error, info, warn};

use yuvscope_core::{FrameLayout, ScopeError, ScopeResult};
use yuvscope_hist::{BinEdges, FrameRange, PlaneHistograms, accumulate_frames};
use yuvscope_render::{
    FigureStyle, HistogramRenderer, HistogramReport, JsonSummaryRenderer, PngFigureRenderer,
};

#[derive(Parser, Debug)]
#[command(
    name = "yuv-histogram",
    version,
    about = "原始 YUV 帧像素值直方图生成工具"
)]
struct Cli {
    /// 输入原始 YUV 文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 输出 PNG 文件路径
    #[arg(short, long)]
    output: PathBuf,

    /// 图像宽度 (必须为偶数)
    #[arg(long, default_value_t = 3840)]
    width: u32,

    /// 图像高度 (必须为偶数)
    #[arg(long, default_value_t = 2160)]
    height: u32,

    /// 起始帧索引
    #[arg(long, default_value_t = 0)]
    frame_offset: u64,

    /// 统计帧数
    #[arg(long, default_value_t = 1)]
    frame_count: u64,

    /// 像素格式 (仅支持 yuv420p10le)
    #[arg(long, default_value = "yuv420p10le")]
    pixel_format: String,

    /// 位深 (仅支持 10)
    #[arg(long, default_value_t = 10)]
    bit_depth: u32,

    /// 直方图箱数
    #[arg(long, default_value_t = 256)]
    bin_count: usize,

    /// 额外输出 JSON 摘要到指定路径
    #[arg(long)]
    json: Option<PathBuf>,

    /// 输出图像宽度 (像素)
    #[arg(long, default_value_t = 2400)]
    figure_width: u32,

    /// 输出图像高度 (像素)
    #[arg(long, default_value_t = 3600)]
    figure_height: u32,

    /// 覆盖已存在的输出文件
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// 日志目录
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// 静默模式 (控制台只输出错误)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init("yuv-histogram", &cli.log_dir, cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        error!("{e}");
        eprintln!("错误: {e}");
        process::exit(1);
    }
}

/// 检查输出路径, 未指定 -y 时拒绝覆盖
fn check_output(path: &Path, overwrite: bool) -> ScopeResult<()> {
    if !overwrite && path.exists() {
        return Err(ScopeError::InvalidArgument(format!(
            "输出文件已存在 '{}', 使用 -y 覆盖",
            path.display()
        )));
    }
    Ok(())
}

fn log_plane_stats(histograms: &PlaneHistograms) {
    for (plane, hist) in histograms.iter() {
        info!(
            "  {} 平面: {} 样本, 峰值箱 {} 次",
            plane,
            hist.samples(),
            hist.peak()
        );
        if hist.dropped() > 0 {
            warn!(
                "  {} 平面: {} 个样本超出分箱范围, 已忽略 (位深设置可能与数据不符)",
                plane,
                hist.dropped()
            );
        }
    }
}

fn render(
    renderer: &dyn HistogramRenderer,
    report: &HistogramReport<'_>,
) -> ScopeResult<Vec<u8>> {
    let bytes = renderer.render_to_vec(report)?;
    debug!("{} 渲染完成: {} 字节", renderer.name(), bytes.len());
    Ok(bytes)
}

fn run(cli: &Cli) -> ScopeResult<()> {
    // 参数校验全部在 I/O 之前完成
    let layout =
        FrameLayout::from_format_name(cli.width, cli.height, cli.bit_depth, &cli.pixel_format)?;
    let edges = BinEdges::new(cli.bin_count, layout.bit_depth())?;
    let range = FrameRange::new(cli.frame_offset, cli.frame_count);
    let style = FigureStyle::with_size(cli.figure_width, cli.figure_height);
    style.validate()?;
    check_output(&cli.output, cli.overwrite)?;
    if let Some(json) = &cli.json {
        check_output(json, cli.overwrite)?;
    }

    info!("输入: {}", cli.input.display());
    info!(
        "布局: {}x{} {}, 每帧 {} 字节, 帧 {}..{}, {} 箱",
        layout.width(),
        layout.height(),
        layout.pixel_format(),
        layout.frame_byte_size(),
        range.offset,
        range.end(),
        edges.bin_count()
    );

    let mut input = BufReader::new(File::open(&cli.input)?);
    let histograms = accumulate_frames(&mut input, &layout, &edges, range)?;
    drop(input);
    log_plane_stats(&histograms);

    let report = HistogramReport {
        layout: &layout,
        range,
        edges: &edges,
        histograms: &histograms,
    };

    // 全部渲染成功后才写文件, 失败时不留下任何输出
    let png = render(&PngFigureRenderer::new(style), &report)?;
    let json = match &cli.json {
        Some(_) => Some(render(&JsonSummaryRenderer { pretty: true }, &report)?),
        None => None,
    };

    std::fs::write(&cli.output, &png)?;
    info!("输出: {}", cli.output.display());
    if let (Some(path), Some(bytes)) = (&cli.json, json) {
        std::fs::write(path, bytes)?;
        info!("JSON 摘要: {}", path.display());
    }
    Ok(())
}
