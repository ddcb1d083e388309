//! yuv-diff - 10 位原始 YUV 帧差分工具
//!
//! 用法:
//!   yuv-diff generate -a <原图> -b <参考图> -o <差分图>
//!   yuv-diff recover -b <参考图> -d <差分图> -o <恢复图>

mod logging;

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

use yuvscope_core::{FrameLayout, PixelFormat, ScopeError, ScopeResult};
use yuvscope_diff::{DiffMode, DiffStats, process_streams};

#[derive(Parser, Debug)]
#[command(name = "yuv-diff", version, about = "10 位原始 YUV 帧差分生成与恢复工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// 图像宽度 (必须为偶数)
    #[arg(long, global = true, default_value_t = 3840)]
    width: u32,

    /// 图像高度 (必须为偶数)
    #[arg(long, global = true, default_value_t = 2160)]
    height: u32,

    /// 最多处理的帧数 (默认处理到输入结束)
    #[arg(long, global = true)]
    frame_count: Option<u64>,

    /// 覆盖已存在的输出文件
    #[arg(short = 'y', long, global = true)]
    overwrite: bool,

    /// 日志目录
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// 静默模式 (控制台只输出错误)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 由原图 A 与参考图 B 生成差分图 D = A - B
    Generate {
        /// 原图 A
        #[arg(short = 'a', long)]
        original: PathBuf,
        /// 参考图 B
        #[arg(short = 'b', long)]
        reference: PathBuf,
        /// 输出差分图 D
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 由参考图 B 与差分图 D 恢复原图 A = B + D
    Recover {
        /// 参考图 B
        #[arg(short = 'b', long)]
        reference: PathBuf,
        /// 差分图 D
        #[arg(short = 'd', long)]
        diff: PathBuf,
        /// 输出恢复图 A
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Command {
    /// (模式, 第一路输入, 第二路输入, 输出)
    fn parts(&self) -> (DiffMode, &Path, &Path, &Path) {
        match self {
            Self::Generate {
                original,
                reference,
                output,
            } => (DiffMode::Generate, original.as_path(), reference.as_path(), output.as_path()),
            Self::Recover {
                reference,
                diff,
                output,
            } => (DiffMode::Recover, reference.as_path(), diff.as_path(), output.as_path()),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init("yuv-diff", &cli.log_dir, cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        error!("{e}");
        eprintln!("错误: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> ScopeResult<()> {
    let layout = FrameLayout::new(cli.width, cli.height, 10, PixelFormat::Yuv420p10le)?;
    if cli.frame_count == Some(0) {
        return Err(ScopeError::InvalidArgument("帧数必须大于 0".into()));
    }
    let (mode, first_path, second_path, output_path) = cli.command.parts();
    if !cli.overwrite && output_path.exists() {
        return Err(ScopeError::InvalidArgument(format!(
            "输出文件已存在 '{}', 使用 -y 覆盖",
            output_path.display()
        )));
    }

    info!(
        "{}: {} + {} -> {}",
        mode.name(),
        first_path.display(),
        second_path.display(),
        output_path.display()
    );
    info!(
        "布局: {}x{}, 每帧 {} 字节",
        layout.width(),
        layout.height(),
        layout.frame_byte_size()
    );

    let mut first = BufReader::new(File::open(first_path)?);
    let mut second = BufReader::new(File::open(second_path)?);
    let result = File::create(output_path).map_err(ScopeError::from).and_then(|file| {
        let mut out = BufWriter::new(file);
        process_streams(
            mode,
            &layout,
            &mut first,
            &mut second,
            &mut out,
            cli.frame_count,
        )
    });

    match result {
        Ok(stats) => {
            report(&stats);
            Ok(())
        }
        Err(e) => {
            // 不保留写了一半的输出
            std::fs::remove_file(output_path).ok();
            Err(e)
        }
    }
}

fn report(stats: &DiffStats) {
    info!("完成: {} 帧, {} 样本", stats.frames, stats.samples);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(samples: &[u16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_cli_generate_args() {
        let cli = Cli::try_parse_from([
            "yuv-diff", "generate", "-a", "a.yuv", "-b", "b.yuv", "-o", "d.yuv",
        ])
        .unwrap();
        assert_eq!(cli.width, 3840);
        assert_eq!(cli.height, 2160);
        assert_eq!(cli.frame_count, None);
        let (mode, first, second, out) = cli.command.parts();
        assert_eq!(mode, DiffMode::Generate);
        assert_eq!(first, Path::new("a.yuv"));
        assert_eq!(second, Path::new("b.yuv"));
        assert_eq!(out, Path::new("d.yuv"));
    }

    #[test]
    fn test_cli_recover_args() {
        let cli = Cli::try_parse_from([
            "yuv-diff", "recover", "-b", "b.yuv", "-d", "d.yuv", "-o", "a.yuv", "--width", "64",
        ])
        .unwrap();
        assert_eq!(cli.width, 64);
        let (mode, first, second, _) = cli.command.parts();
        assert_eq!(mode, DiffMode::Recover);
        assert_eq!(first, Path::new("b.yuv"));
        assert_eq!(second, Path::new("d.yuv"));
    }

    #[test]
    fn test_run_generate_and_recover_files() {
        let dir = tempfile::tempdir().unwrap();
        let a: Vec<u16> = (0..12).map(|i| i * 80).collect();
        let b: Vec<u16> = (0..12).map(|i| 1000 - i * 50).collect();
        let a_path = dir.path().join("a.yuv");
        let b_path = dir.path().join("b.yuv");
        let d_path = dir.path().join("d.yuv");
        let r_path = dir.path().join("r.yuv");
        std::fs::write(&a_path, encode(&a)).unwrap();
        std::fs::write(&b_path, encode(&b)).unwrap();

        let generate = Cli::try_parse_from([
            "yuv-diff",
            "generate",
            "-a",
            a_path.to_str().unwrap(),
            "-b",
            b_path.to_str().unwrap(),
            "-o",
            d_path.to_str().unwrap(),
            "--width",
            "4",
            "--height",
            "2",
        ])
        .unwrap();
        run(&generate).unwrap();

        let recover = Cli::try_parse_from([
            "yuv-diff",
            "recover",
            "-b",
            b_path.to_str().unwrap(),
            "-d",
            d_path.to_str().unwrap(),
            "-o",
            r_path.to_str().unwrap(),
            "--width",
            "4",
            "--height",
            "2",
        ])
        .unwrap();
        run(&recover).unwrap();

        assert_eq!(std::fs::read(&r_path).unwrap(), encode(&a));
    }

    #[test]
    fn test_run_truncated_reference_removes_output() {
        let dir = tempfile::tempdir().unwrap();
        let a_path = dir.path().join("a.yuv");
        let b_path = dir.path().join("b.yuv");
        let d_path = dir.path().join("d.yuv");
        std::fs::write(&a_path, vec![0u8; 24]).unwrap();
        std::fs::write(&b_path, vec![0u8; 10]).unwrap();

        let cli = Cli::try_parse_from([
            "yuv-diff",
            "generate",
            "-a",
            a_path.to_str().unwrap(),
            "-b",
            b_path.to_str().unwrap(),
            "-o",
            d_path.to_str().unwrap(),
            "--width",
            "4",
            "--height",
            "2",
        ])
        .unwrap();
        assert!(matches!(run(&cli), Err(ScopeError::TruncatedRead { .. })));
        assert!(!d_path.exists());
    }

    #[test]
    fn test_run_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let d_path = dir.path().join("d.yuv");
        std::fs::write(&d_path, b"keep").unwrap();
        let cli = Cli::try_parse_from([
            "yuv-diff",
            "generate",
            "-a",
            "/nonexistent/a.yuv",
            "-b",
            "/nonexistent/b.yuv",
            "-o",
            d_path.to_str().unwrap(),
            "--width",
            "4",
            "--height",
            "2",
        ])
        .unwrap();
        assert!(matches!(run(&cli), Err(ScopeError::InvalidArgument(_))));
        assert_eq!(std::fs::read(&d_path).unwrap(), b"keep");
    }
}
