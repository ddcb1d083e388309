//! 日志初始化模块.
//!
//! 双输出:
//! - console: 彩色, 默认 info, -v/-vv 提升, -q 只显示错误
//! - file: 无色, 无 target, 默认 info, 可通过 -v/-vv 或 YUVSCOPE_LOG 环境变量调整
//!
//! 日志文件输出到 {log_dir}/{prefix}.{date}.log, 按天滚动.
//! 库 crate 通过 `log` 门面输出, 由 tracing-subscriber 自带的 log 桥接收集.

use chrono::{Datelike, Local, Timelike};
use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// 初始化日志系统
///
/// - `file_prefix`: 日志文件前缀 (如 "yuv-histogram")
/// - `log_dir`: 日志目录, 创建失败时只输出到控制台
/// - `verbosity`: 0=info, 1=debug, 2+=trace
/// - `quiet`: 控制台只输出错误
pub fn init(file_prefix: &str, log_dir: &Path, verbosity: u8, quiet: bool) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let console_filter = EnvFilter::new(if quiet { "error" } else { level });
    let console_layer = fmt::Layer::default()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(ConsoleFormatter)
        .with_filter(console_filter);

    let file_appender = std::fs::create_dir_all(log_dir)
        .ok()
        .and_then(|_| {
            tracing_appender::rolling::RollingFileAppender::builder()
                .rotation(tracing_appender::rolling::Rotation::DAILY)
                .filename_prefix(file_prefix)
                .filename_suffix("log")
                .build(log_dir)
                .ok()
        });

    let file_layer = file_appender.map(|appender| {
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        LOG_GUARD.set(guard).ok();
        // File: 默认与控制台同级, YUVSCOPE_LOG 环境变量可覆盖
        let file_filter =
            EnvFilter::try_from_env("YUVSCOPE_LOG").unwrap_or_else(|_| EnvFilter::new(level));
        fmt::Layer::default()
            .with_writer(non_blocking)
            .with_ansi(false)
            .event_format(FileFormatter)
            .with_filter(file_filter)
    });

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// 毫秒精度的本地时间戳 `[MM-DD hh:mm:ss.mmm]`
fn write_timestamp(writer: &mut Writer<'_>) -> std::fmt::Result {
    let now = Local::now();
    write!(
        writer,
        "[{:02}-{:02} {:02}:{:02}:{:02}.{:03}] ",
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.timestamp_subsec_millis(),
    )
}

/// Console 格式: 彩色, 带时间戳
struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let color = match *meta.level() {
            tracing::Level::ERROR => "\x1b[31m",
            tracing::Level::WARN => "\x1b[33m",
            tracing::Level::INFO => "\x1b[32m",
            _ => "\x1b[34m",
        };
        write_timestamp(&mut writer)?;
        write!(writer, "{}{:5}\x1b[0m > ", color, meta.level())?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// File 格式: 无色, 无 target, 时间戳 + 级别 + 消息
struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        write_timestamp(&mut writer)?;
        write!(writer, "{:5} > ", event.metadata().level())?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
