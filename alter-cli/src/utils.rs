use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// 设置日志记录系统
///
/// - 库代码只使用 tracing 宏记录日志
/// - 支持 RUST_LOG 环境变量控制日志级别，`-v` 时默认 debug
/// - 设置 `ALTER_LOG_FILE` 时输出到文件（详细格式），否则输出到终端（简洁格式）
///
/// 返回的 guard 需要保持到程序结束，否则文件日志可能丢失
pub fn setup_logging(verbose: bool) -> Option<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Ok(log_file) = std::env::var("ALTER_LOG_FILE") {
        let path = Path::new(&log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path
            .file_name()
            .unwrap_or_else(|| OsStr::new("alter-cli.log"));

        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .init();
        Some(guard)
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_line_number(false)
            .without_time()
            .compact()
            .init();
        None
    }
}
