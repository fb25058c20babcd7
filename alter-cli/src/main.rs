use alter_cli::{Cli, CliApp, Commands, run_init, setup_logging};
use clap::Parser;
use tracing::error;

fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录，guard 需要存活到程序结束
    let _log_guard = setup_logging(cli.verbose);

    // `init` 命令是特例，它不需要预先加载配置
    if let Commands::Init { force } = cli.command {
        if let Err(e) = run_init(force, cli.config.as_deref()) {
            error!("❌ 初始化失败: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let app = match CliApp::new(cli.config.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            error!("❌ 配置加载失败: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run_command(cli.command) {
        error!("❌ 操作失败: {:#}", e);
        std::process::exit(1);
    }
}
