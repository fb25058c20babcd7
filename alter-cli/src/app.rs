use alter_core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::Commands;
use crate::commands;

pub struct CliApp {
    pub config: AppConfig,
}

impl CliApp {
    /// 加载配置并初始化CLI应用：显式指定的配置文件必须存在，否则按默认顺序查找
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from_file(path)
                .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
            None => AppConfig::find_and_load_config()?,
        };
        Ok(Self { config })
    }

    /// 运行应用命令
    pub fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Generate(args) => commands::run_generate(self, args),
            Commands::Types => {
                commands::show_vocabulary();
                Ok(())
            }
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
        }
    }
}
