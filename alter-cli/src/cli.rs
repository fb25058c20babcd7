use crate::project_info::{metadata, version_info};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Alter CLI - GaussDB 表结构变更脚本生成工具
#[derive(Parser)]
#[command(name = metadata::PROJECT_NAME)]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径（不指定时依次查找 alter-gen.toml、.alter-gen.toml）
    #[arg(short, long, env = "ALTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 生成变更脚本、回滚脚本以及 J 表脚本
    Generate(GenerateArgs),
    /// 创建默认配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 显示常用数据类型与可空性选项
    Types,
}

/// generate 命令参数
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// 表名（会被转为大写）
    #[arg(short, long)]
    pub table: Option<String>,

    /// 请求文件 (TOML)，包含新增列、删除列与触发器；指定后忽略 --columns 等参数
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// 新增列名，逗号分隔
    #[arg(long)]
    pub columns: Option<String>,

    /// 数据类型，逗号分隔（1 项应用到全部列）
    #[arg(long = "types")]
    pub data_types: Option<String>,

    /// 长度，逗号分隔，例如 "(10,2),(5)"
    #[arg(long, default_value = "")]
    pub sizes: String,

    /// 可空性：NULL 或 NOT NULL，逗号分隔
    #[arg(long, default_value = "NULL")]
    pub nullability: String,

    /// 列注释，逗号分隔
    #[arg(long, default_value = "")]
    pub comments: String,

    /// 要删除的列，逗号分隔
    #[arg(long, default_value = "")]
    pub drop: String,

    /// 插入触发器 (TJI) 代码文件
    #[arg(long)]
    pub insert_trigger: Option<PathBuf>,

    /// 更新触发器 (TJU) 代码文件
    #[arg(long)]
    pub update_trigger: Option<PathBuf>,

    /// 删除触发器 (TJD) 代码文件
    #[arg(long)]
    pub delete_trigger: Option<PathBuf>,

    /// 不生成 J 表的变更脚本
    #[arg(long)]
    pub no_mirror: bool,

    /// 输出项目目录
    #[arg(short, long, env = "ALTER_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// 只打印生成的脚本，不写入文件
    #[arg(long)]
    pub dry_run: bool,
}
