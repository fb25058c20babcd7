use crate::constants::{config, mirror, output, trigger};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 应用配置结构
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub trigger: TriggerConfig,
    pub mirror: MirrorConfig,
}

/// 输出目录配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub release_dir: String,
    pub ddl_dir: String,
    pub rollback_dir: String,
}

/// 触发器改写配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    pub indent: String,
}

/// 镜像表配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MirrorConfig {
    pub prefix: String,
    pub enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            release_dir: output::DEFAULT_RELEASE_DIR.to_string(),
            ddl_dir: output::DDL_DIR_NAME.to_string(),
            rollback_dir: output::ROLLBACK_DIR_NAME.to_string(),
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            indent: trigger::DEFAULT_INDENT.to_string(),
        }
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            prefix: mirror::DEFAULT_PREFIX.to_string(),
            enabled: true,
        }
    }
}

impl AppConfig {
    /// 智能查找并加载配置文件
    /// 按优先级查找：alter-gen.toml -> .alter-gen.toml，都不存在时使用默认配置
    pub fn find_and_load_config() -> Result<Self> {
        for config_file in config::CONFIG_FILE_CANDIDATES {
            if Path::new(config_file).exists() {
                tracing::info!("找到配置文件: {}", config_file);
                return Self::load_from_file(config_file);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments();
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    pub fn to_toml_with_comments(&self) -> String {
        const TEMPLATE: &str = include_str!("../templates/alter-gen.toml.template");

        TEMPLATE
            .replace("{release_dir}", &quoted(&self.output.release_dir))
            .replace("{ddl_dir}", &quoted(&self.output.ddl_dir))
            .replace("{rollback_dir}", &quoted(&self.output.rollback_dir))
            .replace("{indent}", &quoted(&self.trigger.indent))
            .replace("{prefix}", &quoted(&self.mirror.prefix))
            .replace("{enabled}", &self.mirror.enabled.to_string())
    }

    /// 获取DDL输出目录
    pub fn get_ddl_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.output.release_dir).join(&self.output.ddl_dir)
    }

    /// 获取回滚DDL输出目录
    pub fn get_rollback_ddl_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.output.release_dir)
            .join(&self.output.rollback_dir)
            .join(&self.output.ddl_dir)
    }
}

/// 转成带转义的 TOML 字符串字面量
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
