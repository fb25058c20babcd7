use crate::project_info::metadata;
use alter_core::config::AppConfig;
use alter_core::constants::config;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 创建默认配置文件
pub fn run_init(force: bool, config_path: Option<&Path>) -> Result<()> {
    info!("🛠️  {} 初始化", metadata::display::CLI_FULL_NAME);

    let default_path = config::get_config_file_path();
    let path = config_path.unwrap_or(&default_path);

    if !force && path.exists() {
        warn!("⚠️  检测到已存在的配置文件: {}", path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        return Ok(());
    }

    AppConfig::default()
        .save_to_file(path)
        .with_context(|| format!("无法写入配置文件 {}", path.display()))?;
    info!("   ✅ 创建配置文件: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_init_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alter-gen.toml");

        run_init(false, Some(path.as_path())).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap(), AppConfig::default());

        fs::write(&path, "[mirror]\nprefix = \"X_\"\n").unwrap();
        run_init(false, Some(path.as_path())).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap().mirror.prefix, "X_");

        run_init(true, Some(path.as_path())).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap().mirror.prefix, "J_");
    }
}
