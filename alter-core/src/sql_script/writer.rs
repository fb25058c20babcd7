use super::assembler::{DocumentKind, ScriptDocument};
use crate::config::AppConfig;
use crate::error::{Result, ScriptError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 生成脚本的落地目标
pub trait ScriptSink {
    fn write_script(&mut self, path: &Path, content: &str) -> Result<()>;
}

/// 写入本地文件系统
#[derive(Debug, Default, Clone, Copy)]
pub struct FsScriptSink;

impl ScriptSink for FsScriptSink {
    fn write_script(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|source| ScriptError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("写入 {} 字节到 {}", content.len(), path.display());
        Ok(())
    }
}

/// 保存在内存中，用于预览
#[derive(Debug, Default, Clone)]
pub struct MemoryScriptSink {
    pub files: Vec<(PathBuf, String)>,
}

impl ScriptSink for MemoryScriptSink {
    fn write_script(&mut self, path: &Path, content: &str) -> Result<()> {
        self.files.push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

/// 输出目录布局
///
/// ```text
/// <base>/<release>/ddl/<TABLE>.sql
/// <base>/<release>/ddl/J_<TABLE>.sql
/// <base>/<release>/rollback/ddl/<TABLE>_rollback.sql
/// <base>/<release>/rollback/ddl/J_<TABLE>_rollback.sql
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    pub ddl_dir: PathBuf,
    pub rollback_ddl_dir: PathBuf,
}

impl OutputLayout {
    pub fn from_config(config: &AppConfig, base_dir: &Path) -> Result<Self> {
        if base_dir.as_os_str().is_empty() {
            return Err(ScriptError::MissingOutputDir);
        }
        Ok(Self {
            ddl_dir: config.get_ddl_dir(base_dir),
            rollback_ddl_dir: config.get_rollback_ddl_dir(base_dir),
        })
    }

    /// 创建输出目录（已存在时不报错）
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [&self.ddl_dir, &self.rollback_ddl_dir] {
            fs::create_dir_all(dir).map_err(|source| ScriptError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        info!(
            "输出目录已就绪: {} 和 {}",
            self.ddl_dir.display(),
            self.rollback_ddl_dir.display()
        );
        Ok(())
    }

    pub fn path_for(&self, document: &ScriptDocument) -> PathBuf {
        let dir = match document.kind {
            DocumentKind::PrimaryForward | DocumentKind::MirrorForward => &self.ddl_dir,
            DocumentKind::PrimaryRollback | DocumentKind::MirrorRollback => &self.rollback_ddl_dir,
        };
        dir.join(document.file_name())
    }
}
