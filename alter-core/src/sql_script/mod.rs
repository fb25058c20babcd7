mod assembler;
mod generator;
mod trigger;
mod types;
mod writer;


use crate::config::AppConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

// 重新导出公共接口
pub use assembler::{
    DocumentKind, GenerationRequest, ScriptAssembler, ScriptBundle, ScriptDocument,
    render_document,
};
pub use generator::{build_alter_statements, build_rollback_statements, escape_comment};
pub use trigger::TriggerPatcher;
pub use types::{
    ChangeSet, ColumnSpec, Nullability, PatchedTrigger, TriggerKind, TriggerSet, TriggerSource,
};
pub use writer::{FsScriptSink, MemoryScriptSink, OutputLayout, ScriptSink};

/// 生成并写出四个脚本文件
///
/// 先准备输出目录，再依次写入；任何一步失败都会中止后续写入。
pub fn generate_scripts(
    request: &GenerationRequest,
    config: &AppConfig,
    base_dir: &Path,
    sink: &mut dyn ScriptSink,
) -> Result<Vec<PathBuf>> {
    let layout = OutputLayout::from_config(config, base_dir)?;
    let bundle = ScriptAssembler::from_config(config)?.assemble(request)?;

    layout.create_dirs()?;
    let written = bundle.write_to(sink, &layout)?;
    for path in &written {
        info!("   ✅ 已生成: {}", path.display());
    }

    info!(
        "成功生成 {} 个文件到: {} 和 {}",
        written.len(),
        layout.ddl_dir.display(),
        layout.rollback_ddl_dir.display()
    );
    Ok(written)
}
