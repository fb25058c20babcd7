use super::generator::{build_alter_statements, build_rollback_statements};
use super::trigger::TriggerPatcher;
use super::types::{ChangeSet, PatchedTrigger, TriggerSet};
use super::writer::{OutputLayout, ScriptSink};
use crate::config::AppConfig;
use crate::constants::{output, script};
use crate::error::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 一次生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub change_set: ChangeSet,
    pub triggers: TriggerSet,
    /// 是否同时修改镜像表 (J 表)
    pub mirror: bool,
}

/// 输出文件种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PrimaryForward,
    PrimaryRollback,
    MirrorForward,
    MirrorRollback,
}

impl DocumentKind {
    pub fn is_rollback(&self) -> bool {
        matches!(self, DocumentKind::PrimaryRollback | DocumentKind::MirrorRollback)
    }
}

/// 一个输出文件的内容
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptDocument {
    pub kind: DocumentKind,
    pub table_name: String,
    pub content: String,
}

impl ScriptDocument {
    pub fn file_name(&self) -> String {
        if self.kind.is_rollback() {
            format!(
                "{}{}.{}",
                self.table_name,
                output::ROLLBACK_SUFFIX,
                output::SQL_EXTENSION
            )
        } else {
            format!("{}.{}", self.table_name, output::SQL_EXTENSION)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.content == script::EMPTY_FILE_PLACEHOLDER
    }
}

/// 四个输出文件：主表正向、主表回滚、镜像表正向、镜像表回滚
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptBundle {
    pub primary_forward: ScriptDocument,
    pub primary_rollback: ScriptDocument,
    pub mirror_forward: ScriptDocument,
    pub mirror_rollback: ScriptDocument,
}

impl ScriptBundle {
    /// 按固定顺序遍历
    pub fn documents(&self) -> [&ScriptDocument; 4] {
        [
            &self.primary_forward,
            &self.primary_rollback,
            &self.mirror_forward,
            &self.mirror_rollback,
        ]
    }

    /// 逐个写入，遇到第一个错误立即中止（已写入的文件不会回退）
    pub fn write_to(&self, sink: &mut dyn ScriptSink, layout: &OutputLayout) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for document in self.documents() {
            let path = layout.path_for(document);
            sink.write_script(&path, &document.content)?;
            debug!("写入 {:?}: {}", document.kind, path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// 脚本组装器
#[derive(Debug, Clone)]
pub struct ScriptAssembler {
    patcher: TriggerPatcher,
    mirror_prefix: String,
}

impl ScriptAssembler {
    pub fn new(patcher: TriggerPatcher, mirror_prefix: impl Into<String>) -> Self {
        Self {
            patcher,
            mirror_prefix: mirror_prefix.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            TriggerPatcher::new(config.trigger.indent.clone())?,
            config.mirror.prefix.clone(),
        ))
    }

    pub fn assemble(&self, request: &GenerationRequest) -> Result<ScriptBundle> {
        let change_set = &request.change_set;
        let table_name = change_set.table_name();
        let added = change_set.added_names();
        let dropped = change_set.columns_to_drop();

        info!(
            "开始生成表 {} 的变更脚本: 新增 {} 列, 删除 {} 列",
            table_name,
            added.len(),
            dropped.len()
        );
        if change_set.is_empty() {
            warn!("表 {} 没有任何列变更，只会输出触发器与占位内容", table_name);
        }

        let patched: Vec<PatchedTrigger> = request
            .triggers
            .iter()
            .map(|source| self.patcher.patch(source, table_name, &added, dropped))
            .collect::<Result<_>>()?;

        // 正向：变更语句 + (DROP TRIGGER, 改写后的触发器) x 3
        let mut forward_parts = build_alter_statements(change_set);
        for trigger in &patched {
            forward_parts.push(trigger.drop_statement.clone());
            forward_parts.push(trigger.body.clone());
        }

        // 回滚：回滚语句 + 原始触发器
        let mut rollback_parts = build_rollback_statements(change_set);
        rollback_parts.extend(request.triggers.iter().map(|t| t.text.clone()));

        let mirror = change_set.mirror(&self.mirror_prefix);
        let (mirror_forward_parts, mirror_rollback_parts) = if request.mirror {
            info!("同时生成镜像表 {} 的变更脚本", mirror.table_name());
            (
                build_alter_statements(&mirror),
                build_rollback_statements(&mirror),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(ScriptBundle {
            primary_forward: document(DocumentKind::PrimaryForward, table_name, &forward_parts),
            primary_rollback: document(DocumentKind::PrimaryRollback, table_name, &rollback_parts),
            mirror_forward: document(
                DocumentKind::MirrorForward,
                mirror.table_name(),
                &mirror_forward_parts,
            ),
            mirror_rollback: document(
                DocumentKind::MirrorRollback,
                mirror.table_name(),
                &mirror_rollback_parts,
            ),
        })
    }
}

/// 过滤空片段后用空行拼接，全部为空时写入占位注释
pub fn render_document(parts: &[String]) -> String {
    let non_empty: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .filter(|part| !part.trim().is_empty())
        .collect();

    if non_empty.is_empty() {
        script::EMPTY_FILE_PLACEHOLDER.to_string()
    } else {
        non_empty.join(script::PART_SEPARATOR)
    }
}

fn document(kind: DocumentKind, table_name: &str, parts: &[String]) -> ScriptDocument {
    ScriptDocument {
        kind,
        table_name: table_name.to_string(),
        content: render_document(parts),
    }
}
