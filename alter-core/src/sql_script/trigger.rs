use super::types::{PatchedTrigger, TriggerKind, TriggerSource};
use crate::constants::trigger;
use crate::error::{Result, ScriptError};
use regex::Regex;
use tracing::{debug, warn};

/// 审计触发器改写器
///
/// 触发器代码按行处理，不做 SQL 解析：
/// 1. 删除与被删列匹配的整行（`, col` / `col,` / `, old.col` / `new.col,` 等）
/// 2. 在 `BA_IND,` 行后插入列清单，在 `'I',` / `'D',` / `'B',` / `'A',` 行后插入值清单。
///    每条 INSERT 语句各有一个 `BA_IND,`，因此列清单与 `'I',` / `'D',` 在所有匹配行后插入；
///    UPDATE 的 `'B',` / `'A',` 各只改写第一处
/// 3. 从原始代码中提取 `CREATE TRIGGER <name>` 生成 DROP TRIGGER 语句
///
/// 锚点不存在时不插入任何内容，只记录警告。
#[derive(Debug, Clone)]
pub struct TriggerPatcher {
    indent: String,
    column_anchor: Regex,
    insert_anchor: Regex,
    delete_anchor: Regex,
    before_anchor: Regex,
    after_anchor: Regex,
    trigger_name: Regex,
}

/// 锚点改写范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occurrence {
    First,
    Every,
}

/// 值清单列引用前缀
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRef {
    Old,
    New,
}

impl RowRef {
    fn prefix(&self) -> &'static str {
        match self {
            RowRef::Old => "old.",
            RowRef::New => "new.",
        }
    }
}

impl TriggerPatcher {
    pub fn new(indent: impl Into<String>) -> Result<Self> {
        Ok(Self {
            indent: indent.into(),
            column_anchor: anchor_regex(trigger::COLUMN_LIST_ANCHOR)?,
            insert_anchor: anchor_regex(trigger::INSERT_VALUE_ANCHOR)?,
            delete_anchor: anchor_regex(trigger::DELETE_VALUE_ANCHOR)?,
            before_anchor: anchor_regex(trigger::UPDATE_BEFORE_ANCHOR)?,
            after_anchor: anchor_regex(trigger::UPDATE_AFTER_ANCHOR)?,
            trigger_name: compile(r#"(?i)CREATE\s+TRIGGER\s+["']?(\w+)["']?"#)?,
        })
    }

    /// 改写一个触发器，返回改写后的代码与 DROP TRIGGER 语句
    pub fn patch<A: AsRef<str>, D: AsRef<str>>(
        &self,
        source: &TriggerSource,
        table_name: &str,
        cols_to_add: &[A],
        cols_to_drop: &[D],
    ) -> Result<PatchedTrigger> {
        if source.is_blank() {
            return Ok(PatchedTrigger::default());
        }

        let mut lines: Vec<String> = source.text.split('\n').map(str::to_string).collect();

        // 先删后加，避免刚插入的同名列被删掉
        for col in cols_to_drop {
            let col = col.as_ref();
            let pattern = drop_line_regex(col)?;
            let before = lines.len();
            lines.retain(|line| !pattern.is_match(line));
            debug!(
                "{} 触发器删除列 {}: 移除 {} 行",
                source.kind,
                col,
                before - lines.len()
            );
        }

        if !cols_to_add.is_empty() {
            let names: Vec<&str> = cols_to_add.iter().map(|c| c.as_ref()).collect();

            let column_lines: Vec<String> = names
                .iter()
                .map(|c| format!("{0}{0}{1},", self.indent, c))
                .collect();
            insert_after_anchor(
                &mut lines,
                &self.column_anchor,
                Occurrence::Every,
                &column_lines,
                source.kind,
                trigger::COLUMN_LIST_ANCHOR,
            );

            for (anchor, label, row_ref, occurrence) in self.value_anchors(source.kind) {
                let value_lines: Vec<String> = names
                    .iter()
                    .map(|c| format!("{0}{0}{1}{2},", self.indent, row_ref.prefix(), c))
                    .collect();
                insert_after_anchor(
                    &mut lines,
                    anchor,
                    occurrence,
                    &value_lines,
                    source.kind,
                    label,
                );
            }
        }

        Ok(PatchedTrigger {
            body: lines.join("\n"),
            drop_statement: self.drop_statement(&source.text, table_name).unwrap_or_default(),
        })
    }

    /// 从原始触发器代码提取触发器名并生成 DROP TRIGGER 语句
    pub fn drop_statement(&self, code: &str, table_name: &str) -> Option<String> {
        let name = self.trigger_name.captures(code)?.get(1)?.as_str();
        Some(format!("DROP TRIGGER IF EXISTS {name} ON {table_name};"))
    }

    fn value_anchors(
        &self,
        kind: TriggerKind,
    ) -> Vec<(&Regex, &'static str, RowRef, Occurrence)> {
        match kind {
            TriggerKind::Insert => vec![(
                &self.insert_anchor,
                trigger::INSERT_VALUE_ANCHOR,
                RowRef::New,
                Occurrence::Every,
            )],
            TriggerKind::Delete => vec![(
                &self.delete_anchor,
                trigger::DELETE_VALUE_ANCHOR,
                RowRef::Old,
                Occurrence::Every,
            )],
            TriggerKind::Update => vec![
                (
                    &self.before_anchor,
                    trigger::UPDATE_BEFORE_ANCHOR,
                    RowRef::Old,
                    Occurrence::First,
                ),
                (
                    &self.after_anchor,
                    trigger::UPDATE_AFTER_ANCHOR,
                    RowRef::New,
                    Occurrence::First,
                ),
            ],
        }
    }
}

/// 在匹配的锚点行之后插入新行
fn insert_after_anchor(
    lines: &mut Vec<String>,
    anchor: &Regex,
    occurrence: Occurrence,
    new_lines: &[String],
    kind: TriggerKind,
    label: &str,
) {
    let mut matches: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| anchor.is_match(line))
        .map(|(idx, _)| idx)
        .collect();
    if matches.is_empty() {
        warn!("{} 触发器中未找到锚点行 {}，跳过插入", kind, label);
        return;
    }
    if occurrence == Occurrence::First {
        matches.truncate(1);
    }

    // 从后往前插入，前面的行号不受影响
    for &idx in matches.iter().rev() {
        // CRLF 代码中插入的行沿用锚点行的行尾
        let crlf = lines[idx].ends_with('\r');
        let block = new_lines.iter().map(|line| {
            if crlf {
                format!("{line}\r")
            } else {
                line.clone()
            }
        });
        lines.splice(idx + 1..idx + 1, block);
    }
    debug!(
        "{} 触发器在 {} 处锚点 {} 后各插入 {} 行",
        kind,
        matches.len(),
        label,
        new_lines.len()
    );
}

/// 整行匹配的锚点表达式（忽略大小写与首尾空白）
fn anchor_regex(anchor: &str) -> Result<Regex> {
    compile(&format!(r"(?i)^\s*{}\s*$", regex::escape(anchor)))
}

/// 匹配整行仅为被删列引用的表达式
fn drop_line_regex(col: &str) -> Result<Regex> {
    let col = regex::escape(col);
    compile(&format!(
        r"(?i)^\s*(?:,\s*(?:(?:old|new)\.)?{col}|(?:(?:old|new)\.)?{col},?)\s*$"
    ))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ScriptError::custom(format!("正则表达式编译失败: {e}")))
}
