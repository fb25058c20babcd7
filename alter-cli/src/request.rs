//! 请求文件
//!
//! ```toml
//! table = "EMP"
//! drop = ["OLD_COL"]
//! mirror = true
//!
//! [[columns]]
//! name = "SALARY"
//! data_type = "numeric"
//! size = "(10,2)"
//! nullability = "NOT NULL"
//! comment = "monthly pay"
//!
//! [triggers]
//! insert_file = "tji_emp.sql"
//! update = """CREATE TRIGGER ..."""
//! ```

use alter_core::ScriptError;
use alter_core::input::parse_drop_list;
use alter_core::sql_script::{ColumnSpec, Nullability, TriggerSet};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    pub table: Option<String>,
    pub output: Option<PathBuf>,
    pub mirror: Option<bool>,
    #[serde(default)]
    pub columns: Vec<ColumnEntry>,
    #[serde(default)]
    pub drop: DropList,
    #[serde(default)]
    pub triggers: TriggerEntries,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnEntry {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub size: String,
    #[serde(default = "default_nullability")]
    pub nullability: String,
    #[serde(default)]
    pub comment: String,
}

/// 删除列既可以写成数组，也可以写成逗号分隔的字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DropList {
    List(Vec<String>),
    Csv(String),
}

impl Default for DropList {
    fn default() -> Self {
        DropList::List(Vec::new())
    }
}

impl DropList {
    pub fn names(&self) -> Vec<String> {
        match self {
            DropList::List(names) => names
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
            DropList::Csv(csv) => parse_drop_list(csv),
        }
    }
}

/// 触发器代码：内联文本或文件路径（相对于请求文件所在目录）
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TriggerEntries {
    pub insert: Option<String>,
    pub insert_file: Option<PathBuf>,
    pub update: Option<String>,
    pub update_file: Option<PathBuf>,
    pub delete: Option<String>,
    pub delete_file: Option<PathBuf>,
}

fn default_nullability() -> String {
    Nullability::Null.to_string()
}

impl RequestFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取请求文件 {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("请求文件格式错误 {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let request = toml::from_str(content)
            .map_err(|e| ScriptError::invalid_request(e.to_string()))?;
        Ok(request)
    }

    /// 校验并转换列定义
    pub fn column_specs(&self) -> Result<Vec<ColumnSpec>> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for (i, entry) in self.columns.iter().enumerate() {
            let index = i + 1;
            let nullability = entry.nullability.parse::<Nullability>().map_err(|_| {
                ScriptError::InvalidNullability {
                    column: entry.name.clone(),
                    index,
                    value: entry.nullability.clone(),
                }
            })?;
            let column = ColumnSpec::new(
                entry.name.as_str(),
                entry.data_type.as_str(),
                entry.size.as_str(),
                nullability,
                entry.comment.as_str(),
            )
            .map_err(|e| match e {
                ScriptError::MissingColumnName { .. } => ScriptError::MissingColumnName { index },
                ScriptError::MissingDataType { column, .. } => {
                    ScriptError::MissingDataType { column, index }
                }
                other => other,
            })?;
            columns.push(column);
        }
        Ok(columns)
    }

    /// 读取触发器代码
    pub fn trigger_set(&self, base_dir: &Path) -> Result<TriggerSet> {
        let t = &self.triggers;
        Ok(TriggerSet::new(
            resolve_trigger(t.insert.as_deref(), t.insert_file.as_deref(), base_dir)?,
            resolve_trigger(t.update.as_deref(), t.update_file.as_deref(), base_dir)?,
            resolve_trigger(t.delete.as_deref(), t.delete_file.as_deref(), base_dir)?,
        ))
    }
}

fn resolve_trigger(
    inline: Option<&str>,
    file: Option<&Path>,
    base_dir: &Path,
) -> Result<Option<String>> {
    match (inline, file) {
        (Some(_), Some(file)) => Err(ScriptError::invalid_request(format!(
            "触发器不能同时指定内联代码和文件 {}",
            file.display()
        ))
        .into()),
        (Some(text), None) => Ok(Some(text.to_string())),
        (None, Some(file)) => read_trigger_file(&base_dir.join(file)).map(Some),
        (None, None) => Ok(None),
    }
}

/// 读取触发器代码文件
pub fn read_trigger_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("无法读取触发器文件 {}", path.display()))
}
