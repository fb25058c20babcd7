//! 表单输入处理
//!
//! 列名、数据类型、长度、可空性、注释都以逗号分隔的形式输入。
//! 属性列表只有 1 项时应用到全部列，有 n 项时与列名一一对应。

use crate::error::{Result, ScriptError};
use crate::sql_script::{ColumnSpec, Nullability};
use tracing::{debug, warn};

/// 一组待展开的逗号分隔输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnDraft {
    pub names: String,
    pub data_types: String,
    pub sizes: String,
    pub nullabilities: String,
    pub comments: String,
}

impl ColumnDraft {
    /// 展开为列定义列表
    pub fn expand(&self) -> Result<Vec<ColumnSpec>> {
        let names: Vec<&str> = self
            .names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            return Err(ScriptError::MissingColumnName { index: 1 });
        }
        if self.data_types.trim().is_empty() {
            return Err(ScriptError::MissingDataType {
                column: names[0].to_string(),
                index: 1,
            });
        }

        let n = names.len();
        let data_types = broadcast(split_attribute(&self.data_types), n, "数据类型")?;
        let sizes = broadcast(split_attribute(&self.sizes), n, "长度")?;
        let nullabilities = broadcast(split_attribute(&self.nullabilities), n, "可空性")?;
        // 注释框里的制表符按四个空格处理
        let comments_text = self.comments.replace('\t', "    ");
        let comments = broadcast(split_attribute(&comments_text), n, "注释")?;

        let mut columns = Vec::with_capacity(n);
        for (i, name) in names.iter().enumerate() {
            let index = i + 1;
            if data_types[i].is_empty() {
                return Err(ScriptError::MissingDataType {
                    column: name.to_string(),
                    index,
                });
            }
            let nullability = parse_nullability(nullabilities[i], name, index)?;
            let column = ColumnSpec::new(*name, data_types[i], sizes[i], nullability, comments[i])
                .map_err(|e| match e {
                    ScriptError::MissingDataType { column, .. } => {
                        ScriptError::MissingDataType { column, index }
                    }
                    other => other,
                })?;
            columns.push(column);
        }

        debug!("展开得到 {} 个列定义", columns.len());
        Ok(columns)
    }
}

/// 解析逗号分隔的删除列清单，空项被忽略
pub fn parse_drop_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// 按逗号拆分，括号内的逗号不拆，例如 "(10,2),(5)"
fn split_attribute(input: &str) -> Vec<&str> {
    let input = input.trim();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(input[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}

fn broadcast<'a>(attrs: Vec<&'a str>, n: usize, attribute: &'static str) -> Result<Vec<&'a str>> {
    match attrs.len() {
        1 => Ok(vec![attrs[0]; n]),
        len if len == n => Ok(attrs),
        actual => Err(ScriptError::ListMismatch {
            attribute,
            expected: n,
            actual,
        }),
    }
}

fn parse_nullability(value: &str, column: &str, index: usize) -> Result<Nullability> {
    value
        .parse::<Nullability>()
        .map_err(|_| ScriptError::InvalidNullability {
            column: column.to_string(),
            index,
            value: value.to_string(),
        })
}

/// 待新增列的有序列表，带可选的 "正在编辑" 行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnList {
    columns: Vec<ColumnSpec>,
    selected: Option<usize>,
}

impl ColumnList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<ColumnSpec> {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 追加展开后的列（不会重置编辑状态）
    pub fn add_draft(&mut self, draft: &ColumnDraft) -> Result<usize> {
        let columns = draft.expand()?;
        let count = columns.len();
        self.columns.extend(columns);
        Ok(count)
    }

    pub fn push(&mut self, column: ColumnSpec) {
        self.columns.push(column);
    }

    pub fn selected(&self) -> Option<&ColumnSpec> {
        self.selected.and_then(|idx| self.columns.get(idx))
    }

    /// 选中某一行进入编辑模式，越界时返回 false
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.columns.len() {
            self.selected = Some(index);
            true
        } else {
            warn!("选择的行 {} 不存在", index);
            false
        }
    }

    pub fn cancel_edit(&mut self) {
        self.selected = None;
    }

    /// 用新的定义替换正在编辑的行，替换后回到新增模式
    pub fn update_selected(&mut self, column: ColumnSpec) -> bool {
        match self.selected.take() {
            Some(idx) if idx < self.columns.len() => {
                self.columns[idx] = column;
                true
            }
            _ => false,
        }
    }

    /// 删除指定行；删除的是正在编辑的行时退出编辑模式
    pub fn remove(&mut self, index: usize) -> Option<ColumnSpec> {
        if index >= self.columns.len() {
            return None;
        }
        let removed = self.columns.remove(index);
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Some(removed)
    }
}
