use crate::constants::vocabulary;
use crate::error::{Result, ScriptError};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// 列可空性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullability {
    #[default]
    Null,
    NotNull,
}

impl Nullability {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Nullability::Null => "NULL",
            Nullability::NotNull => "NOT NULL",
        }
    }
}

impl fmt::Display for Nullability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Nullability {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NULL" => Ok(Nullability::Null),
            "NOT NULL" | "NOT_NULL" => Ok(Nullability::NotNull),
            _ => Err(()),
        }
    }
}

/// 待新增列的定义
///
/// 字段只能通过 [`ColumnSpec::new`] 设置，保证列名与数据类型非空。
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    name: String,
    data_type: String,
    /// 例如 "(10)" 或 "(10,2)"，可以为空
    size: String,
    nullability: Nullability,
    comment: String,
}

impl ColumnSpec {
    /// 创建列定义，列名与数据类型不能为空
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        size: impl Into<String>,
        nullability: Nullability,
        comment: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let data_type = data_type.into().trim().to_string();

        if name.is_empty() {
            return Err(ScriptError::MissingColumnName { index: 1 });
        }
        if data_type.is_empty() {
            return Err(ScriptError::MissingDataType {
                column: name,
                index: 1,
            });
        }
        if !vocabulary::is_known_datatype(&data_type) {
            warn!("列 {} 的数据类型 {} 不在常用类型列表中", name, data_type);
        }

        Ok(Self {
            name,
            data_type,
            size: size.into().trim().to_string(),
            nullability,
            comment: comment.into().trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn nullability(&self) -> Nullability {
        self.nullability
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// 完整类型，例如 numeric(10,2)
    pub fn full_type(&self) -> String {
        format!("{}{}", self.data_type, self.size)
    }
}

/// 一次表结构变更请求
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    table_name: String,
    columns_to_add: Vec<ColumnSpec>,
    columns_to_drop: Vec<String>,
}

impl ChangeSet {
    /// 创建变更集，表名会被去除首尾空白并转为大写
    pub fn new(
        table_name: &str,
        columns_to_add: Vec<ColumnSpec>,
        columns_to_drop: Vec<String>,
    ) -> Result<Self> {
        let table_name = table_name.trim().to_uppercase();
        if table_name.is_empty() {
            return Err(ScriptError::MissingTableName);
        }

        let columns_to_drop: Vec<String> = columns_to_drop
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        let dropped: HashSet<String> = columns_to_drop.iter().map(|c| c.to_uppercase()).collect();
        for column in &columns_to_add {
            if dropped.contains(&column.name.to_uppercase()) {
                warn!(
                    "列 {} 同时出现在新增与删除列表中，将按先删除后新增处理",
                    column.name
                );
            }
        }

        Ok(Self {
            table_name,
            columns_to_add,
            columns_to_drop,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns_to_add(&self) -> &[ColumnSpec] {
        &self.columns_to_add
    }

    pub fn columns_to_drop(&self) -> &[String] {
        &self.columns_to_drop
    }

    /// 新增列的列名（按新增顺序）
    pub fn added_names(&self) -> Vec<&str> {
        self.columns_to_add.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns_to_add.is_empty() && self.columns_to_drop.is_empty()
    }

    /// 派生镜像表 (J 表) 的变更集，列变更完全相同
    pub fn mirror(&self, prefix: &str) -> ChangeSet {
        ChangeSet {
            table_name: format!("{}{}", prefix, self.table_name),
            columns_to_add: self.columns_to_add.clone(),
            columns_to_drop: self.columns_to_drop.clone(),
        }
    }
}

/// 触发器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Insert,
    Update,
    Delete,
}

impl TriggerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::Insert => "TJI",
            TriggerKind::Update => "TJU",
            TriggerKind::Delete => "TJD",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 原始触发器代码
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSource {
    pub kind: TriggerKind,
    pub text: String,
}

impl TriggerSource {
    pub fn new(kind: TriggerKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn empty(kind: TriggerKind) -> Self {
        Self::new(kind, String::new())
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// 三个触发器（插入、更新、删除），每个都可以为空
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerSet {
    pub insert: TriggerSource,
    pub update: TriggerSource,
    pub delete: TriggerSource,
}

impl Default for TriggerSet {
    fn default() -> Self {
        Self {
            insert: TriggerSource::empty(TriggerKind::Insert),
            update: TriggerSource::empty(TriggerKind::Update),
            delete: TriggerSource::empty(TriggerKind::Delete),
        }
    }
}

impl TriggerSet {
    pub fn new(insert: Option<String>, update: Option<String>, delete: Option<String>) -> Self {
        Self {
            insert: TriggerSource::new(TriggerKind::Insert, insert.unwrap_or_default()),
            update: TriggerSource::new(TriggerKind::Update, update.unwrap_or_default()),
            delete: TriggerSource::new(TriggerKind::Delete, delete.unwrap_or_default()),
        }
    }

    /// 按 插入、更新、删除 的顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &TriggerSource> {
        [&self.insert, &self.update, &self.delete].into_iter()
    }
}

/// 改写后的触发器以及对应的 DROP TRIGGER 语句
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatchedTrigger {
    pub body: String,
    pub drop_statement: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullability_parse() {
        assert_eq!("null".parse::<Nullability>(), Ok(Nullability::Null));
        assert_eq!(" not null ".parse::<Nullability>(), Ok(Nullability::NotNull));
        assert_eq!("NOT_NULL".parse::<Nullability>(), Ok(Nullability::NotNull));
        assert!("NOTNULL".parse::<Nullability>().is_err());
        assert_eq!(Nullability::NotNull.to_string(), "NOT NULL");
    }

    #[test]
    fn test_column_spec_requires_name_and_type() {
        assert!(matches!(
            ColumnSpec::new(" ", "varchar", "", Nullability::Null, ""),
            Err(ScriptError::MissingColumnName { .. })
        ));
        assert!(matches!(
            ColumnSpec::new("COL_A", "", "", Nullability::Null, ""),
            Err(ScriptError::MissingDataType { .. })
        ));

        let column =
            ColumnSpec::new(" SALARY ", "numeric", "(10,2)", Nullability::NotNull, " pay ").unwrap();
        assert_eq!(column.name(), "SALARY");
        assert_eq!(column.size(), "(10,2)");
        assert_eq!(column.comment(), "pay");
        assert_eq!(column.full_type(), "numeric(10,2)");
    }

    #[test]
    fn test_change_set_table_name() {
        assert!(matches!(
            ChangeSet::new("  ", vec![], vec![]),
            Err(ScriptError::MissingTableName)
        ));

        let change_set = ChangeSet::new(" emp ", vec![], vec![" A ".into(), "".into()]).unwrap();
        assert_eq!(change_set.table_name(), "EMP");
        assert_eq!(change_set.columns_to_drop(), ["A".to_string()]);

        let mirror = change_set.mirror("J_");
        assert_eq!(mirror.table_name(), "J_EMP");
        assert_eq!(mirror.columns_to_drop(), change_set.columns_to_drop());
    }
}
