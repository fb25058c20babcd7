use super::types::{ChangeSet, ColumnSpec};
use crate::constants::script;
use tracing::debug;

/// 生成正向变更语句：ADD 块、COMMENT 块、DROP 块（按此顺序，空块省略）
pub fn build_alter_statements(change_set: &ChangeSet) -> Vec<String> {
    let table_name = change_set.table_name();
    let mut parts = Vec::new();

    let add_clauses: Vec<String> = change_set
        .columns_to_add()
        .iter()
        .map(generate_add_clause)
        .collect();
    if let Some(sql) = wrap_alter_table(table_name, &add_clauses) {
        parts.push(sql);
    }

    let comment_sqls: Vec<String> = change_set
        .columns_to_add()
        .iter()
        .filter(|c| !c.comment().is_empty())
        .map(|c| generate_comment_sql(table_name, c))
        .collect();
    if !comment_sqls.is_empty() {
        parts.push(comment_sqls.join("\n"));
    }

    let drop_clauses = generate_drop_clauses(change_set.columns_to_drop());
    if let Some(sql) = wrap_alter_table(table_name, &drop_clauses) {
        parts.push(sql);
    }

    debug!("表 {} 生成 {} 个变更语句块", table_name, parts.len());
    parts
}

/// 生成回滚语句：新增的列被删除，删除的列以占位符形式重新添加
pub fn build_rollback_statements(change_set: &ChangeSet) -> Vec<String> {
    let table_name = change_set.table_name();
    let mut parts = Vec::new();

    let added: Vec<&str> = change_set.added_names();
    let drop_clauses = generate_drop_clauses(&added);
    if let Some(sql) = wrap_alter_table(table_name, &drop_clauses) {
        parts.push(sql);
    }

    // 被删除列的类型与可空性无从得知，只能留给人工补全
    let add_clauses: Vec<String> = change_set
        .columns_to_drop()
        .iter()
        .map(|name| format!("ADD {name} /*<data_type>*/ /*<NULL|NOT NULL>*/"))
        .collect();
    if let Some(sql) = wrap_alter_table(table_name, &add_clauses) {
        parts.push(format!("{}\n{}", script::ROLLBACK_FILL_IN_NOTE, sql));
    }

    debug!("表 {} 生成 {} 个回滚语句块", table_name, parts.len());
    parts
}

/// 生成 ADD 子句
pub fn generate_add_clause(column: &ColumnSpec) -> String {
    format!(
        "ADD {} {} {}",
        column.name(),
        column.full_type(),
        column.nullability()
    )
}

/// 生成列注释语句
pub fn generate_comment_sql(table_name: &str, column: &ColumnSpec) -> String {
    format!(
        "COMMENT ON COLUMN {}.{} IS '{}';",
        table_name,
        column.name(),
        escape_comment(column.comment())
    )
}

/// 注释转义：制表符替换为四个空格，单引号按 SQL 规则双写
pub fn escape_comment(comment: &str) -> String {
    comment
        .replace('\t', script::TAB_REPLACEMENT)
        .replace('\'', "''")
}

fn generate_drop_clauses<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("DROP COLUMN {}", name.as_ref()))
        .collect()
}

/// 把若干子句包进同一条 ALTER TABLE 语句，没有子句时返回 None
fn wrap_alter_table(table_name: &str, clauses: &[String]) -> Option<String> {
    if clauses.is_empty() {
        return None;
    }
    Some(format!("ALTER TABLE {}\n{};", table_name, clauses.join(",\n")))
}
