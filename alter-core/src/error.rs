use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScriptError>;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("请输入表名")]
    MissingTableName,

    #[error("第 {index} 项缺少列名")]
    MissingColumnName { index: usize },

    #[error("列 '{column}' (第 {index} 项) 缺少数据类型")]
    MissingDataType { column: String, index: usize },

    #[error("列 '{column}' (第 {index} 项) 的可空性必须是 'NULL' 或 'NOT NULL'，实际为 '{value}'")]
    InvalidNullability {
        column: String,
        index: usize,
        value: String,
    },

    #[error(
        "列表数量不匹配: 提供了 {expected} 个列名，但 {attribute} 有 {actual} 项。属性列表必须只有 1 项（应用到全部列）或 {expected} 项（一一对应）"
    )]
    ListMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("请指定输出项目目录")]
    MissingOutputDir,

    #[error("请求文件无效: {0}")]
    InvalidRequest(String),

    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("无法写入文件 {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("无法创建目录 {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("自定义错误: {0}")]
    Custom(String),
}

impl ScriptError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// 校验类错误：在写入任何文件之前就会被抛出
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingTableName
                | Self::MissingColumnName { .. }
                | Self::MissingDataType { .. }
                | Self::InvalidNullability { .. }
                | Self::ListMismatch { .. }
                | Self::MissingOutputDir
                | Self::InvalidRequest(_)
        )
    }
}
