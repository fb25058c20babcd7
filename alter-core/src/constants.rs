/// 数据类型与可空性词汇表
pub mod vocabulary {
    /// 常用的 GaussDB 数据类型
    pub const GAUSSDB_DATATYPES: &[&str] = &[
        "nvarchar2",
        "varchar",
        "char",
        "text",
        "clob",
        "numeric",
        "decimal",
        "integer",
        "bigint",
        "smallint",
        "real",
        "double precision",
        "boolean",
        "date",
        "time",
        "timestamp",
        "datea",
    ];

    /// 可空性选项
    pub const NULLABILITY_OPTIONS: &[&str] = &["NULL", "NOT NULL"];

    /// 数据类型是否在词汇表内（忽略大小写）
    pub fn is_known_datatype(data_type: &str) -> bool {
        GAUSSDB_DATATYPES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(data_type.trim()))
    }
}

/// 触发器锚点常量
pub mod trigger {
    /// 列清单锚点（三种触发器共用）
    pub const COLUMN_LIST_ANCHOR: &str = "BA_IND,";

    /// INSERT 触发器的值清单锚点
    pub const INSERT_VALUE_ANCHOR: &str = "'I',";

    /// DELETE 触发器的值清单锚点
    pub const DELETE_VALUE_ANCHOR: &str = "'D',";

    /// UPDATE 触发器 "更新前" 值清单锚点
    pub const UPDATE_BEFORE_ANCHOR: &str = "'B',";

    /// UPDATE 触发器 "更新后" 值清单锚点
    pub const UPDATE_AFTER_ANCHOR: &str = "'A',";

    /// 默认缩进单位
    pub const DEFAULT_INDENT: &str = "    ";
}

/// 生成脚本相关常量
pub mod script {
    /// 文件没有任何内容时写入的占位行
    pub const EMPTY_FILE_PLACEHOLDER: &str = "-- No SQL content generated for this file. --";

    /// 回滚脚本中占位 ADD 子句前的提示
    pub const ROLLBACK_FILL_IN_NOTE: &str =
        "-- NOTE: You must fill in the <data_type> and <nullability> for these columns.";

    /// 脚本片段之间的分隔符
    pub const PART_SEPARATOR: &str = "\n\n";

    /// 注释中的制表符替换
    pub const TAB_REPLACEMENT: &str = "    ";
}

/// 输出目录相关常量
pub mod output {
    /// 默认的发布目录（相对于输出项目目录）
    pub const DEFAULT_RELEASE_DIR: &str = "pics3_database/deployment/next_sit_release";

    /// DDL 目录名
    pub const DDL_DIR_NAME: &str = "ddl";

    /// 回滚目录名
    pub const ROLLBACK_DIR_NAME: &str = "rollback";

    /// 回滚文件后缀
    pub const ROLLBACK_SUFFIX: &str = "_rollback";

    /// SQL 文件扩展名
    pub const SQL_EXTENSION: &str = "sql";
}

/// 镜像表 (J 表) 相关常量
pub mod mirror {
    /// 默认镜像表前缀
    pub const DEFAULT_PREFIX: &str = "J_";
}

/// 配置文件相关常量
pub mod config {
    use std::path::PathBuf;

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "alter-gen.toml";

    /// 按优先级查找的配置文件
    pub const CONFIG_FILE_CANDIDATES: &[&str] = &["alter-gen.toml", ".alter-gen.toml"];

    /// 获取默认配置文件路径
    pub fn get_config_file_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }
}
