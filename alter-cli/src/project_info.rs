/// Alter CLI 项目信息模块
///
/// alter-cli 是面向用户的主程序，项目元数据统一在这里定义
/// alter-core 作为内部库，只提供技术性常量

/// 项目元数据（自动从 alter-cli 的 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称
    pub mod display {
        /// CLI 工具的完整名称
        pub const CLI_FULL_NAME: &str = "Alter Gen CLI";

        /// 项目详细描述
        pub const DESCRIPTION_LONG: &str = "根据新增/删除列生成 GaussDB ALTER TABLE 脚本、回滚脚本，并同步改写审计触发器 (TJI/TJU/TJD) 中的列清单与值清单";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}
