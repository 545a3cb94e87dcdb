//! 配置管理
//!
//! 启动时从配置文件与环境变量加载，之后通过 `AppConfig::get()` 全局只读访问。

mod r#impl;
mod structs;

pub use structs::*;
