use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::responses::ProvisionedStudent;

use super::entities::Class;

// 批量操作中被跳过的条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct SkippedEntry {
    pub index: usize,
    pub label: String,
    pub reason: String,
}

// 创建班级响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassResponse {
    pub class: Class,
    pub created: Vec<ProvisionedStudent>,
    pub skipped: Vec<SkippedEntry>,
}
