use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::requests::PupilEntry;

use super::entities::SubjectSlots;

// 创建班级请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    #[serde(default)]
    pub slots: SubjectSlots,
    #[serde(default)]
    pub students: Vec<PupilEntry>,
}
