use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::classes::responses::SkippedEntry;

use super::entities::{Exam, Exercise};

// 创建考试响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct CreateExamResponse {
    pub exam: Exam,
    pub created: Vec<Exercise>,
    pub skipped: Vec<SkippedEntry>,
}
