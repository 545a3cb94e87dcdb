use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分记录，(student_id, exam, exercise_number) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct Grade {
    pub student_id: i64,
    pub exam: String,
    pub exercise_number: i32,
    pub teacher_id: i64,
    pub variant: String,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 提交方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

/// 待写入的评分，教师 ID 已由引擎确定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecord {
    pub student_id: i64,
    pub exam: String,
    pub exercise_number: i32,
    pub teacher_id: i64,
    pub variant: String,
}
