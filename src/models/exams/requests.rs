use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::Subject;

// 单个练习定义
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct ExerciseSpec {
    pub number: i32,
    pub subject: Subject,
    pub variants: Vec<String>,
    #[serde(default)]
    pub max_score: Option<f64>,
}

// 创建考试请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct CreateExamRequest {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseSpec>,
}
