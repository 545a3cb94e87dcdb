use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::Subject;

// 考试
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct Exam {
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 练习，变体保持提交时的顺序
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "exam.ts")]
pub struct Exercise {
    pub exam: String,
    pub number: i32,
    pub subject: Subject,
    pub variants: Vec<String>,
    pub max_score: Option<f64>,
}

impl Exercise {
    pub fn allows(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }
}
