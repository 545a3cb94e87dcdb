use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct GradeSubmission {
    pub student_id: i64,
    pub exam: String,
    pub exercise: i32,
    pub variant: String,
    // 由服务端根据令牌身份覆盖
    #[serde(default)]
    pub teacher_id: Option<i64>,
}

// ?student= 查询参数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "grade.ts")]
pub struct StudentQuery {
    #[serde(default)]
    pub student: String,
}
