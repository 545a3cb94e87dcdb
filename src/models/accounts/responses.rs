use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Student, Teacher};

// 新建教师及其一次性密码
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct CreateTeacherResponse {
    pub teacher: Teacher,
    pub password: String,
}

// 新建学生及其一次性密码
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct ProvisionedStudent {
    pub student: Student,
    pub password: String,
}
