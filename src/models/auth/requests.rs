use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 登录请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}
