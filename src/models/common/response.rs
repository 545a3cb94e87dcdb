use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::EvaluareError;

// 响应状态码
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "api.ts")]
pub enum ReturnCode {
    Successful,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    InternalIssue,
}

impl ReturnCode {
    /// 由 HTTP 状态码推导
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            200..=299 => ReturnCode::Successful,
            400 => ReturnCode::BadRequest,
            401 => ReturnCode::Unauthorized,
            403 => ReturnCode::Forbidden,
            404 => ReturnCode::NotFound,
            409 => ReturnCode::Conflict,
            _ => ReturnCode::InternalIssue,
        }
    }
}

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub data: Option<T>,
    pub error: String,
    pub code: ReturnCode,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: String::new(),
            code: ReturnCode::Successful,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty() -> Self {
        Self {
            data: None,
            error: String::new(),
            code: ReturnCode::Successful,
        }
    }

    pub fn error_empty(code: ReturnCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: message.into(),
            code,
        }
    }

    /// 将核心层错误转换为响应信封
    pub fn from_error(err: &EvaluareError) -> Self {
        Self::error_empty(
            ReturnCode::from_status(err.status_code()),
            err.message().to_string(),
        )
    }
}
