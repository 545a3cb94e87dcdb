pub mod admin;
pub mod auth;
pub mod evaluation;

pub use admin::AdminService;
pub use auth::AuthService;
pub use evaluation::EvaluationService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::errors::EvaluareError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ReturnCode, auth::AuthIdentity};
use crate::storage::Storage;

/// 从 app_data 中取出共享存储
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 将核心层错误转换为带状态码的响应信封
pub(crate) fn error_response(err: &EvaluareError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    HttpResponse::build(status).json(ApiResponse::from_error(err))
}

/// 读取 RequireJWT 写入的身份
pub(crate) fn require_identity(request: &HttpRequest) -> Result<AuthIdentity, HttpResponse> {
    RequireJWT::extract_identity(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ReturnCode::Unauthorized,
            "Authentication required",
        ))
    })
}
