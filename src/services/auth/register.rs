use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::domain::EnrollmentManager;
use crate::models::{ApiResponse, accounts::requests::CreateTeacherRequest};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    create_request: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 管理员注册入口：强制 is_admin = true
    match EnrollmentManager::from_config(storage)
        .create_teacher(create_request, true)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created))),
        Err(e) => Ok(crate::services::error_response(&e)),
    }
}
