use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::domain::EnrollmentManager;
use crate::models::ApiResponse;
use crate::services::error_response;

use super::AdminService;

pub async fn handle_delete_student(
    service: &AdminService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .delete_student(student_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty())),
        Err(e) => Ok(error_response(&e)),
    }
}
