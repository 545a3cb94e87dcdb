use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::domain::EnrollmentManager;
use crate::models::{ApiResponse, accounts::requests::SetAbsentRequest};
use crate::services::{error_response, require_identity};

use super::EvaluationService;

pub async fn handle_list_classes(
    service: &EvaluationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .classes_for_teacher(&identity.email)
        .await
    {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_list_students(
    service: &EvaluationService,
    class_name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .students_in_class(&class_name)
        .await
    {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(students))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_set_absent(
    service: &EvaluationService,
    student_id: i64,
    absent: SetAbsentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .set_absent(student_id, absent.absent)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty())),
        Err(e) => Ok(error_response(&e)),
    }
}
