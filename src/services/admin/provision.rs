use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::domain::EnrollmentManager;
use crate::models::{
    ApiResponse, accounts::requests::CreateTeacherRequest,
    classes::requests::CreateClassRequest, exams::requests::CreateExamRequest,
};
use crate::services::error_response;

use super::AdminService;

pub async fn handle_create_class(
    service: &AdminService,
    create_request: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .create_class(create_request)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_create_teacher(
    service: &AdminService,
    create_request: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .create_teacher(create_request, false)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_create_exam(
    service: &AdminService,
    create_request: CreateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match EnrollmentManager::from_config(storage)
        .create_exam(create_request)
        .await
    {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created))),
        Err(e) => Ok(error_response(&e)),
    }
}
