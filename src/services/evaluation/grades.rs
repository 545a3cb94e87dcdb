use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::domain::GradeEngine;
use crate::models::{
    ApiResponse,
    grades::{entities::SubmitMode, requests::GradeSubmission},
};
use crate::services::{error_response, require_identity};

use super::EvaluationService;

pub async fn handle_submit_grade(
    service: &EvaluationService,
    submission: GradeSubmission,
    mode: SubmitMode,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request)?;

    match GradeEngine::new(storage)
        .submit_grade(&identity.email, submission, mode)
        .await
    {
        Ok(grade) => {
            let response = match mode {
                SubmitMode::Create => HttpResponse::Created().json(ApiResponse::success(grade)),
                SubmitMode::Update => HttpResponse::Ok().json(ApiResponse::success(grade)),
            };
            Ok(response)
        }
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_read_grades(
    service: &EvaluationService,
    student: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request)?;

    match GradeEngine::new(storage)
        .read_grades(&identity.email, &student)
        .await
    {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(grades))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn handle_read_exercises(
    service: &EvaluationService,
    student: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request)?;

    match GradeEngine::new(storage)
        .read_assigned_exercises(&identity.email, &student)
        .await
    {
        Ok(exercises) => Ok(HttpResponse::Ok().json(ApiResponse::success(exercises))),
        Err(e) => Ok(error_response(&e)),
    }
}
