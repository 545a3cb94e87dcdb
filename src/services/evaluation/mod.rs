pub mod classes;
pub mod grades;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse,
    accounts::requests::SetAbsentRequest,
    grades::{entities::SubmitMode, requests::GradeSubmission},
};
use crate::storage::Storage;

/// 教师端：班级、缺席、评分
pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn ping(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success("pong".to_string())))
    }

    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        classes::handle_list_classes(self, request).await
    }

    pub async fn list_students(
        &self,
        class_name: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_list_students(self, class_name, request).await
    }

    pub async fn set_absent(
        &self,
        student_id: i64,
        absent: SetAbsentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        classes::handle_set_absent(self, student_id, absent, request).await
    }

    pub async fn submit_grade(
        &self,
        submission: GradeSubmission,
        mode: SubmitMode,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_submit_grade(self, submission, mode, request).await
    }

    pub async fn read_grades(
        &self,
        student: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_read_grades(self, student, request).await
    }

    pub async fn read_exercises(
        &self,
        student: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_read_exercises(self, student, request).await
    }
}
