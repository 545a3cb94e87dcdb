pub mod provision;
pub mod students;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, accounts::requests::CreateTeacherRequest,
    classes::requests::CreateClassRequest, exams::requests::CreateExamRequest,
};
use crate::storage::Storage;

/// 管理端：开通班级、教师、考试，删除学生
pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
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

    pub async fn create_class(
        &self,
        create_request: CreateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        provision::handle_create_class(self, create_request, request).await
    }

    pub async fn create_teacher(
        &self,
        create_request: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        provision::handle_create_teacher(self, create_request, request).await
    }

    pub async fn create_exam(
        &self,
        create_request: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        provision::handle_create_exam(self, create_request, request).await
    }

    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::handle_delete_student(self, student_id, request).await
    }
}
