use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::{
    accounts::requests::CreateTeacherRequest, classes::requests::CreateClassRequest,
    exams::requests::CreateExamRequest,
};
use crate::services::AdminService;

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn ping() -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.ping().await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .create_class(class_data.into_inner(), &req)
        .await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .create_teacher(teacher_data.into_inner(), &req)
        .await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_exam(exam_data.into_inner(), &req).await
}

pub async fn delete_student(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.delete_student(path.into_inner(), &req).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireRole::admin())
            .wrap(middlewares::RequireJWT)
            .route("/ping", web::get().to(ping))
            .route("/classes", web::post().to(create_class))
            .route("/teachers", web::post().to(create_teacher))
            .route("/exams", web::post().to(create_exam))
            .route("/students/{id}", web::delete().to(delete_student)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{memory_storage, seed_teacher};
    use crate::models::accounts::entities::{Subject, Teacher};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    fn bearer(teacher: &Teacher) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(
            teacher.id(),
            &teacher.account.email,
            &teacher.account.username,
        )
        .unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_non_admin_is_forbidden() {
        let storage = memory_storage().await;
        let profesor = seed_teacher(&storage, "mate@school.ro", Subject::Math, false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_admin_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/ping")
            .insert_header(bearer(&profesor))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_create_class_reports_skipped_pupils() {
        let storage = memory_storage().await;
        let admin = seed_teacher(&storage, "admin@school.ro", Subject::Math, true).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_admin_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/classes")
            .insert_header(bearer(&admin))
            .set_json(json!({
                "name": "11B",
                "slots": { "math": admin.id() },
                "students": [
                    { "name": "Ana", "surname": "Pop", "email": "ana@school.ro" },
                    { "name": "Dan", "surname": "Ene", "email": "not-an-email" }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["class"]["name"], "11B");
        assert_eq!(body["data"]["created"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["skipped"][0]["index"], 1);

        // 同名班级再次创建
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/classes")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "11B" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_pupil_missing_field_does_not_reject_batch() {
        let storage = memory_storage().await;
        let admin = seed_teacher(&storage, "admin@school.ro", Subject::Math, true).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_admin_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/admin/classes")
            .insert_header(bearer(&admin))
            .set_json(json!({
                "name": "10A",
                "slots": { "math": admin.id() },
                "students": [
                    { "name": "Ana", "surname": "Pop", "email": "ana@school.ro" },
                    { "name": "Ion", "surname": "Ionescu", "email": "ion@school.ro" },
                    { "name": "Maria", "surname": "Rusu" },
                    { "name": "Dan", "surname": "Vlad", "email": "dan@school.ro" },
                    { "name": "Ioana", "surname": "Stan", "email": "ioana@school.ro" }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["created"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"]["skipped"][0]["index"], 2);

        let students = storage.list_students_by_class("10A").await.unwrap();
        assert_eq!(students.len(), 4);
    }

    #[actix_web::test]
    async fn test_delete_unknown_student() {
        let storage = memory_storage().await;
        let admin = seed_teacher(&storage, "admin@school.ro", Subject::Math, true).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_admin_routes),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/v1/admin/students/4242")
            .insert_header(bearer(&admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
