use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::requests::SetAbsentRequest;
use crate::models::grades::{
    entities::SubmitMode,
    requests::{GradeSubmission, StudentQuery},
};
use crate::services::EvaluationService;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

pub async fn ping() -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.ping().await
}

pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.list_classes(&req).await
}

pub async fn list_students(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_students(path.into_inner(), &req)
        .await
}

pub async fn set_absent(
    req: HttpRequest,
    path: web::Path<i64>,
    absent_data: web::Json<SetAbsentRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .set_absent(path.into_inner(), absent_data.into_inner(), &req)
        .await
}

pub async fn create_grade(
    req: HttpRequest,
    grade_data: web::Json<GradeSubmission>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_grade(grade_data.into_inner(), SubmitMode::Create, &req)
        .await
}

pub async fn update_grade(
    req: HttpRequest,
    grade_data: web::Json<GradeSubmission>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .submit_grade(grade_data.into_inner(), SubmitMode::Update, &req)
        .await
}

pub async fn read_grades(
    req: HttpRequest,
    query: web::Query<StudentQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .read_grades(query.into_inner().student, &req)
        .await
}

pub async fn read_exercises(
    req: HttpRequest,
    query: web::Query<StudentQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .read_exercises(query.into_inner().student, &req)
        .await
}

// 配置路由
pub fn configure_evaluation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluation")
            .wrap(middlewares::RequireRole::profesor())
            .wrap(middlewares::RequireJWT)
            .route("/ping", web::get().to(ping))
            .route("/classes", web::get().to(list_classes))
            .route("/classes/{name}/students", web::get().to(list_students))
            .route("/students/{id}/absent", web::put().to(set_absent))
            .route("/grades", web::post().to(create_grade))
            .route("/grades", web::put().to(update_grade))
            .route("/grades", web::get().to(read_grades))
            .route("/exercises", web::get().to(read_exercises)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::scenario_10a;
    use crate::models::accounts::entities::Teacher;
    use crate::utils::{json_error_handler, jwt::JwtUtils};
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

    macro_rules! evaluation_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone()))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .configure(configure_evaluation_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_token_is_rejected() {
        let scenario = scenario_10a().await;
        let app = evaluation_app!(scenario.storage);

        let req = test::TestRequest::get()
            .uri("/api/v1/evaluation/ping")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_classes_follow_slots() {
        let scenario = scenario_10a().await;
        let app = evaluation_app!(scenario.storage);

        let req = test::TestRequest::get()
            .uri("/api/v1/evaluation/classes")
            .insert_header(bearer(&scenario.math))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!(["10A"]));
        assert_eq!(body["code"], "successful");

        let req = test::TestRequest::get()
            .uri("/api/v1/evaluation/classes")
            .insert_header(bearer(&scenario.outsider))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn test_grade_create_conflict_and_update() {
        let scenario = scenario_10a().await;
        let app = evaluation_app!(scenario.storage);
        let student_id = scenario.student.id();

        let req = test::TestRequest::post()
            .uri("/api/v1/evaluation/grades")
            .insert_header(bearer(&scenario.math))
            .set_json(json!({
                "student_id": student_id,
                "exam": "Evaluare1",
                "exercise": 1,
                "variant": "A"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/evaluation/grades")
            .insert_header(bearer(&scenario.math))
            .set_json(json!({
                "student_id": student_id,
                "exam": "Evaluare1",
                "exercise": 1,
                "variant": "B"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::put()
            .uri("/api/v1/evaluation/grades")
            .insert_header(bearer(&scenario.math))
            .set_json(json!({
                "student_id": student_id,
                "exam": "Evaluare1",
                "exercise": 1,
                "variant": "C"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri("/api/v1/evaluation/grades")
            .insert_header(bearer(&scenario.math))
            .set_json(json!({
                "student_id": student_id,
                "exam": "Evaluare1",
                "exercise": 1,
                "variant": "B"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/evaluation/grades?student={student_id}"))
            .insert_header(bearer(&scenario.math))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let grades = body["data"].as_array().unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0]["variant"], "B");
    }

    #[actix_web::test]
    async fn test_outsider_cannot_grade() {
        let scenario = scenario_10a().await;
        let app = evaluation_app!(scenario.storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/evaluation/grades")
            .insert_header(bearer(&scenario.outsider))
            .set_json(json!({
                "student_id": scenario.student.id(),
                "exam": "Evaluare1",
                "exercise": 1,
                "variant": "A"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let scenario = scenario_10a().await;
        let app = evaluation_app!(scenario.storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/evaluation/grades")
            .insert_header(bearer(&scenario.math))
            .set_json(json!({ "exam": "Evaluare1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_exercises_for_teacher_subject() {
        let scenario = scenario_10a().await;
        let app = evaluation_app!(scenario.storage);

        let req = test::TestRequest::get()
            .uri(&format!(
                "/api/v1/evaluation/exercises?student={}",
                scenario.student.id()
            ))
            .insert_header(bearer(&scenario.math))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let exercises = body["data"].as_array().unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0]["number"], 1);
        assert_eq!(exercises[0]["variants"], json!(["A", "B"]));
    }
}
