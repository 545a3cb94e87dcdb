use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::requests::CreateTeacherRequest;
use crate::models::auth::TokenRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn issue_token(
    req: HttpRequest,
    token_data: web::Json<TokenRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.issue_token(token_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(teacher_data.into_inner(), &req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/token", web::post().to(issue_token))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::admin())
                    .wrap(middlewares::RequireJWT)
                    .route("/register", web::post().to(register)),
            ),
    );
}
