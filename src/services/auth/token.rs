use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ReturnCode,
    auth::{TokenRequest, TokenResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password_blocking;

use super::AuthService;

pub async fn handle_issue_token(
    service: &AuthService,
    token_request: TokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 根据邮箱获取账号
    match storage.get_account_by_email(token_request.email.trim()).await {
        Ok(Some(account)) => {
            // 2. 验证密码
            if !verify_password_blocking(&token_request.password, &account.password_hash).await {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ReturnCode::Unauthorized,
                    "Email or password is incorrect",
                )));
            }

            // 3. 签发令牌
            match JwtUtils::generate_access_token(account.id, &account.email, &account.username)
            {
                Ok(access_token) => {
                    tracing::info!("Account {} authenticated", account.username);
                    Ok(HttpResponse::Ok().json(ApiResponse::success(TokenResponse {
                        access_token,
                        token_type: "Bearer".to_string(),
                        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                    })))
                }
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ReturnCode::InternalIssue,
                            "Unable to generate token",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ReturnCode::Unauthorized,
            "Email or password is incorrect",
        ))),
        Err(e) => Ok(crate::services::error_response(&e)),
    }
}
