pub mod requests;
pub mod responses;

pub use requests::TokenRequest;
pub use responses::TokenResponse;

// 令牌解析出的身份，由 RequireJWT 写入请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub id: i64,
    pub email: String,
    pub username: String,
}
