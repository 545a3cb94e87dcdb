/*!
 * 基于教师记录的访问控制中间件
 *
 * 必须在 RequireJWT 之后执行（actix 中后 wrap 的先执行）。
 * 以令牌中的邮箱查询教师记录：查询失败返回 500，角色不符返回 403。
 *
 * ```rust,ignore
 * web::scope("/api/v1/admin")
 *     .wrap(RequireRole::admin())
 *     .wrap(RequireJWT)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{error, info};

use crate::domain::AccessGate;
use crate::models::{ReturnCode, auth::AuthIdentity};
use crate::storage::Storage;

use super::create_error_response;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRole {
    Admin,
    Profesor,
}

#[derive(Clone)]
pub struct RequireRole {
    role: GateRole,
}

impl RequireRole {
    pub fn admin() -> Self {
        Self {
            role: GateRole::Admin,
        }
    }

    pub fn profesor() -> Self {
        Self {
            role: GateRole::Profesor,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    role: GateRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let role = self.role;

        Box::pin(async move {
            let identity = req.extensions().get::<AuthIdentity>().cloned();
            let Some(identity) = identity else {
                info!(
                    "Role check failed: No identity found in request. Make sure RequireJWT middleware is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ReturnCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            let Some(storage) = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone())
            else {
                error!("Storage not found in app data");
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ReturnCode::InternalIssue,
                        "Storage unavailable",
                    )
                    .map_into_right_body(),
                ));
            };

            let gate = AccessGate::new(storage);
            let checked = match role {
                GateRole::Admin => gate.is_admin(&identity.email).await,
                GateRole::Profesor => gate.is_profesor(&identity.email).await,
            };

            match checked {
                Ok(true) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Ok(false) => {
                    info!(
                        "Access denied for {} (ID: {}). Required role: {:?}",
                        identity.email, identity.id, role
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ReturnCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(e) => {
                    error!("Role lookup failed for {}: {}", identity.email, e);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ReturnCode::InternalIssue,
                            "Could not verify account role",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
