use crate::domain::EnrollmentManager;
use crate::errors::Result;
use crate::models::accounts::{
    entities::Subject, requests::CreateTeacherRequest, responses::CreateTeacherResponse,
};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

const DEFAULT_ADMIN_EMAIL: &str = "admin@evaluare.local";

/// 没有管理员时创建一个，已存在时返回 `Ok(None)`
async fn ensure_admin(
    storage: &Arc<dyn Storage>,
    enrollment: &EnrollmentManager,
    email: String,
    password: Option<String>,
) -> Result<Option<CreateTeacherResponse>> {
    if storage.has_admin().await? {
        return Ok(None);
    }

    info!("No admin teacher found in database, creating default admin account...");
    let request = CreateTeacherRequest {
        name: "Admin".to_string(),
        surname: "Evaluare".to_string(),
        username: Some("admin".to_string()),
        email,
        password,
        subject: Subject::Math,
    };

    enrollment.create_teacher(request, true).await.map(Some)
}

/// 初始化默认管理员账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
    // 未设置时由开通流程生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").ok();
    let generated = password.is_none();
    let enrollment = EnrollmentManager::from_config(storage.clone());

    match ensure_admin(storage, &enrollment, email, password).await {
        Ok(None) => {
            debug!("Admin teacher already exists, skipping admin seed");
        }
        Ok(Some(response)) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                response.teacher.id(),
                response.teacher.account.email
            );
            if generated {
                warn!("==========================================================");
                warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
                warn!("  Generated admin password: {}", response.password);
                warn!("  Please save this password or set ADMIN_PASSWORD env var");
                warn!("==========================================================");
            }
        }
        Err(e) => {
            // 无管理员时管理接口不可用
            error!(
                "Failed to create admin account, admin routes will be unusable: {}",
                e
            );
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化、数据库迁移和管理员账号
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{cheap_argon2, memory_storage};

    #[tokio::test]
    async fn test_admin_seeded_once() {
        let storage = memory_storage().await;
        let enrollment = EnrollmentManager::new(storage.clone(), cheap_argon2(), 12);

        let created = ensure_admin(&storage, &enrollment, DEFAULT_ADMIN_EMAIL.into(), None)
            .await
            .unwrap()
            .expect("admin created");
        assert!(created.teacher.is_admin);
        assert_eq!(created.password.len(), 12);
        assert!(storage.has_admin().await.unwrap());

        let again = ensure_admin(&storage, &enrollment, "other@school.ro".into(), None)
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_weak_admin_password_is_an_error() {
        let storage = memory_storage().await;
        let enrollment = EnrollmentManager::new(storage.clone(), cheap_argon2(), 10);

        let err = ensure_admin(
            &storage,
            &enrollment,
            DEFAULT_ADMIN_EMAIL.into(),
            Some("short".into()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(!storage.has_admin().await.unwrap());
    }
}
