use std::sync::Arc;

use crate::errors::Result;
use crate::models::accounts::entities::AccountRole;
use crate::storage::Storage;

use super::resolve_teacher;

/// 角色判定；教师记录缺失是错误而不是 `false`
pub struct AccessGate {
    storage: Arc<dyn Storage>,
}

impl AccessGate {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        let teacher = resolve_teacher(self.storage.as_ref(), email).await?;
        Ok(teacher.is_admin)
    }

    pub async fn is_profesor(&self, email: &str) -> Result<bool> {
        let teacher = resolve_teacher(self.storage.as_ref(), email).await?;
        Ok(teacher.account.role == AccountRole::Profesor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{memory_storage, seed_teacher};
    use crate::errors::Resource;
    use crate::models::accounts::entities::Subject;

    #[tokio::test]
    async fn test_admin_and_profesor_flags() {
        let storage = memory_storage().await;
        seed_teacher(&storage, "admin@school.ro", Subject::Math, true).await;
        seed_teacher(&storage, "prof@school.ro", Subject::English, false).await;
        let gate = AccessGate::new(storage);

        assert!(gate.is_admin("admin@school.ro").await.unwrap());
        assert!(!gate.is_admin("prof@school.ro").await.unwrap());
        assert!(gate.is_profesor("prof@school.ro").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_email_is_an_error() {
        let gate = AccessGate::new(memory_storage().await);

        let err = gate.is_admin("ghost@school.ro").await.unwrap_err();
        assert!(err.is_missing(Resource::Teacher));
        let err = gate.is_profesor("ghost@school.ro").await.unwrap_err();
        assert!(err.is_missing(Resource::Teacher));
    }
}
