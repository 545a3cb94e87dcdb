use crate::config::Argon2Config;
use crate::errors::EvaluareError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 使用指定参数哈希密码
pub fn hash_password_with(params: &Argon2Config, password: &str) -> Result<String, EvaluareError> {
    let params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| EvaluareError::password_hash(format!("Argon2 参数错误: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| EvaluareError::password_hash(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码，参数取自哈希串本身
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// 在阻塞线程池中哈希（使用 spawn_blocking 避免阻塞异步工作线程）
pub async fn hash_password_blocking(
    params: &Argon2Config,
    password: &str,
) -> Result<String, EvaluareError> {
    let params = params.clone();
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password_with(&params, &password))
        .await
        .map_err(|e| EvaluareError::password_hash(format!("密码哈希任务失败: {e}")))?
}

/// 在阻塞线程池中验证密码
pub async fn verify_password_blocking(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();
    match tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("密码验证任务失败: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with(&cheap_params(), "Secret#123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secret#123", &hash));
        assert!(!verify_password("secret#123", &hash));
    }

    #[test]
    fn test_salted_hashes_differ() {
        let a = hash_password_with(&cheap_params(), "same").unwrap();
        let b = hash_password_with(&cheap_params(), "same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_blocking_hash_and_verify() {
        let hash = hash_password_blocking(&cheap_params(), "Secret#123")
            .await
            .unwrap();
        assert!(verify_password_blocking("Secret#123", &hash).await);
        assert!(!verify_password_blocking("Secret#124", &hash).await);
    }

    #[tokio::test]
    async fn test_blocking_hash_reports_invalid_params() {
        let params = Argon2Config {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 1,
        };
        let err = hash_password_blocking(&params, "x").await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_invalid_params() {
        let params = Argon2Config {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 1,
        };
        let err = hash_password_with(&params, "x").unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
