//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 核心层只返回这些类型化错误，HTTP 状态码映射由服务层通过 `status_code()` 完成。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_evaluare_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum EvaluareError {
            $($variant(String),)*
        }

        impl EvaluareError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EvaluareError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EvaluareError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EvaluareError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EvaluareError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EvaluareError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_evaluare_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Serialization("E005", "Serialization Error"),
    PasswordHash("E006", "Password Hash Error"),
    InvalidInput("E007", "Invalid Input"),
    NotFound("E008", "Resource Not Found"),
    Conflict("E009", "Resource Conflict"),
    Authentication("E010", "Authentication Error"),
    Unauthorized("E011", "Unauthorized"),
}

/// 核心实体，用于标注 NotFound 错误指向的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Student,
    Teacher,
    Class,
    Exercise,
    Grade,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Student => "student",
            Resource::Teacher => "teacher",
            Resource::Class => "class",
            Resource::Exercise => "exercise",
            Resource::Grade => "grade",
        };
        f.write_str(name)
    }
}

impl EvaluareError {
    /// 指定资源不存在
    pub fn missing(resource: Resource) -> Self {
        EvaluareError::NotFound(format!("{resource} not found"))
    }

    /// 是否为指定资源的 NotFound
    pub fn is_missing(&self, resource: Resource) -> bool {
        matches!(self, EvaluareError::NotFound(msg) if *msg == format!("{resource} not found"))
    }

    /// 映射为 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            EvaluareError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EvaluareError::NotFound(_) => StatusCode::NOT_FOUND,
            EvaluareError::Conflict(_) => StatusCode::CONFLICT,
            EvaluareError::Authentication(_) => StatusCode::UNAUTHORIZED,
            EvaluareError::Unauthorized(_) => StatusCode::FORBIDDEN,
            EvaluareError::DatabaseConfig(_)
            | EvaluareError::DatabaseConnection(_)
            | EvaluareError::DatabaseOperation(_)
            | EvaluareError::FileOperation(_)
            | EvaluareError::Serialization(_)
            | EvaluareError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EvaluareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EvaluareError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EvaluareError {
    fn from(err: sea_orm::DbErr) -> Self {
        EvaluareError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EvaluareError {
    fn from(err: std::io::Error) -> Self {
        EvaluareError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EvaluareError {
    fn from(err: serde_json::Error) -> Self {
        EvaluareError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvaluareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EvaluareError::database_config("test").code(), "E001");
        assert_eq!(EvaluareError::invalid_input("test").code(), "E007");
        assert_eq!(EvaluareError::conflict("test").code(), "E009");
        assert_eq!(EvaluareError::unauthorized("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EvaluareError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            EvaluareError::invalid_input("test").error_type(),
            "Invalid Input"
        );
    }

    #[test]
    fn test_missing_resource() {
        let err = EvaluareError::missing(Resource::Exercise);
        assert_eq!(err.message(), "exercise not found");
        assert!(err.is_missing(Resource::Exercise));
        assert!(!err.is_missing(Resource::Student));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            EvaluareError::unauthorized("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            EvaluareError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            EvaluareError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EvaluareError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = EvaluareError::invalid_input("variant C is not allowed");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Input"));
        assert!(formatted.contains("variant C is not allowed"));
    }
}
