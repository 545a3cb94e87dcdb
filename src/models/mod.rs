pub mod accounts;
pub mod auth;
pub mod classes;
pub mod common;
pub mod exams;
pub mod grades;

pub use common::response::{ApiResponse, ReturnCode};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
