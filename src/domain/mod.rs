//! 核心业务层
//!
//! - `grading`: 评分校验与授权引擎
//! - `enrollment`: 班级、教师、考试的开通与学生管理
//! - `access`: 基于教师记录的角色判定
//!
//! 各组件通过构造函数注入 `Arc<dyn Storage>`，只返回类型化错误，不构造 HTTP 响应。

pub mod access;
pub mod enrollment;
pub mod grading;

#[cfg(test)]
pub(crate) mod test_support;

pub use access::AccessGate;
pub use enrollment::EnrollmentManager;
pub use grading::GradeEngine;

use crate::errors::{EvaluareError, Resource, Result};
use crate::models::{accounts::entities::Teacher, classes::entities::Class};
use crate::storage::Storage;

/// 通过邮箱解析教师，不存在即 NotFound
pub(crate) async fn resolve_teacher(storage: &dyn Storage, email: &str) -> Result<Teacher> {
    storage
        .get_teacher_by_email(email)
        .await?
        .ok_or_else(|| EvaluareError::missing(Resource::Teacher))
}

/// 教师须占用班级的某个学科槽位
pub(crate) fn ensure_teaches(teacher: &Teacher, class: &Class) -> Result<()> {
    if class.is_taught_by(teacher.id()) {
        Ok(())
    } else {
        tracing::info!(
            "教师 {} 未被分配到班级 {}，拒绝访问",
            teacher.account.email,
            class.name
        );
        Err(EvaluareError::unauthorized(format!(
            "teacher is not assigned to class {}",
            class.name
        )))
    }
}
