use std::sync::Arc;

use crate::models::{
    accounts::{
        entities::{Account, Student, Subject, Teacher},
        requests::{NewStudent, NewTeacher},
    },
    classes::entities::{Class, SubjectSlots},
    exams::{
        entities::{Exam, Exercise},
        requests::ExerciseSpec,
    },
    grades::entities::{Grade, GradeRecord},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 凭据存储
///
/// 查询类方法以 `Ok(None)` / `Ok(false)` 表示记录不存在，与 `Err` 区分。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 通过邮箱获取账号（登录用）
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    // 创建教师
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher>;
    // 通过邮箱获取教师
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    // 是否已存在管理员
    async fn has_admin(&self) -> Result<bool>;
    // 创建学生
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 列出班级学生
    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<Student>>;
    // 设置缺席状态
    async fn set_student_absent(&self, id: i64, absent: bool) -> Result<bool>;
    // 删除学生（连同账号与评分）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, name: &str, slots: SubjectSlots) -> Result<Class>;
    // 通过名称获取班级
    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>>;
    // 列出教师占用槽位的班级名称
    async fn list_class_names_for_teacher(&self, teacher_id: i64) -> Result<Vec<String>>;

    /// 考试管理方法
    // 创建考试
    async fn create_exam(&self, name: &str) -> Result<Exam>;
    // 为考试添加练习
    async fn create_exercise(&self, exam: &str, exercise: ExerciseSpec) -> Result<Exercise>;
    // 通过 (考试, 编号) 获取练习
    async fn get_exercise(&self, exam: &str, number: i32) -> Result<Option<Exercise>>;
    // 列出考试中指定学科的练习
    async fn list_exercises(&self, exam: &str, subject: Subject) -> Result<Vec<Exercise>>;

    /// 评分管理方法
    // 新增评分，复合主键冲突返回 Conflict
    async fn insert_grade(&self, record: GradeRecord) -> Result<Grade>;
    // 覆盖评分，记录不存在时返回 None
    async fn update_grade(&self, record: GradeRecord) -> Result<Option<Grade>>;
    // 列出某教师给某学生的评分
    async fn list_grades(&self, teacher_id: i64, student_id: i64) -> Result<Vec<Grade>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
