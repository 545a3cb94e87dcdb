use super::{SeaOrmStorage, classify_write_error};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::students::{self, Column as StudentColumn, Entity as Students};
use crate::entity::teachers::{self, Column as TeacherColumn, Entity as Teachers};
use crate::entity::users::{self, Column as UserColumn, Entity as Users};
use crate::errors::{EvaluareError, Result};
use crate::models::accounts::{
    entities::{Account, AccountRole, Student, Teacher},
    requests::{NewAccount, NewStudent, NewTeacher},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

/// 写入账号基础行
async fn insert_account<C: ConnectionTrait>(
    conn: &C,
    account: NewAccount,
    role: AccountRole,
) -> Result<users::Model> {
    let now = chrono::Utc::now().timestamp();

    let model = users::ActiveModel {
        name: Set(account.name),
        surname: Set(account.surname),
        username: Set(account.username),
        email: Set(account.email),
        password_hash: Set(account.password_hash),
        role: Set(role.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| classify_write_error(e, "创建账号"))
}

impl SeaOrmStorage {
    /// 通过邮箱获取账号
    pub async fn get_account_by_email_impl(&self, email: &str) -> Result<Option<Account>> {
        let result = Users::find()
            .filter(UserColumn::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 创建教师（账号行 + 教师行，同一事务）
    pub async fn create_teacher_impl(&self, req: NewTeacher) -> Result<Teacher> {
        let txn = self.begin_write().await?;

        let user = insert_account(&*txn, req.account, AccountRole::Profesor).await?;

        let teacher = teachers::Model {
            user_id: user.id,
            is_admin: req.is_admin,
            subject: req.subject.to_string(),
        };
        Teachers::insert(teachers::ActiveModel {
            user_id: Set(teacher.user_id),
            is_admin: Set(teacher.is_admin),
            subject: Set(teacher.subject.clone()),
        })
        .exec_without_returning(&*txn)
        .await
        .map_err(|e| classify_write_error(e, "创建教师"))?;

        txn.commit().await?;

        Ok(teacher.into_teacher(user))
    }

    /// 通过邮箱获取教师
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Users::find()
            .filter(UserColumn::Email.eq(email))
            .find_also_related(Teachers)
            .one(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(match result {
            Some((user, Some(teacher))) => Some(teacher.into_teacher(user)),
            _ => None,
        })
    }

    /// 是否存在管理员
    pub async fn has_admin_impl(&self) -> Result<bool> {
        let count = Teachers::find()
            .filter(TeacherColumn::IsAdmin.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询管理员数量失败: {e}")))?;

        Ok(count > 0)
    }

    /// 创建学生（账号行 + 学生行，同一事务）
    pub async fn create_student_impl(&self, req: NewStudent) -> Result<Student> {
        let txn = self.begin_write().await?;

        let user = insert_account(&*txn, req.account, AccountRole::Student).await?;

        let student = students::Model {
            user_id: user.id,
            class_name: req.class_name,
            exam: req.exam,
            absent: false,
        };
        Students::insert(students::ActiveModel {
            user_id: Set(student.user_id),
            class_name: Set(student.class_name.clone()),
            exam: Set(student.exam.clone()),
            absent: Set(student.absent),
        })
        .exec_without_returning(&*txn)
        .await
        .map_err(|e| classify_write_error(e, "创建学生"))?;

        txn.commit().await?;

        Ok(student.into_student(user))
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(match result {
            Some((student, Some(user))) => Some(student.into_student(user)),
            _ => None,
        })
    }

    /// 列出班级学生
    pub async fn list_students_by_class_impl(&self, class_name: &str) -> Result<Vec<Student>> {
        let rows = Students::find()
            .filter(StudentColumn::ClassName.eq(class_name))
            .order_by_asc(StudentColumn::UserId)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(student, user)| user.map(|u| student.into_student(u)))
            .collect())
    }

    /// 设置缺席状态
    pub async fn set_student_absent_impl(&self, id: i64, absent: bool) -> Result<bool> {
        let txn = self.begin_write().await?;

        let exists = Students::find_by_id(id)
            .one(&*txn)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询学生失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        Students::update_many()
            .col_expr(StudentColumn::Absent, Expr::value(absent))
            .filter(StudentColumn::UserId.eq(id))
            .exec(&*txn)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("更新缺席状态失败: {e}")))?;

        txn.commit().await?;

        Ok(true)
    }

    /// 删除学生，连同其评分与账号行
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.begin_write().await?;

        Grades::delete_many()
            .filter(GradeColumn::StudentId.eq(id))
            .exec(&*txn)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("删除学生评分失败: {e}")))?;

        let result = Students::delete_by_id(id)
            .exec(&*txn)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("删除学生失败: {e}")))?;

        if result.rows_affected == 0 {
            // 事务随 txn 丢弃回滚
            return Ok(false);
        }

        Users::delete_by_id(id)
            .exec(&*txn)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("删除账号失败: {e}")))?;

        txn.commit().await?;

        Ok(true)
    }
}
