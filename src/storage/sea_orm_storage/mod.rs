//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 所有写操作经由 `begin_write` 串行化：先取进程内写锁，再开启事务。

mod accounts;
mod classes;
mod exams;
mod grades;

use crate::config::AppConfig;
use crate::errors::{EvaluareError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, SqlErr,
    TransactionTrait,
};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    write_lock: Arc<Mutex<()>>,
}

/// 持有写锁的事务
pub(crate) struct WriteTxn<'a> {
    _guard: MutexGuard<'a, ()>,
    txn: DatabaseTransaction,
}

impl Deref for WriteTxn<'_> {
    type Target = DatabaseTransaction;

    fn deref(&self) -> &Self::Target {
        &self.txn
    }
}

impl WriteTxn<'_> {
    /// 提交事务，随后释放写锁
    pub(crate) async fn commit(self) -> Result<()> {
        let WriteTxn { _guard, txn } = self;
        txn.commit()
            .await
            .map_err(|e| EvaluareError::database_operation(format!("提交事务失败: {e}")))
    }
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 内存 SQLite，单连接保证所有查询落在同一个库上
    pub async fn connect_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| EvaluareError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| EvaluareError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// 运行迁移并包装连接
    async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self {
            db,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// 获取写锁并开启事务
    pub(crate) async fn begin_write(&self) -> Result<WriteTxn<'_>> {
        let guard = self.write_lock.lock().await;
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EvaluareError::database_operation(format!("开启事务失败: {e}")))?;
        Ok(WriteTxn { _guard: guard, txn })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvaluareError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvaluareError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| EvaluareError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvaluareError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写入错误分类：唯一约束冲突为 Conflict，外键引用缺失为 InvalidInput
pub(crate) fn classify_write_error(err: DbErr, context: &str) -> EvaluareError {
    let message = err.to_string();
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            EvaluareError::conflict(format!("{context}: 记录已存在"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            EvaluareError::invalid_input(format!("{context}: 引用的记录不存在"))
        }
        _ if message.contains("UNIQUE constraint failed") => {
            EvaluareError::conflict(format!("{context}: 记录已存在"))
        }
        _ if message.contains("FOREIGN KEY constraint failed") => {
            EvaluareError::invalid_input(format!("{context}: 引用的记录不存在"))
        }
        _ => EvaluareError::database_operation(format!("{context}失败: {message}")),
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.get_account_by_email_impl(email).await
    }

    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    async fn has_admin(&self) -> Result<bool> {
        self.has_admin_impl().await
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_by_class(&self, class_name: &str) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_name).await
    }

    async fn set_student_absent(&self, id: i64, absent: bool) -> Result<bool> {
        self.set_student_absent_impl(id, absent).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, name: &str, slots: SubjectSlots) -> Result<Class> {
        self.create_class_impl(name, slots).await
    }

    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>> {
        self.get_class_by_name_impl(name).await
    }

    async fn list_class_names_for_teacher(&self, teacher_id: i64) -> Result<Vec<String>> {
        self.list_class_names_for_teacher_impl(teacher_id).await
    }

    // 考试模块
    async fn create_exam(&self, name: &str) -> Result<Exam> {
        self.create_exam_impl(name).await
    }

    async fn create_exercise(&self, exam: &str, exercise: ExerciseSpec) -> Result<Exercise> {
        self.create_exercise_impl(exam, exercise).await
    }

    async fn get_exercise(&self, exam: &str, number: i32) -> Result<Option<Exercise>> {
        self.get_exercise_impl(exam, number).await
    }

    async fn list_exercises(&self, exam: &str, subject: Subject) -> Result<Vec<Exercise>> {
        self.list_exercises_impl(exam, subject).await
    }

    // 评分模块
    async fn insert_grade(&self, record: GradeRecord) -> Result<Grade> {
        self.insert_grade_impl(record).await
    }

    async fn update_grade(&self, record: GradeRecord) -> Result<Option<Grade>> {
        self.update_grade_impl(record).await
    }

    async fn list_grades(&self, teacher_id: i64, student_id: i64) -> Result<Vec<Grade>> {
        self.list_grades_impl(teacher_id, student_id).await
    }
}
