//! 班级与学生开通
//!
//! 班级、考试本身写入失败即中止；其下的学生、练习逐条尽力写入，
//! 单条失败记录 warn 日志后跳过，并在响应中列出原因。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AppConfig, Argon2Config};
use crate::errors::{EvaluareError, Resource, Result};
use crate::models::{
    accounts::{
        entities::Student,
        requests::{
            CreateTeacherRequest, NewAccount, NewStudent, NewTeacher, PupilEntry, PupilSpec,
        },
        responses::{CreateTeacherResponse, ProvisionedStudent},
    },
    classes::{
        requests::CreateClassRequest,
        responses::{CreateClassResponse, SkippedEntry},
    },
    exams::{
        requests::{CreateExamRequest, ExerciseSpec},
        responses::CreateExamResponse,
    },
};
use crate::storage::Storage;
use crate::utils::{
    generate_random_password,
    password::hash_password_blocking,
    validate::{
        validate_email, validate_label, validate_password_simple, validate_person_name,
        validate_username,
    },
};

use super::resolve_teacher;

pub struct EnrollmentManager {
    storage: Arc<dyn Storage>,
    argon2: Argon2Config,
    password_length: usize,
}

/// 默认用户名：<name>_<surname>
fn derive_username(name: &str, surname: &str) -> String {
    format!("{}_{}", name.trim(), surname.trim())
}

fn validate_pupil(pupil: &PupilSpec) -> Result<()> {
    validate_person_name(&pupil.name).map_err(EvaluareError::invalid_input)?;
    validate_person_name(&pupil.surname).map_err(EvaluareError::invalid_input)?;
    validate_email(pupil.email.trim()).map_err(EvaluareError::invalid_input)?;
    Ok(())
}

fn validate_exercise(spec: &ExerciseSpec) -> Result<()> {
    if spec.number <= 0 {
        return Err(EvaluareError::invalid_input(
            "exercise number must be positive",
        ));
    }
    if spec.variants.is_empty() {
        return Err(EvaluareError::invalid_input(
            "exercise must allow at least one variant",
        ));
    }
    if spec.variants.iter().any(|v| v.trim().is_empty()) {
        return Err(EvaluareError::invalid_input("variants must not be empty"));
    }
    let unique: HashSet<&str> = spec.variants.iter().map(String::as_str).collect();
    if unique.len() != spec.variants.len() {
        return Err(EvaluareError::invalid_input("variants must be distinct"));
    }
    if let Some(score) = spec.max_score
        && !(score.is_finite() && score > 0.0)
    {
        return Err(EvaluareError::invalid_input(
            "max score must be a positive number",
        ));
    }
    Ok(())
}

impl EnrollmentManager {
    pub fn new(storage: Arc<dyn Storage>, argon2: Argon2Config, password_length: usize) -> Self {
        Self {
            storage,
            argon2,
            password_length,
        }
    }

    /// 使用全局配置中的哈希参数与密码长度
    pub fn from_config(storage: Arc<dyn Storage>) -> Self {
        let config = AppConfig::get();
        Self::new(
            storage,
            config.argon2.clone(),
            config.credentials.generated_password_length,
        )
    }

    /// 创建班级并为每位学生开通账号
    pub async fn create_class(&self, req: CreateClassRequest) -> Result<CreateClassResponse> {
        let name = req.name.trim().to_string();
        validate_label(&name).map_err(EvaluareError::invalid_input)?;

        let class = self.storage.create_class(&name, req.slots).await?;
        info!(
            "班级 {} 已创建，待开通学生 {} 名",
            class.name,
            req.students.len()
        );

        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for (index, entry) in req.students.into_iter().enumerate() {
            let label = entry.label();
            match self.provision_student(&class.name, entry).await {
                Ok(provisioned) => created.push(provisioned),
                // 哈希失败与具体学生无关，中止整个批次
                Err(e @ EvaluareError::PasswordHash(_)) => return Err(e),
                Err(e) => {
                    warn!("班级 {} 第 {} 名学生开通失败: {}", class.name, index, e);
                    skipped.push(SkippedEntry {
                        index,
                        label,
                        reason: e.message().to_string(),
                    });
                }
            }
        }

        Ok(CreateClassResponse {
            class,
            created,
            skipped,
        })
    }

    async fn provision_student(
        &self,
        class_name: &str,
        entry: PupilEntry,
    ) -> Result<ProvisionedStudent> {
        let pupil = match entry {
            PupilEntry::Spec(pupil) => pupil,
            PupilEntry::Malformed(_) => {
                return Err(EvaluareError::invalid_input("malformed pupil entry"));
            }
        };
        validate_pupil(&pupil)?;

        let password = generate_random_password(self.password_length);
        let password_hash = hash_password_blocking(&self.argon2, &password).await?;

        let student = self
            .storage
            .create_student(NewStudent {
                account: NewAccount {
                    username: derive_username(&pupil.name, &pupil.surname),
                    name: pupil.name.trim().to_string(),
                    surname: pupil.surname.trim().to_string(),
                    email: pupil.email.trim().to_string(),
                    password_hash,
                },
                class_name: class_name.to_string(),
                exam: pupil.exam.filter(|e| !e.trim().is_empty()),
            })
            .await?;

        Ok(ProvisionedStudent { student, password })
    }

    /// 创建教师；`as_admin` 仅由管理员注册入口置为 true
    pub async fn create_teacher(
        &self,
        req: CreateTeacherRequest,
        as_admin: bool,
    ) -> Result<CreateTeacherResponse> {
        validate_person_name(&req.name).map_err(EvaluareError::invalid_input)?;
        validate_person_name(&req.surname).map_err(EvaluareError::invalid_input)?;
        let email = req.email.trim().to_string();
        validate_email(&email).map_err(EvaluareError::invalid_input)?;

        let username = match req.username {
            Some(username) => {
                validate_username(&username).map_err(EvaluareError::invalid_input)?;
                username
            }
            None => derive_username(&req.name, &req.surname),
        };

        let password = match req.password {
            Some(password) => {
                validate_password_simple(&password).map_err(EvaluareError::invalid_input)?;
                password
            }
            None => generate_random_password(self.password_length),
        };
        let password_hash = hash_password_blocking(&self.argon2, &password).await?;

        let teacher = self
            .storage
            .create_teacher(NewTeacher {
                account: NewAccount {
                    name: req.name.trim().to_string(),
                    surname: req.surname.trim().to_string(),
                    username,
                    email,
                    password_hash,
                },
                is_admin: as_admin,
                subject: req.subject,
            })
            .await?;

        info!(
            "教师账号已创建 (ID: {}, 学科: {}, 管理员: {})",
            teacher.id(),
            teacher.subject,
            teacher.is_admin
        );

        Ok(CreateTeacherResponse { teacher, password })
    }

    /// 创建考试及其练习
    pub async fn create_exam(&self, req: CreateExamRequest) -> Result<CreateExamResponse> {
        let name = req.name.trim().to_string();
        validate_label(&name).map_err(EvaluareError::invalid_input)?;

        let exam = self.storage.create_exam(&name).await?;

        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for (index, spec) in req.exercises.into_iter().enumerate() {
            let label = format!("exercise {}", spec.number);
            let result = match validate_exercise(&spec) {
                Ok(()) => self.storage.create_exercise(&exam.name, spec).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(exercise) => created.push(exercise),
                Err(e) => {
                    warn!("考试 {} 的{}写入失败: {}", exam.name, label, e);
                    skipped.push(SkippedEntry {
                        index,
                        label,
                        reason: e.message().to_string(),
                    });
                }
            }
        }

        Ok(CreateExamResponse {
            exam,
            created,
            skipped,
        })
    }

    pub async fn set_absent(&self, student_id: i64, absent: bool) -> Result<()> {
        if self.storage.set_student_absent(student_id, absent).await? {
            Ok(())
        } else {
            Err(EvaluareError::missing(Resource::Student))
        }
    }

    pub async fn delete_student(&self, student_id: i64) -> Result<()> {
        if self.storage.delete_student(student_id).await? {
            info!("学生 {} 已删除", student_id);
            Ok(())
        } else {
            Err(EvaluareError::missing(Resource::Student))
        }
    }

    /// 教师占用槽位的班级名称
    pub async fn classes_for_teacher(&self, teacher_email: &str) -> Result<Vec<String>> {
        let teacher = resolve_teacher(self.storage.as_ref(), teacher_email).await?;
        self.storage.list_class_names_for_teacher(teacher.id()).await
    }

    pub async fn students_in_class(&self, class_name: &str) -> Result<Vec<Student>> {
        if self.storage.get_class_by_name(class_name).await?.is_none() {
            return Err(EvaluareError::missing(Resource::Class));
        }
        self.storage.list_students_by_class(class_name).await
    }
}
