//! 测试夹具：内存 SQLite 与常用种子数据

use std::sync::Arc;

use crate::config::Argon2Config;
use crate::models::{
    accounts::{
        entities::{Student, Subject, Teacher},
        requests::{NewAccount, NewStudent, NewTeacher},
    },
    classes::entities::SubjectSlots,
    exams::requests::ExerciseSpec,
};
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub(crate) fn cheap_argon2() -> Argon2Config {
    Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(
        SeaOrmStorage::connect_in_memory()
            .await
            .expect("in-memory storage"),
    )
}

fn account(email: &str) -> NewAccount {
    let local = email.split('@').next().unwrap_or(email).to_string();
    NewAccount {
        name: local.clone(),
        surname: "Test".to_string(),
        username: format!("{local}_Test"),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

pub(crate) async fn seed_teacher(
    storage: &Arc<dyn Storage>,
    email: &str,
    subject: Subject,
    is_admin: bool,
) -> Teacher {
    storage
        .create_teacher(NewTeacher {
            account: account(email),
            is_admin,
            subject,
        })
        .await
        .expect("seed teacher")
}

pub(crate) async fn seed_student(
    storage: &Arc<dyn Storage>,
    email: &str,
    class_name: &str,
    exam: Option<&str>,
) -> Student {
    storage
        .create_student(NewStudent {
            account: account(email),
            class_name: class_name.to_string(),
            exam: exam.map(str::to_string),
        })
        .await
        .expect("seed student")
}

/// 班级 10A：数学槽位为 `math`，`outsider` 不在任何槽位；
/// 考试 Evaluare1：练习 1（数学，A/B），练习 2（罗马尼亚语，A/B/C）
pub(crate) struct Scenario {
    pub storage: Arc<dyn Storage>,
    pub math: Teacher,
    pub outsider: Teacher,
    pub student: Student,
}

pub(crate) async fn scenario_10a() -> Scenario {
    let storage = memory_storage().await;
    let math = seed_teacher(&storage, "mate@school.ro", Subject::Math, false).await;
    let outsider = seed_teacher(&storage, "fizica@school.ro", Subject::Physics, false).await;

    storage
        .create_class(
            "10A",
            SubjectSlots {
                math: Some(math.id()),
                ..Default::default()
            },
        )
        .await
        .expect("seed class");

    storage.create_exam("Evaluare1").await.expect("seed exam");
    storage
        .create_exercise(
            "Evaluare1",
            ExerciseSpec {
                number: 1,
                subject: Subject::Math,
                variants: vec!["A".into(), "B".into()],
                max_score: Some(10.0),
            },
        )
        .await
        .expect("seed exercise 1");
    storage
        .create_exercise(
            "Evaluare1",
            ExerciseSpec {
                number: 2,
                subject: Subject::Romanian,
                variants: vec!["A".into(), "B".into(), "C".into()],
                max_score: None,
            },
        )
        .await
        .expect("seed exercise 2");

    let student = seed_student(&storage, "elev@school.ro", "10A", Some("Evaluare1")).await;

    Scenario {
        storage,
        math,
        outsider,
        student,
    }
}
