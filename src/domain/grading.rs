//! 评分校验与授权引擎
//!
//! 提交评分按固定顺序校验，遇到第一个失败即返回：
//! 学生 → 练习 → 班级 → 教师 → 班级授权 → 变体。
//! 写入由存储层在写锁与事务内完成，复合主键是新增时唯一性的最终裁决。

use std::sync::Arc;

use tracing::debug;

use crate::errors::{EvaluareError, Resource, Result};
use crate::models::{
    exams::entities::Exercise,
    grades::{
        entities::{Grade, GradeRecord, SubmitMode},
        requests::GradeSubmission,
    },
};
use crate::storage::Storage;

use super::{ensure_teaches, resolve_teacher};

pub struct GradeEngine {
    storage: Arc<dyn Storage>,
}

/// 解析 `?student=` 参数；空串返回 None
fn parse_student_id(raw: &str) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| EvaluareError::invalid_input(format!("invalid student id: {trimmed}")))
}

impl GradeEngine {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 新增或覆盖一条评分，评分教师由 `teacher_email` 决定
    pub async fn submit_grade(
        &self,
        teacher_email: &str,
        submission: GradeSubmission,
        mode: SubmitMode,
    ) -> Result<Grade> {
        let student = self
            .storage
            .get_student_by_id(submission.student_id)
            .await?
            .ok_or_else(|| EvaluareError::missing(Resource::Student))?;

        let exercise = self
            .storage
            .get_exercise(&submission.exam, submission.exercise)
            .await?
            .ok_or_else(|| EvaluareError::missing(Resource::Exercise))?;

        let class = self
            .storage
            .get_class_by_name(&student.class_name)
            .await?
            .ok_or_else(|| EvaluareError::missing(Resource::Class))?;

        let teacher = resolve_teacher(self.storage.as_ref(), teacher_email).await?;

        ensure_teaches(&teacher, &class)?;

        if let Some(claimed) = submission.teacher_id
            && claimed != teacher.id()
        {
            debug!(
                "忽略请求体中的教师 ID {}，以令牌身份 {} 为准",
                claimed,
                teacher.id()
            );
        }

        if !exercise.allows(&submission.variant) {
            return Err(EvaluareError::invalid_input(format!(
                "variant {} is not allowed for exercise {} of exam {}",
                submission.variant, exercise.number, exercise.exam
            )));
        }

        let record = GradeRecord {
            student_id: student.id(),
            exam: exercise.exam,
            exercise_number: exercise.number,
            teacher_id: teacher.id(),
            variant: submission.variant,
        };

        match mode {
            SubmitMode::Create => self.storage.insert_grade(record).await,
            SubmitMode::Update => self
                .storage
                .update_grade(record)
                .await?
                .ok_or_else(|| EvaluareError::missing(Resource::Grade)),
        }
    }

    /// 该教师给该学生的全部评分
    pub async fn read_grades(&self, teacher_email: &str, student_id: &str) -> Result<Vec<Grade>> {
        let teacher = resolve_teacher(self.storage.as_ref(), teacher_email).await?;

        let Some(student_id) = parse_student_id(student_id)? else {
            return Ok(Vec::new());
        };

        self.storage.list_grades(teacher.id(), student_id).await
    }

    /// 学生所考考试中属于该教师学科的练习
    pub async fn read_assigned_exercises(
        &self,
        teacher_email: &str,
        student_id: &str,
    ) -> Result<Vec<Exercise>> {
        let teacher = resolve_teacher(self.storage.as_ref(), teacher_email).await?;

        let Some(student_id) = parse_student_id(student_id)? else {
            return Ok(Vec::new());
        };

        let student = self
            .storage
            .get_student_by_id(student_id)
            .await?
            .ok_or_else(|| EvaluareError::missing(Resource::Student))?;

        let class = self
            .storage
            .get_class_by_name(&student.class_name)
            .await?
            .ok_or_else(|| EvaluareError::missing(Resource::Class))?;

        ensure_teaches(&teacher, &class)?;

        match student.exam {
            Some(exam) => self.storage.list_exercises(&exam, teacher.subject).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{Scenario, scenario_10a, seed_student};

    fn submission(student_id: i64, variant: &str) -> GradeSubmission {
        GradeSubmission {
            student_id,
            exam: "Evaluare1".into(),
            exercise: 1,
            variant: variant.into(),
            teacher_id: None,
        }
    }

    #[tokio::test]
    async fn test_scenario_10a() {
        let Scenario {
            storage,
            math,
            outsider,
            student,
        } = scenario_10a().await;
        let engine = GradeEngine::new(storage);

        let grade = engine
            .submit_grade(
                "mate@school.ro",
                submission(student.id(), "B"),
                SubmitMode::Create,
            )
            .await
            .unwrap();
        assert_eq!(grade.student_id, student.id());
        assert_eq!(grade.exam, "Evaluare1");
        assert_eq!(grade.exercise_number, 1);
        assert_eq!(grade.teacher_id, math.id());
        assert_eq!(grade.variant, "B");

        let err = engine
            .submit_grade(
                "mate@school.ro",
                submission(student.id(), "C"),
                SubmitMode::Update,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let err = engine
            .submit_grade(
                &outsider.account.email,
                submission(student.id(), "B"),
                SubmitMode::Update,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[tokio::test]
    async fn test_grader_is_stamped_from_identity() {
        let Scenario {
            storage,
            math,
            outsider,
            student,
        } = scenario_10a().await;
        let engine = GradeEngine::new(storage);

        let mut forged = submission(student.id(), "A");
        forged.teacher_id = Some(outsider.id());
        engine
            .submit_grade("mate@school.ro", forged, SubmitMode::Create)
            .await
            .unwrap();

        let grades = engine
            .read_grades("mate@school.ro", &student.id().to_string())
            .await
            .unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].teacher_id, math.id());

        let others = engine
            .read_grades(&outsider.account.email, &student.id().to_string())
            .await
            .unwrap();
        assert!(others.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let scenario = scenario_10a().await;
        let engine = GradeEngine::new(scenario.storage);
        let id = scenario.student.id();

        engine
            .submit_grade("mate@school.ro", submission(id, "A"), SubmitMode::Create)
            .await
            .unwrap();
        let err = engine
            .submit_grade("mate@school.ro", submission(id, "B"), SubmitMode::Create)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E009");
    }

    #[tokio::test]
    async fn test_update_requires_existing_grade() {
        let scenario = scenario_10a().await;
        let engine = GradeEngine::new(scenario.storage);
        let id = scenario.student.id();

        let err = engine
            .submit_grade("mate@school.ro", submission(id, "A"), SubmitMode::Update)
            .await
            .unwrap_err();
        assert!(err.is_missing(Resource::Grade));

        engine
            .submit_grade("mate@school.ro", submission(id, "A"), SubmitMode::Create)
            .await
            .unwrap();
        let updated = engine
            .submit_grade("mate@school.ro", submission(id, "B"), SubmitMode::Update)
            .await
            .unwrap();
        assert_eq!(updated.variant, "B");

        let grades = engine
            .read_grades("mate@school.ro", &id.to_string())
            .await
            .unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].variant, "B");
    }

    #[tokio::test]
    async fn test_concurrent_creates_race_at_primary_key() {
        let scenario = scenario_10a().await;
        let engine = GradeEngine::new(scenario.storage);
        let id = scenario.student.id();

        let (first, second) = tokio::join!(
            engine.submit_grade("mate@school.ro", submission(id, "A"), SubmitMode::Create),
            engine.submit_grade("mate@school.ro", submission(id, "B"), SubmitMode::Create),
        );
        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.code() == "E009")
        );
    }

    #[tokio::test]
    async fn test_resolution_order() {
        let scenario = scenario_10a().await;
        let engine = GradeEngine::new(scenario.storage.clone());
        let id = scenario.student.id();

        // 学生不存在优先于教师不存在
        let err = engine
            .submit_grade("ghost@school.ro", submission(9999, "A"), SubmitMode::Create)
            .await
            .unwrap_err();
        assert!(err.is_missing(Resource::Student));

        let mut missing_exercise = submission(id, "A");
        missing_exercise.exercise = 42;
        let err = engine
            .submit_grade("ghost@school.ro", missing_exercise, SubmitMode::Create)
            .await
            .unwrap_err();
        assert!(err.is_missing(Resource::Exercise));

        let err = engine
            .submit_grade("ghost@school.ro", submission(id, "A"), SubmitMode::Create)
            .await
            .unwrap_err();
        assert!(err.is_missing(Resource::Teacher));

        // 未授权优先于变体非法
        let err = engine
            .submit_grade(
                &scenario.outsider.account.email,
                submission(id, "Z"),
                SubmitMode::Create,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[tokio::test]
    async fn test_read_grades_student_param() {
        let scenario = scenario_10a().await;
        let engine = GradeEngine::new(scenario.storage);

        assert!(
            engine
                .read_grades("mate@school.ro", "")
                .await
                .unwrap()
                .is_empty()
        );
        let err = engine
            .read_grades("mate@school.ro", "abc")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        let err = engine.read_grades("ghost@school.ro", "").await.unwrap_err();
        assert!(err.is_missing(Resource::Teacher));
    }

    #[tokio::test]
    async fn test_assigned_exercises_follow_teacher_subject() {
        let scenario = scenario_10a().await;
        let engine = GradeEngine::new(scenario.storage.clone());
        let id = scenario.student.id().to_string();

        let exercises = engine
            .read_assigned_exercises("mate@school.ro", &id)
            .await
            .unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].number, 1);
        assert_eq!(exercises[0].variants, vec!["A", "B"]);

        let err = engine
            .read_assigned_exercises(&scenario.outsider.account.email, &id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E011");

        let err = engine
            .read_assigned_exercises("mate@school.ro", "9999")
            .await
            .unwrap_err();
        assert!(err.is_missing(Resource::Student));

        assert!(
            engine
                .read_assigned_exercises("mate@school.ro", "")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_student_without_exam_has_no_exercises() {
        let scenario = scenario_10a().await;
        let pupil = seed_student(&scenario.storage, "fara.examen@school.ro", "10A", None).await;
        let engine = GradeEngine::new(scenario.storage);

        let exercises = engine
            .read_assigned_exercises("mate@school.ro", &pupil.id().to_string())
            .await
            .unwrap();
        assert!(exercises.is_empty());
    }
}
