use super::{SeaOrmStorage, classify_write_error};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{EvaluareError, Result};
use crate::models::grades::entities::{Grade, GradeRecord};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr};

impl SeaOrmStorage {
    /// 新增评分，复合主键重复时为 Conflict
    pub async fn insert_grade_impl(&self, record: GradeRecord) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.begin_write().await?;

        Grades::insert(ActiveModel {
            student_id: Set(record.student_id),
            exam: Set(record.exam.clone()),
            exercise_number: Set(record.exercise_number),
            teacher_id: Set(record.teacher_id),
            variant: Set(record.variant.clone()),
            graded_at: Set(now),
            updated_at: Set(now),
        })
        .exec_without_returning(&*txn)
        .await
        .map_err(|e| classify_write_error(e, "创建评分"))?;

        txn.commit().await?;

        Ok(crate::entity::grades::Model {
            student_id: record.student_id,
            exam: record.exam,
            exercise_number: record.exercise_number,
            teacher_id: record.teacher_id,
            variant: record.variant,
            graded_at: now,
            updated_at: now,
        }
        .into_grade())
    }

    /// 覆盖已有评分的教师与变体；按主键查不到即记录不存在
    pub async fn update_grade_impl(&self, record: GradeRecord) -> Result<Option<Grade>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.begin_write().await?;

        // 以存在性判断，不依赖受影响行数（MySQL 只统计实际改变的行）
        let Some(existing) = Grades::find_by_id((
            record.student_id,
            record.exam.clone(),
            record.exercise_number,
        ))
        .one(&*txn)
        .await
        .map_err(|e| EvaluareError::database_operation(format!("查询评分失败: {e}")))?
        else {
            return Ok(None);
        };

        Grades::update_many()
            .col_expr(Column::TeacherId, Expr::value(record.teacher_id))
            .col_expr(Column::Variant, Expr::value(record.variant.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::StudentId.eq(record.student_id))
            .filter(Column::Exam.eq(record.exam.as_str()))
            .filter(Column::ExerciseNumber.eq(record.exercise_number))
            .exec(&*txn)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("更新评分失败: {e}")))?;

        txn.commit().await?;

        Ok(Some(
            crate::entity::grades::Model {
                teacher_id: record.teacher_id,
                variant: record.variant,
                updated_at: now,
                ..existing
            }
            .into_grade(),
        ))
    }

    /// 列出某教师给某学生的评分
    pub async fn list_grades_impl(&self, teacher_id: i64, student_id: i64) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Exam)
            .order_by_asc(Column::ExerciseNumber)
            .all(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询评分列表失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::test_support::scenario_10a;
    use crate::models::grades::entities::GradeRecord;

    fn record(student_id: i64, teacher_id: i64, variant: &str) -> GradeRecord {
        GradeRecord {
            student_id,
            exam: "Evaluare1".into(),
            exercise_number: 1,
            teacher_id,
            variant: variant.into(),
        }
    }

    #[tokio::test]
    async fn test_repeated_identical_update_still_finds_grade() {
        let scenario = scenario_10a().await;
        let student = scenario.student.id();
        let teacher = scenario.math.id();

        scenario
            .storage
            .insert_grade(record(student, teacher, "A"))
            .await
            .unwrap();

        // 同一秒内重复提交相同内容，不应被当作记录不存在
        for _ in 0..2 {
            let updated = scenario
                .storage
                .update_grade(record(student, teacher, "B"))
                .await
                .unwrap()
                .expect("grade exists");
            assert_eq!(updated.variant, "B");
            assert_eq!(updated.teacher_id, teacher);
        }
    }

    #[tokio::test]
    async fn test_update_missing_grade_is_none() {
        let scenario = scenario_10a().await;
        let updated = scenario
            .storage
            .update_grade(record(scenario.student.id(), scenario.math.id(), "A"))
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_set_absent_twice_reports_existing_student() {
        let scenario = scenario_10a().await;
        let id = scenario.student.id();

        assert!(scenario.storage.set_student_absent(id, true).await.unwrap());
        assert!(scenario.storage.set_student_absent(id, true).await.unwrap());
        assert!(!scenario.storage.set_student_absent(4242, true).await.unwrap());
    }
}
