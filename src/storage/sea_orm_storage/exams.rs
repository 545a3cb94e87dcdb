use super::{SeaOrmStorage, classify_write_error};
use crate::entity::exams::ActiveModel as ExamActiveModel;
use crate::entity::exercises::{
    ActiveModel as ExerciseActiveModel, Column as ExerciseColumn, Entity as Exercises,
};
use crate::errors::{EvaluareError, Result};
use crate::models::{
    accounts::entities::Subject,
    exams::{
        entities::{Exam, Exercise},
        requests::ExerciseSpec,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建考试
    pub async fn create_exam_impl(&self, name: &str) -> Result<Exam> {
        let txn = self.begin_write().await?;

        let model = ExamActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&*txn)
            .await
            .map_err(|e| classify_write_error(e, "创建考试"))?;

        txn.commit().await?;

        Ok(result.into_exam())
    }

    /// 为考试添加练习，变体按原顺序存为 JSON 数组
    pub async fn create_exercise_impl(&self, exam: &str, spec: ExerciseSpec) -> Result<Exercise> {
        let variants = serde_json::to_string(&spec.variants)?;

        let txn = self.begin_write().await?;

        Exercises::insert(ExerciseActiveModel {
            exam: Set(exam.to_string()),
            number: Set(spec.number),
            subject: Set(spec.subject.to_string()),
            variants: Set(variants),
            max_score: Set(spec.max_score),
        })
        .exec_without_returning(&*txn)
        .await
        .map_err(|e| classify_write_error(e, "创建练习"))?;

        txn.commit().await?;

        Ok(Exercise {
            exam: exam.to_string(),
            number: spec.number,
            subject: spec.subject,
            variants: spec.variants,
            max_score: spec.max_score,
        })
    }

    /// 通过 (考试, 编号) 获取练习
    pub async fn get_exercise_impl(&self, exam: &str, number: i32) -> Result<Option<Exercise>> {
        let result = Exercises::find_by_id((exam.to_string(), number))
            .one(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询练习失败: {e}")))?;

        result.map(|m| m.into_exercise()).transpose()
    }

    /// 列出考试中指定学科的练习
    pub async fn list_exercises_impl(&self, exam: &str, subject: Subject) -> Result<Vec<Exercise>> {
        let exercises = Exercises::find()
            .filter(ExerciseColumn::Exam.eq(exam))
            .filter(ExerciseColumn::Subject.eq(subject.as_str()))
            .order_by_asc(ExerciseColumn::Number)
            .all(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询练习列表失败: {e}")))?;

        exercises.into_iter().map(|m| m.into_exercise()).collect()
    }
}
