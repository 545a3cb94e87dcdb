use super::{SeaOrmStorage, classify_write_error};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{EvaluareError, Result};
use crate::models::classes::entities::{Class, SubjectSlots};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, name: &str, slots: SubjectSlots) -> Result<Class> {
        let txn = self.begin_write().await?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(name.to_string()),
            math_teacher_id: Set(slots.math),
            physics_teacher_id: Set(slots.physics),
            biology_teacher_id: Set(slots.biology),
            romanian_teacher_id: Set(slots.romanian),
            english_teacher_id: Set(slots.english),
            created_at: Set(now),
        };

        let result = model
            .insert(&*txn)
            .await
            .map_err(|e| classify_write_error(e, "创建班级"))?;

        txn.commit().await?;

        Ok(result.into_class())
    }

    /// 通过名称获取班级
    pub async fn get_class_by_name_impl(&self, name: &str) -> Result<Option<Class>> {
        let result = Classes::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出教师占用任一学科槽位的班级
    pub async fn list_class_names_for_teacher_impl(&self, teacher_id: i64) -> Result<Vec<String>> {
        let classes = Classes::find()
            .filter(
                Condition::any()
                    .add(Column::MathTeacherId.eq(teacher_id))
                    .add(Column::PhysicsTeacherId.eq(teacher_id))
                    .add(Column::BiologyTeacherId.eq(teacher_id))
                    .add(Column::RomanianTeacherId.eq(teacher_id))
                    .add(Column::EnglishTeacherId.eq(teacher_id)),
            )
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvaluareError::database_operation(format!("查询教师班级失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.name).collect())
    }
}
