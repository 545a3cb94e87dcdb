//! 练习实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub exam: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub number: i32,
    pub subject: String,
    /// 有序 JSON 数组
    #[sea_orm(column_type = "Text")]
    pub variants: String,
    pub max_score: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::Exam",
        to = "super::exams::Column::Name"
    )]
    Exam,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exercise(self) -> crate::errors::Result<crate::models::exams::entities::Exercise> {
        use crate::models::accounts::entities::Subject;
        use crate::models::exams::entities::Exercise;

        let variants: Vec<String> = serde_json::from_str(&self.variants)?;
        let subject = self.subject.parse::<Subject>().map_err(|e| {
            crate::errors::EvaluareError::serialization(format!("练习学科无效: {e}"))
        })?;

        Ok(Exercise {
            exam: self.exam,
            number: self.number,
            subject,
            variants,
            max_score: self.max_score,
        })
    }
}
