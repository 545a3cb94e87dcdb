//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    pub math_teacher_id: Option<i64>,
    pub physics_teacher_id: Option<i64>,
    pub biology_teacher_id: Option<i64>,
    pub romanian_teacher_id: Option<i64>,
    pub english_teacher_id: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{Class, SubjectSlots};
        use chrono::{DateTime, Utc};

        Class {
            name: self.name,
            slots: SubjectSlots {
                math: self.math_teacher_id,
                physics: self.physics_teacher_id,
                biology: self.biology_teacher_id,
                romanian: self.romanian_teacher_id,
                english: self.english_teacher_id,
            },
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
