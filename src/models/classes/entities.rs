use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::accounts::entities::Subject;

// 每个学科一个教师槽位
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "class.ts")]
pub struct SubjectSlots {
    pub math: Option<i64>,
    pub physics: Option<i64>,
    pub biology: Option<i64>,
    pub romanian: Option<i64>,
    pub english: Option<i64>,
}

impl SubjectSlots {
    pub fn get(&self, subject: Subject) -> Option<i64> {
        match subject {
            Subject::Math => self.math,
            Subject::Physics => self.physics,
            Subject::Biology => self.biology,
            Subject::Romanian => self.romanian,
            Subject::English => self.english,
        }
    }

    /// 已分配的教师 ID
    pub fn assigned(&self) -> impl Iterator<Item = i64> + '_ {
        Subject::ALL.into_iter().filter_map(|s| self.get(s))
    }

    /// 教师是否占用任一槽位
    pub fn contains(&self, teacher_id: i64) -> bool {
        self.assigned().any(|id| id == teacher_id)
    }
}

// 班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "class.ts")]
pub struct Class {
    pub name: String,
    pub slots: SubjectSlots,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    pub fn is_taught_by(&self, teacher_id: i64) -> bool {
        self.slots.contains(teacher_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_membership() {
        let slots = SubjectSlots {
            math: Some(7),
            english: Some(12),
            ..Default::default()
        };
        assert!(slots.contains(7));
        assert!(slots.contains(12));
        assert!(!slots.contains(9));
        assert_eq!(slots.assigned().collect::<Vec<_>>(), vec![7, 12]);
    }

    #[test]
    fn test_empty_class_has_no_teachers() {
        let class = Class {
            name: "9B".into(),
            slots: SubjectSlots::default(),
            created_at: chrono::Utc::now(),
        };
        assert!(!class.is_taught_by(1));
    }
}
