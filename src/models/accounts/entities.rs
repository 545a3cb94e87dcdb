use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学科，与班级的教师槽位一一对应
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "account.ts")]
pub enum Subject {
    Math,
    Physics,
    Biology,
    Romanian,
    English,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Math,
        Subject::Physics,
        Subject::Biology,
        Subject::Romanian,
        Subject::English,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Physics => "physics",
            Subject::Biology => "biology",
            Subject::Romanian => "romanian",
            Subject::English => "english",
        }
    }
}

impl<'de> Deserialize<'de> for Subject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Subject>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的学科: '{s}'. 支持的学科: math, physics, biology, romanian, english"
            ))
        })
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| format!("Invalid subject: {s}"))
    }
}

// 账号角色标签
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "account.ts")]
pub enum AccountRole {
    Profesor,
    Student,
}

impl AccountRole {
    pub const PROFESOR: &'static str = "profesor";
    pub const STUDENT: &'static str = "student";
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Profesor => write!(f, "{}", AccountRole::PROFESOR),
            AccountRole::Student => write!(f, "{}", AccountRole::STUDENT),
        }
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AccountRole::PROFESOR => Ok(AccountRole::Profesor),
            AccountRole::STUDENT => Ok(AccountRole::Student),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

// 基础身份
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: AccountRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 教师
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct Teacher {
    #[serde(flatten)]
    pub account: Account,
    pub is_admin: bool,
    pub subject: Subject,
}

impl Teacher {
    pub fn id(&self) -> i64 {
        self.account.id
    }
}

// 学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct Student {
    #[serde(flatten)]
    pub account: Account,
    pub class_name: String,
    pub exam: Option<String>,
    pub absent: bool,
}

impl Student {
    pub fn id(&self) -> i64 {
        self.account.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_parse() {
        assert_eq!("math".parse::<Subject>(), Ok(Subject::Math));
        assert_eq!("english".parse::<Subject>(), Ok(Subject::English));
        assert!("chemistry".parse::<Subject>().is_err());
    }

    #[test]
    fn test_subject_deserialize_rejects_unknown() {
        let parsed: Result<Subject, _> = serde_json::from_str("\"biology\"");
        assert_eq!(parsed.unwrap(), Subject::Biology);
        let parsed: Result<Subject, _> = serde_json::from_str("\"history\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_role_tag() {
        assert_eq!(AccountRole::Profesor.to_string(), "profesor");
        assert_eq!("student".parse::<AccountRole>(), Ok(AccountRole::Student));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let account = Account {
            id: 1,
            name: "Ion".into(),
            surname: "Popescu".into(),
            username: "Ion_Popescu".into(),
            email: "ion@school.ro".into(),
            password_hash: "$argon2id$secret".into(),
            role: AccountRole::Student,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
