use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Subject;

// 创建教师请求
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct CreateTeacherRequest {
    pub name: String,
    pub surname: String,
    // 缺省时使用 <name>_<surname>
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
    // 缺省时自动生成一次性密码
    #[serde(default)]
    pub password: Option<String>,
    pub subject: Subject,
}

// 班级中的单个学生条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct PupilSpec {
    // 缺失字段为空串，由校验逐条拒绝
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub exam: Option<String>,
}

// 批量条目：无法解析为 PupilSpec 的原样保留，以便单独跳过
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "account.ts")]
pub enum PupilEntry {
    Spec(PupilSpec),
    Malformed(serde_json::Value),
}

impl From<PupilSpec> for PupilEntry {
    fn from(spec: PupilSpec) -> Self {
        PupilEntry::Spec(spec)
    }
}

impl PupilEntry {
    /// 用于日志与跳过列表的标识
    pub fn label(&self) -> String {
        match self {
            PupilEntry::Spec(spec) => format!("{} {}", spec.name.trim(), spec.surname.trim()),
            PupilEntry::Malformed(value) => {
                let field = |key: &str| value.get(key).and_then(|v| v.as_str()).unwrap_or("");
                format!("{} {}", field("name").trim(), field("surname").trim())
            }
        }
    }
}

// 设置缺席状态
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "account.ts")]
pub struct SetAbsentRequest {
    pub absent: bool,
}

// 存储层写入用的账号数据，密码已哈希
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub account: NewAccount,
    pub is_admin: bool,
    pub subject: Subject,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub account: NewAccount,
    pub class_name: String,
    pub exam: Option<String>,
}
