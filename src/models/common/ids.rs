//! 统一的实体 ID 类型
//!
//! 所有 ID（用户、作业、提交）都是 UUID，内部统一保存为小写连字符格式
//! （固定 36 个字符）。任何来自外部的 ID 文本（令牌 subject、路径参数、
//! 请求体、数据库列）都必须先经过 `parse` 归一化后才能参与比较。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// ID 解析失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError {
    pub kind: &'static str,
    pub raw: String,
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "无效的{} ID: '{}'", self.kind, self.raw)
    }
}

impl std::error::Error for IdParseError {}

/// 定义 ID 新类型的宏
///
/// 每个类型只能通过 `generate` 或 `parse` 构造，保证内部表示始终是归一化后的形式。
macro_rules! define_entity_ids {
    ($(
        $(#[$meta:meta])*
        $name:ident => $kind:literal
    ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
            #[ts(export, export_to = "ids.ts")]
            pub struct $name(String);

            impl $name {
                /// 生成新的随机 ID
                pub fn generate() -> Self {
                    Self(Uuid::new_v4().hyphenated().to_string())
                }

                /// 解析并归一化外部输入的 ID
                pub fn parse(raw: &str) -> Result<Self, IdParseError> {
                    Uuid::parse_str(raw.trim())
                        .map(|uuid| Self(uuid.hyphenated().to_string()))
                        .map_err(|_| IdParseError {
                            kind: $kind,
                            raw: raw.to_string(),
                        })
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<Uuid> for $name {
                fn from(uuid: Uuid) -> Self {
                    Self(uuid.hyphenated().to_string())
                }
            }

            impl FromStr for $name {
                type Err = IdParseError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse(s)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    let s = String::deserialize(deserializer)?;
                    Self::parse(&s).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

define_entity_ids! {
    /// 用户 ID（令牌中的 subject）
    UserId => "用户",
    /// 作业 ID
    AssignmentId => "作业",
    /// 提交 ID
    SubmissionId => "提交",
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "6f1c2d8e-3b4a-4c5d-9e8f-0a1b2c3d4e5f";

    #[test]
    fn test_parse_normalizes_representations() {
        let forms = [
            CANONICAL,
            "6F1C2D8E-3B4A-4C5D-9E8F-0A1B2C3D4E5F",
            "6f1c2d8e3b4a4c5d9e8f0a1b2c3d4e5f",
            "{6f1c2d8e-3b4a-4c5d-9e8f-0a1b2c3d4e5f}",
            "urn:uuid:6f1c2d8e-3b4a-4c5d-9e8f-0a1b2c3d4e5f",
            "  6f1c2d8e-3b4a-4c5d-9e8f-0a1b2c3d4e5f ",
        ];
        for form in forms {
            let id = UserId::parse(form).unwrap();
            assert_eq!(id.as_str(), CANONICAL, "form: {form}");
        }
    }

    #[test]
    fn test_equal_after_normalization() {
        let a = AssignmentId::parse(CANONICAL).unwrap();
        let b = AssignmentId::parse(&CANONICAL.to_uppercase()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_non_uuid() {
        let err = UserId::parse("64f0c2a9e13b2a0012345678").unwrap_err();
        assert_eq!(err.kind, "用户");
        assert!(AssignmentId::parse("").is_err());
        assert!(AssignmentId::parse("not-an-id").is_err());
    }

    #[test]
    fn test_generated_ids_are_canonical() {
        let id = SubmissionId::generate();
        assert_eq!(id.as_str().len(), 36);
        assert_eq!(SubmissionId::parse(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_serde_uses_normalized_form() {
        let id: UserId =
            serde_json::from_str("\"6F1C2D8E3B4A4C5D9E8F0A1B2C3D4E5F\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{CANONICAL}\""));
        assert!(serde_json::from_str::<UserId>("\"nope\"").is_err());
    }
}
