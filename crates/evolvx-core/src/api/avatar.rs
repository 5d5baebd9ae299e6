//! Avatar customization records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::wire::{null_as_default, optional_timestamp};

/// Response of `GET /avatar/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub avatar_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub hair_style: Option<String>,
    #[serde(default)]
    pub hair_color: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub outfit: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessories: Vec<String>,
    #[serde(default, with = "optional_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of `PUT /avatar/{user_id}`. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessories: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarAck {
    pub avatar_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_accessories_become_empty() {
        let avatar: Avatar =
            serde_json::from_str(r#"{"avatar_id": 1, "user_id": 1, "accessories": null}"#).unwrap();
        assert!(avatar.accessories.is_empty());
    }

    #[test]
    fn test_avatar_with_null_fields() {
        let avatar: Avatar = serde_json::from_str(
            r#"{"avatar_id": 2, "user_id": 5, "body_type": "athletic", "hair_style": null,
                "hair_color": "black", "skin_tone": null, "outfit": "tracksuit",
                "accessories": ["headband"], "updated_at": "2026-10-02T09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(avatar.accessories, vec!["headband".to_string()]);
        assert!(avatar.hair_style.is_none());
    }
}
