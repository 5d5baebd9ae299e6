//! Friends and shared-workout records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::wire::{optional_timestamp, timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// `status` query parameter of `GET /social/friends`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendStatusFilter {
    #[default]
    Accepted,
    Pending,
    All,
}

impl FriendStatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            FriendStatusFilter::Accepted => "accepted",
            FriendStatusFilter::Pending => "pending",
            FriendStatusFilter::All => "all",
        }
    }
}

impl std::str::FromStr for FriendStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accepted" => Ok(Self::Accepted),
            "pending" => Ok(Self::Pending),
            "all" => Ok(Self::All),
            other => Err(format!("unknown friend status '{other}' (accepted, pending, all)")),
        }
    }
}

/// Entry of `GET /social/friends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub friendship_id: i64,
    pub user_id: i64,
    pub username: String,
    pub status: FriendshipStatus,
    /// True when the current user sent the request.
    #[serde(default)]
    pub is_outgoing: bool,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub workout_count: u32,
    #[serde(default)]
    pub online_status: Option<String>,
    #[serde(default)]
    pub last_active: Option<String>,
}

/// Body of `POST /social/friends/request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub friend_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestAction {
    Accept,
    Reject,
}

/// Body of `PUT /social/friends/request/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequestReply {
    pub action: FriendRequestAction,
}

/// Acknowledgement of friend request operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendshipAck {
    pub friendship_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedParticipant {
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub joined_at: Option<String>,
    #[serde(default)]
    pub exercises_completed: u32,
}

/// Entry of `GET /social/shared-workouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedWorkout {
    pub shared_workout_id: i64,
    pub workout_name: String,
    pub creator_id: i64,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(with = "timestamp")]
    pub workout_date: NaiveDateTime,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default)]
    pub is_participating: bool,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub participants: Vec<SharedParticipant>,
}

/// Body of `POST /social/shared-workouts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSharedWorkout {
    pub workout_name: String,
}

/// Acknowledgement of shared-workout create/join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedWorkoutAck {
    pub shared_workout_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friend_deserialization() {
        let friends: Vec<Friend> = serde_json::from_str(
            r#"[{"friendship_id": 4, "user_id": 9, "username": "kai", "status": "accepted",
                 "is_outgoing": false, "created_at": "2026-09-01T10:00:00",
                 "workout_count": 14, "online_status": "unknown", "last_active": null}]"#,
        )
        .unwrap();

        assert_eq!(friends[0].status, FriendshipStatus::Accepted);
        assert_eq!(friends[0].workout_count, 14);
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!("ALL".parse::<FriendStatusFilter>(), Ok(FriendStatusFilter::All));
        assert!("blocked".parse::<FriendStatusFilter>().is_err());
        assert_eq!(FriendStatusFilter::default().as_str(), "accepted");
    }

    #[test]
    fn test_reply_wire_format() {
        let reply = FriendRequestReply {
            action: FriendRequestAction::Accept,
        };
        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            serde_json::json!({ "action": "accept" })
        );
    }
}
