//! Typed records for the remote REST API.
//!
//! Every endpoint's success and error payloads have an explicit type here and
//! are deserialized at the HTTP boundary. Field names follow the wire format.

pub mod auth;
pub mod avatar;
pub mod coaching;
pub mod error;
pub mod profile;
pub mod ranking;
pub mod social;
pub mod wire;

pub use auth::{AuthApi, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use avatar::{Avatar, AvatarAck, AvatarUpdate};
pub use coaching::{
    MuscleGroupProgress, ProgressPeriod, ProgressReport, Recommendation, Recommendations,
    RecommendedExercise,
};
pub use error::{ApiError, ApiErrorBody};
pub use profile::{MessageResponse, Profile, ProfileUpdate};
pub use ranking::{
    FriendsLeaderboard, Leaderboard, LeaderboardEntry, LeaderboardQuery, OVERALL, RankTier,
    UserRanking,
};
pub use social::{
    Friend, FriendRequest, FriendRequestAction, FriendRequestReply, FriendStatusFilter,
    FriendshipAck, FriendshipStatus, NewSharedWorkout, SharedParticipant, SharedWorkout,
    SharedWorkoutAck,
};
