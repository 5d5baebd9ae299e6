//! Typed operations for every backend endpoint.

use async_trait::async_trait;
use evolvx_core::api::{
    ApiError, AuthApi, Avatar, AvatarAck, AvatarUpdate, Friend, FriendRequest,
    FriendRequestAction, FriendRequestReply, FriendStatusFilter, FriendsLeaderboard, FriendshipAck,
    Leaderboard, LeaderboardQuery, LoginRequest, LoginResponse, MessageResponse, NewSharedWorkout,
    Profile, ProfileUpdate, ProgressPeriod, ProgressReport, Recommendations, RegisterRequest,
    RegisterResponse, SharedWorkout, SharedWorkoutAck, UserRanking,
};
use evolvx_core::workout::{
    Exercise, NewWorkout, WorkoutAck, WorkoutFeed, WorkoutPage, WorkoutSummary, WorkoutUpdate,
};
use reqwest::Method;

use crate::client::{ApiClient, empty_unless_unauthorized};

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send_json(Method::POST, "auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.send_json(Method::POST, "auth/register", request).await
    }
}

#[async_trait]
impl WorkoutFeed for ApiClient {
    async fn workouts_page(&self, page: u32, per_page: u32) -> Result<WorkoutPage, ApiError> {
        self.workouts(page, per_page).await
    }
}

// ============================================================================
// Profile
// ============================================================================

impl ApiClient {
    pub async fn profile(&self) -> Result<Profile, ApiError> {
        self.get("auth/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<MessageResponse, ApiError> {
        self.send_json(Method::PUT, "auth/profile", update).await
    }
}

// ============================================================================
// Workouts and exercises
// ============================================================================

impl ApiClient {
    /// One page of the current user's workouts, newest first.
    pub async fn workouts(&self, page: u32, per_page: u32) -> Result<WorkoutPage, ApiError> {
        self.get_with_query("workouts", &[("page", page), ("per_page", per_page)])
            .await
    }

    pub async fn workout(&self, workout_id: i64) -> Result<WorkoutSummary, ApiError> {
        self.get(&format!("workouts/{workout_id}")).await
    }

    pub async fn create_workout(&self, workout: &NewWorkout) -> Result<WorkoutAck, ApiError> {
        self.send_json(Method::POST, "workouts", workout).await
    }

    /// Partial edit of a workout owned by the current user.
    pub async fn update_workout(
        &self,
        workout_id: i64,
        update: &WorkoutUpdate,
    ) -> Result<WorkoutAck, ApiError> {
        self.send_json(Method::PUT, &format!("workouts/{workout_id}"), update)
            .await
    }

    pub async fn delete_workout(&self, workout_id: i64) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("workouts/{workout_id}")).await
    }

    /// Exercise catalogue, optionally narrowed server-side.
    pub async fn exercises(
        &self,
        muscle_group: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Exercise>, ApiError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(group) = muscle_group {
            query.push(("muscle_group", group));
        }
        if let Some(search) = search {
            query.push(("search", search));
        }
        self.get_with_query("exercises", &query).await
    }
}

// ============================================================================
// Rankings and coaching
// ============================================================================

impl ApiClient {
    pub async fn user_rankings(&self, user_id: i64) -> Result<Vec<UserRanking>, ApiError> {
        self.get(&format!("rankings/user/{user_id}")).await
    }

    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> Result<Leaderboard, ApiError> {
        self.get_with_query("rankings/leaderboard", query).await
    }

    pub async fn friends_leaderboard(
        &self,
        muscle_group: &str,
    ) -> Result<FriendsLeaderboard, ApiError> {
        self.get_with_query("rankings/leaderboard/friends", &[("muscle_group", muscle_group)])
            .await
    }

    pub async fn recommendations(&self) -> Result<Recommendations, ApiError> {
        self.get("coaching/recommendations").await
    }

    pub async fn progress(&self, period: ProgressPeriod) -> Result<ProgressReport, ApiError> {
        self.get_with_query("coaching/progress", &[("period", period.as_str())])
            .await
    }
}

// ============================================================================
// Social
// ============================================================================

impl ApiClient {
    /// Friend list. Failures other than 401 yield an empty list.
    pub async fn friends(
        &self,
        status: Option<FriendStatusFilter>,
    ) -> Result<Vec<Friend>, ApiError> {
        let query: Vec<(&str, &str)> = status
            .map(|s| vec![("status", s.as_str())])
            .unwrap_or_default();
        let result = self.get_with_query("social/friends", &query).await;
        empty_unless_unauthorized("GET /social/friends", result)
    }

    pub async fn send_friend_request(&self, friend_id: i64) -> Result<FriendshipAck, ApiError> {
        self.send_json(
            Method::POST,
            "social/friends/request",
            &FriendRequest { friend_id },
        )
        .await
    }

    pub async fn respond_friend_request(
        &self,
        friendship_id: i64,
        action: FriendRequestAction,
    ) -> Result<FriendshipAck, ApiError> {
        self.send_json(
            Method::PUT,
            &format!("social/friends/request/{friendship_id}"),
            &FriendRequestReply { action },
        )
        .await
    }

    /// Shared workouts visible to the user. Failures other than 401 yield an
    /// empty list.
    pub async fn shared_workouts(&self) -> Result<Vec<SharedWorkout>, ApiError> {
        let result = self.get("social/shared-workouts").await;
        empty_unless_unauthorized("GET /social/shared-workouts", result)
    }

    pub async fn create_shared_workout(
        &self,
        workout: &NewSharedWorkout,
    ) -> Result<SharedWorkoutAck, ApiError> {
        self.send_json(Method::POST, "social/shared-workouts", workout)
            .await
    }

    pub async fn join_shared_workout(
        &self,
        shared_workout_id: i64,
    ) -> Result<SharedWorkoutAck, ApiError> {
        self.send_json(
            Method::POST,
            &format!("social/shared-workouts/{shared_workout_id}/join"),
            &serde_json::json!({}),
        )
        .await
    }
}

// ============================================================================
// Avatar
// ============================================================================

impl ApiClient {
    pub async fn avatar(&self, user_id: i64) -> Result<Avatar, ApiError> {
        self.get(&format!("avatar/{user_id}")).await
    }

    pub async fn update_avatar(
        &self,
        user_id: i64,
        update: &AvatarUpdate,
    ) -> Result<AvatarAck, ApiError> {
        self.send_json(Method::PUT, &format!("avatar/{user_id}"), update)
            .await
    }
}
