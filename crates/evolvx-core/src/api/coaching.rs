//! Coaching endpoint records.

use serde::{Deserialize, Serialize};

use super::ranking::RankTier;
use super::wire::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressPeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl ProgressPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressPeriod::Week => "week",
            ProgressPeriod::Month => "month",
            ProgressPeriod::Year => "year",
        }
    }
}

impl std::str::FromStr for ProgressPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("invalid period '{other}' (week, month, year)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedExercise {
    pub exercise_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_compound: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub muscle_group: String,
    pub rank_tier: RankTier,
    pub mmr_score: i64,
    pub message: String,
    #[serde(default)]
    pub recommended_exercises: Vec<RecommendedExercise>,
}

/// Response of `GET /coaching/recommendations`.
///
/// Without ranking data the backend answers `{message}` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupProgress {
    pub muscle_group: String,
    pub volume: f64,
    pub percentage: f64,
    #[serde(default)]
    pub rank_tier: Option<RankTier>,
    #[serde(default)]
    pub mmr_score: Option<i64>,
}

/// Response of `GET /coaching/progress`.
///
/// Without workouts in the period the backend answers `{message}` only, so
/// every metric is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    #[serde(default)]
    pub period: Option<ProgressPeriod>,
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub total_volume: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub muscle_groups: Vec<MuscleGroupProgress>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProgressReport {
    pub fn has_data(&self) -> bool {
        self.total_workouts > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_progress_message() {
        let report: ProgressReport = serde_json::from_str(
            r#"{"message": "No workout data available for the selected period"}"#,
        )
        .unwrap();
        assert!(!report.has_data());
        assert!(report.muscle_groups.is_empty());
    }

    #[test]
    fn test_full_progress_report() {
        let report: ProgressReport = serde_json::from_str(
            r#"{"period": "week", "total_workouts": 3, "total_volume": 5400,
                "muscle_groups": [
                    {"muscle_group": "legs", "volume": 3600, "percentage": 66.6,
                     "rank_tier": "Silver", "mmr_score": 640},
                    {"muscle_group": "chest", "volume": 1800, "percentage": 33.3}
                ]}"#,
        )
        .unwrap();

        assert_eq!(report.period, Some(ProgressPeriod::Week));
        assert_eq!(report.muscle_groups[0].rank_tier, Some(RankTier::Silver));
        assert!(report.muscle_groups[1].mmr_score.is_none());
    }

    #[test]
    fn test_recommendations_without_data() {
        let recs: Recommendations = serde_json::from_str(
            r#"{"message": "No workout data available for recommendations"}"#,
        )
        .unwrap();
        assert!(recs.recommendations.is_empty());
        assert!(recs.message.is_some());
    }
}
