use anyhow::Result;
use evolvx_core::api::{
    FriendRequestAction, FriendStatusFilter, FriendshipStatus, LeaderboardEntry, LeaderboardQuery,
    NewSharedWorkout,
};
use evolvx_core::filter::{Searchable, filter_by_query};

use crate::app::App;

pub struct LeaderboardArgs {
    pub muscle_group: String,
    pub friends: bool,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub page: u32,
    pub search: Option<String>,
}

pub async fn leaderboard(app: &App, args: LeaderboardArgs, json: bool) -> Result<()> {
    let (entries, first_position, heading) = if args.friends {
        let board = app
            .protected(app.client.friends_leaderboard(&args.muscle_group))
            .await?;
        (board.leaderboard, 1, format!("Friends · {}", board.muscle_group))
    } else {
        let query = LeaderboardQuery {
            muscle_group: args.muscle_group,
            min_age: args.min_age,
            max_age: args.max_age,
            page: args.page,
            per_page: app.config.api.page_size,
        };
        let board = app.protected(app.client.leaderboard(&query)).await?;
        let heading = format!(
            "{} · page {}/{} · {} ranked",
            board.muscle_group,
            board.current_page,
            board.pages.max(1),
            board.total
        );
        let first = first_position_on_page(board.current_page.max(1), query.per_page);
        (board.leaderboard, first, heading)
    };

    let ranked = positioned(entries, first_position, args.search.as_deref().unwrap_or(""));
    if json {
        let mut rows = Vec::with_capacity(ranked.len());
        for (position, entry) in &ranked {
            let mut row = serde_json::to_value(entry)?;
            row["position"] = serde_json::json!(position);
            rows.push(row);
        }
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{heading}");
    for (position, entry) in &ranked {
        print_entry(*position, entry);
    }
    if ranked.is_empty() {
        println!("Nobody ranked yet.");
    }
    Ok(())
}

/// Board position of the first entry on `page` (1-based).
fn first_position_on_page(page: u32, per_page: u32) -> usize {
    (page.saturating_sub(1) as usize) * per_page as usize + 1
}

/// Numbers entries by board position, then keeps those matching `query`.
fn positioned(
    entries: Vec<LeaderboardEntry>,
    first_position: usize,
    query: &str,
) -> Vec<(usize, LeaderboardEntry)> {
    let needle = query.trim().to_lowercase();
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| (first_position + index, entry))
        .filter(|(_, entry)| needle.is_empty() || entry.matches_lowercase(&needle))
        .collect()
}

fn print_entry(position: usize, entry: &LeaderboardEntry) {
    let marker = if entry.is_current_user { "→" } else { " " };
    let age = entry.age.map(|a| format!("{a}y")).unwrap_or_default();
    println!(
        "{marker}{:>3}. {:<20} {:>5} {:<8} {}",
        position, entry.username, entry.mmr_score, entry.rank_tier, age
    );
}

pub async fn friends(
    app: &App,
    status: Option<FriendStatusFilter>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let friends = app.protected(app.client.friends(status)).await?;
    let friends = filter_by_query(&friends, search.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&friends)?);
        return Ok(());
    }
    if friends.is_empty() {
        println!("No friends to show.");
        return Ok(());
    }
    for friend in &friends {
        let state = match friend.status {
            FriendshipStatus::Pending if friend.is_outgoing => "request sent",
            FriendshipStatus::Pending => "wants to be friends",
            FriendshipStatus::Accepted => "friend",
            FriendshipStatus::Rejected => "rejected",
        };
        println!(
            "#{:<5} {:<20} {:<20} {} workouts",
            friend.friendship_id, friend.username, state, friend.workout_count
        );
    }
    Ok(())
}

pub async fn add_friend(app: &App, user_id: i64) -> Result<()> {
    let ack = app.protected(app.client.send_friend_request(user_id)).await?;
    println!(
        "{} (#{})",
        ack.message.unwrap_or_else(|| "Friend request sent".to_string()),
        ack.friendship_id
    );
    Ok(())
}

pub async fn answer_friend(app: &App, friendship_id: i64, accept: bool) -> Result<()> {
    let action = if accept {
        FriendRequestAction::Accept
    } else {
        FriendRequestAction::Reject
    };
    let ack = app
        .protected(app.client.respond_friend_request(friendship_id, action))
        .await?;
    println!(
        "{}",
        ack.message.unwrap_or_else(|| "Friend request updated".to_string())
    );
    Ok(())
}

pub async fn shared(app: &App, json: bool) -> Result<()> {
    let sessions = app.protected(app.client.shared_workouts()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }
    if sessions.is_empty() {
        println!("No shared workouts.");
        return Ok(());
    }
    for session in &sessions {
        let role = if session.is_creator {
            "host"
        } else if session.is_participating {
            "joined"
        } else {
            "open"
        };
        let status = if session.is_active { "active" } else { "closed" };
        println!(
            "#{:<5} {:<24} {} · {} · {} participant(s) · by {}",
            session.shared_workout_id,
            session.workout_name,
            status,
            role,
            session.participant_count,
            session.creator_name.as_deref().unwrap_or("unknown")
        );
    }
    Ok(())
}

pub async fn host_shared(app: &App, workout_name: String) -> Result<()> {
    let ack = app
        .protected(
            app.client
                .create_shared_workout(&NewSharedWorkout { workout_name }),
        )
        .await?;
    println!(
        "{} (#{})",
        ack.message.unwrap_or_else(|| "Shared workout created".to_string()),
        ack.shared_workout_id
    );
    Ok(())
}

pub async fn join_shared(app: &App, shared_workout_id: i64) -> Result<()> {
    let ack = app
        .protected(app.client.join_shared_workout(shared_workout_id))
        .await?;
    println!(
        "{}",
        ack.message.unwrap_or_else(|| "Joined shared workout".to_string())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolvx_core::api::RankTier;

    fn entry(user_id: i64, username: &str, mmr_score: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id,
            username: username.into(),
            age: None,
            mmr_score,
            rank_tier: RankTier::from_mmr(mmr_score),
            is_current_user: false,
        }
    }

    fn page() -> Vec<LeaderboardEntry> {
        vec![
            entry(4, "ana", 1900),
            entry(9, "bo", 1800),
            entry(2, "anders", 1750),
        ]
    }

    #[test]
    fn test_second_page_continues_numbering() {
        let first = first_position_on_page(2, 20);
        assert_eq!(first, 21);

        let ranked = positioned(page(), first, "");
        let positions: Vec<usize> = ranked.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![21, 22, 23]);
    }

    #[test]
    fn test_search_keeps_board_positions() {
        let ranked = positioned(page(), 1, "  AN ");
        let kept: Vec<(usize, &str)> = ranked
            .iter()
            .map(|(p, e)| (*p, e.username.as_str()))
            .collect();
        assert_eq!(kept, vec![(1, "ana"), (3, "anders")]);
    }
}
