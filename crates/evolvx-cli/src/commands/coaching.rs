use anyhow::Result;
use evolvx_core::api::{ApiError, AvatarUpdate, ProgressPeriod};

use crate::app::{App, describe};

pub async fn progress(app: &App, period: ProgressPeriod, json: bool) -> Result<()> {
    let report = app.protected(app.client.progress(period)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if !report.has_data() {
        println!(
            "{}",
            report
                .message
                .as_deref()
                .unwrap_or("No workout data available for the selected period")
        );
        return Ok(());
    }

    println!(
        "Last {}: {} workout(s), {:.0} kg total volume",
        period.as_str(),
        report.total_workouts,
        report.total_volume
    );
    for group in &report.muscle_groups {
        let tier = group
            .rank_tier
            .as_ref()
            .map(|t| format!(" · {t}"))
            .unwrap_or_default();
        println!(
            "  {:<10} {:>8.0} kg {:>5.1}%{}",
            group.muscle_group, group.volume, group.percentage, tier
        );
    }
    Ok(())
}

pub async fn recommend(app: &App, json: bool) -> Result<()> {
    let recs = app.protected(app.client.recommendations()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recs)?);
        return Ok(());
    }
    if recs.recommendations.is_empty() {
        println!(
            "{}",
            recs.message
                .as_deref()
                .unwrap_or("No recommendations yet. Log a few workouts first.")
        );
        return Ok(());
    }
    for rec in &recs.recommendations {
        println!("{} ({}, {} MMR)", rec.muscle_group, rec.rank_tier, rec.mmr_score);
        println!("  {}", rec.message);
        for exercise in &rec.recommended_exercises {
            println!("  - {}", exercise.name);
        }
    }
    Ok(())
}

pub async fn rankings(app: &App, user_id: Option<i64>, json: bool) -> Result<()> {
    let user_id = match user_id {
        Some(id) => id,
        None => app.require_user().await?.id,
    };
    let rankings = app.protected(app.client.user_rankings(user_id)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
        return Ok(());
    }
    if rankings.is_empty() {
        println!("No rankings yet.");
    }
    for ranking in &rankings {
        println!(
            "{:<10} {:<8} {:>5} MMR",
            ranking.muscle_group, ranking.rank_tier, ranking.mmr_score
        );
    }
    Ok(())
}

pub async fn avatar(app: &App, user_id: Option<i64>, update: AvatarUpdate, json: bool) -> Result<()> {
    let user_id = match user_id {
        Some(id) => id,
        None => app.require_user().await?.id,
    };

    if update != AvatarUpdate::default() {
        let ack = app
            .protected(app.client.update_avatar(user_id, &update))
            .await?;
        println!(
            "{}",
            ack.message.unwrap_or_else(|| "Avatar updated".to_string())
        );
    }

    let avatar = match app.session.guard(app.client.avatar(user_id)).await {
        Err(ApiError::Server { status: 404, .. }) => {
            println!("No avatar found for this user.");
            return Ok(());
        }
        other => other.map_err(describe)?,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&avatar)?);
        return Ok(());
    }

    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("Avatar of user {}", avatar.user_id);
    println!("  body:        {}", field(&avatar.body_type));
    println!("  hair:        {} ({})", field(&avatar.hair_style), field(&avatar.hair_color));
    println!("  skin tone:   {}", field(&avatar.skin_tone));
    println!("  outfit:      {}", field(&avatar.outfit));
    if !avatar.accessories.is_empty() {
        println!("  accessories: {}", avatar.accessories.join(", "));
    }
    Ok(())
}
