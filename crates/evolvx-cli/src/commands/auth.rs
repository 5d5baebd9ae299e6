use anyhow::{Result, bail};
use chrono::{Local, NaiveDate};
use evolvx_core::api::{ProfileUpdate, RegisterRequest};
use evolvx_core::session::AuthOutcome;

use crate::app::App;

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let outcome = app.session.login(email, password).await;
    report(app, outcome).await
}

#[allow(clippy::too_many_arguments)]
pub async fn register(
    app: &App,
    username: String,
    email: String,
    password: String,
    date_of_birth: NaiveDate,
    gender: Option<String>,
    height: Option<f64>,
    weight: Option<f64>,
) -> Result<()> {
    let request = RegisterRequest {
        username,
        email,
        password,
        date_of_birth,
        gender,
        height,
        weight,
    };
    let outcome = app.session.register(&request).await;
    report(app, outcome).await
}

async fn report(app: &App, outcome: AuthOutcome) -> Result<()> {
    if !outcome.success {
        bail!(outcome.error.unwrap_or_else(|| "Authentication failed".to_string()));
    }
    if let Some(user) = app.session.user().await {
        println!("✅ Logged in as {} ({})", user.username, user.email);
    }
    Ok(())
}

pub async fn logout(app: &App) -> Result<()> {
    app.session.logout().await;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    app.require_user().await?;
    let profile = app.protected(app.client.profile()).await?;

    println!(
        "{} <{}> (id {})",
        profile.username, profile.email, profile.user_id
    );
    println!("  age:    {}", profile.age_on(Local::now().date_naive()));
    if let Some(gender) = &profile.gender {
        println!("  gender: {}", gender);
    }
    if let Some(height) = profile.height {
        println!("  height: {:.0} cm", height);
    }
    if let Some(weight) = profile.weight {
        println!("  weight: {:.1} kg", weight);
    }
    Ok(())
}

pub struct ProfileArgs {
    pub username: Option<String>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub password: Option<String>,
}

impl ProfileArgs {
    fn into_update(self) -> Result<ProfileUpdate> {
        if matches!(&self.username, Some(name) if name.trim().is_empty()) {
            bail!("Username cannot be empty");
        }
        if matches!(&self.password, Some(pw) if pw.is_empty()) {
            bail!("Password cannot be empty");
        }
        Ok(ProfileUpdate {
            username: self.username.map(|name| name.trim().to_string()),
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            password: self.password,
        })
    }
}

/// Shows the profile, applying any changed fields first.
pub async fn profile(app: &App, args: ProfileArgs) -> Result<()> {
    let update = args.into_update()?;
    if !update.is_empty() {
        app.require_user().await?;
        tracing::debug!("[Profile] Updating {:?}", update);
        let ack = app.protected(app.client.update_profile(&update)).await?;
        println!(
            "✅ {}",
            ack.message.unwrap_or_else(|| "Profile updated".to_string())
        );
    }
    whoami(app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProfileArgs {
        ProfileArgs {
            username: None,
            gender: None,
            height: None,
            weight: None,
            password: None,
        }
    }

    #[test]
    fn test_profile_args_send_only_given_fields() {
        let update = ProfileArgs {
            username: Some(" sam ".into()),
            weight: Some(79.5),
            ..args()
        }
        .into_update()
        .unwrap();

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"username": "sam", "weight": 79.5})
        );
        assert!(args().into_update().unwrap().is_empty());
    }

    #[test]
    fn test_profile_args_reject_blank_values() {
        let blank_name = ProfileArgs {
            username: Some("   ".into()),
            ..args()
        };
        assert!(blank_name.into_update().is_err());

        let blank_password = ProfileArgs {
            password: Some(String::new()),
            ..args()
        };
        assert!(blank_password.into_update().is_err());
    }
}
