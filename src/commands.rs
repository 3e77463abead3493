//! CLI command handlers.
//!
//! Each handler runs one use case and returns a printable report, so the
//! binary only decides where the output goes.

use std::fmt;

use clap::Subcommand;
use gc_app::usecases::onboarding::CheckpointManager;
use gc_app::usecases::profile::NotificationPreference;
use gc_app::usecases::{Login, Logout, OnboardingFlow};
use gc_app::{AppDeps, LocalStore, SessionStore};
use gc_core::{OnboardingStep, Route};
use tracing::{info, info_span, Instrument};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decide which screen the app opens on
    Resume,
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out; onboarding progress is kept
    Logout,
    /// Show the stored session and onboarding checkpoint
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub username: Option<String>,
    pub signed_in: bool,
    pub checkpoint: Option<OnboardingStep>,
    pub notifications_enabled: bool,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.username, self.signed_in) {
            (Some(user), true) => writeln!(f, "signed in as {user}")?,
            (None, true) => writeln!(f, "signed in")?,
            _ => writeln!(f, "not signed in")?,
        }
        match self.checkpoint {
            Some(step) => writeln!(
                f,
                "onboarding checkpoint: {step} ({:.0}%)",
                step.progress() * 100.0
            )?,
            None => writeln!(f, "onboarding checkpoint: none")?,
        }
        write!(
            f,
            "notifications: {}",
            if self.notifications_enabled { "on" } else { "off" }
        )
    }
}

pub async fn run(command: Command, deps: AppDeps) -> anyhow::Result<String> {
    let span = info_span!("command.run", command = command_name(&command));
    async move {
        match command {
            Command::Resume => Ok(resume(deps).await.to_string()),
            Command::Login { username, password } => login(deps, &username, &password).await,
            Command::Logout => {
                logout(deps).await;
                Ok("signed out".to_string())
            }
            Command::Status => Ok(status(&deps).await.to_string()),
        }
    }
    .instrument(span)
    .await
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Resume => "resume",
        Command::Login { .. } => "login",
        Command::Logout => "logout",
        Command::Status => "status",
    }
}

pub async fn resume(deps: AppDeps) -> Route {
    let route = OnboardingFlow::new(deps).resume().execute().await;
    info!(%route, "resume route resolved");
    route
}

pub async fn login(deps: AppDeps, username: &str, password: &str) -> anyhow::Result<String> {
    let sessions = SessionStore::new(LocalStore::new(deps.store.clone()));
    let session = Login::new(deps.auth_api.clone(), sessions)
        .execute(username, password)
        .await?;
    let who = session.username.unwrap_or_else(|| username.to_string());
    Ok(format!("signed in as {who}"))
}

pub async fn logout(deps: AppDeps) {
    let sessions = SessionStore::new(LocalStore::new(deps.store.clone()));
    Logout::new(deps.auth_api.clone(), sessions).execute().await;
}

pub async fn status(deps: &AppDeps) -> StatusReport {
    let store = LocalStore::new(deps.store.clone());
    let session = SessionStore::new(store.clone()).load().await;
    let checkpoint = CheckpointManager::new(store.clone(), &session)
        .get_progress()
        .await;
    let notifications_enabled = NotificationPreference::new(store).is_enabled().await;

    StatusReport {
        signed_in: session.is_authenticated(),
        username: session.username,
        checkpoint,
        notifications_enabled,
    }
}
