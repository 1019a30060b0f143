//! Application setup and initialization
//!
//! Everything between a loaded [`Config`] and a ready [`axum::Router`].

pub mod routes;
pub mod server;
pub mod validation;

use crate::services::{MailTransport, SmtpMailer};
use crate::state::AppState;
use anyhow::{Context, Result};
use snaprelay_core::Config;
use std::sync::Arc;

/// Initialize the entire application
///
/// Tracing must already be installed; see [`crate::telemetry::init_telemetry`].
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let mailer = SmtpMailer::from_config(&config).context("Failed to build SMTP transport")?;

    initialize_with_transport(config, Arc::new(mailer))
}

/// Wire state and routes around an arbitrary mail transport.
pub fn initialize_with_transport(
    config: Config,
    transport: Arc<dyn MailTransport>,
) -> Result<(Arc<AppState>, axum::Router)> {
    let state = Arc::new(AppState::new(config.clone(), transport));
    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
