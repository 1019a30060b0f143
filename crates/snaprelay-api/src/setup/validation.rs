//! Configuration validation
//!
//! Startup checks layered on top of [`Config::validate`] that depend on the deployment
//! environment. Hard errors abort startup; risky but workable settings only warn.

use anyhow::Result;
use snaprelay_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if !config.smtp_tls().is_encrypted() {
        if is_production {
            return Err(anyhow::anyhow!(
                "SMTP_TLS=none is not allowed in production: credentials and attachments would travel in clear text"
            ));
        }
        tracing::warn!(
            smtp_host = %config.smtp_host(),
            "SMTP_TLS=none - mail is sent unencrypted"
        );
    }

    if config.max_upload_size_bytes() > 100 * 1024 * 1024 {
        tracing::warn!(
            max_upload_size_bytes = config.max_upload_size_bytes(),
            "MAX_UPLOAD_SIZE_MB is above 100 - most SMTP relays reject messages this large"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}
