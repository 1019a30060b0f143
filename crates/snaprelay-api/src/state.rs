//! Application state shared by all handlers.
//!
//! Everything in here is derived from [`Config`] once at startup and is read-only
//! afterwards; requests share no mutable state.

use std::sync::Arc;

use snaprelay_core::Config;

use crate::services::{MailTransport, UploadRelayService};

/// Limits and switches applied while parsing an upload.
#[derive(Clone, Debug)]
pub struct UploadLimits {
    pub max_file_size: usize,
    pub strict_email_validation: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub relay: UploadRelayService,
    pub upload: UploadLimits,
}

impl AppState {
    /// Build the state around an already constructed mail transport.
    pub fn new(config: Config, transport: Arc<dyn MailTransport>) -> Self {
        let relay = UploadRelayService::from_config(transport, &config);
        let upload = UploadLimits {
            max_file_size: config.max_upload_size_bytes(),
            strict_email_validation: config.strict_email_validation(),
        };
        Self {
            config,
            relay,
            upload,
        }
    }
}
