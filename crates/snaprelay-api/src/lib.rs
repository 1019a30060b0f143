//! Snaprelay API Library
//!
//! HTTP handlers, middleware, mail delivery and application setup for the photo
//! upload relay.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::ErrorResponse;
pub use handlers::upload::UploadResponse;
pub use services::{MailTransport, OutboundEmail, SmtpMailer, UploadRelayService};
pub use state::AppState;
