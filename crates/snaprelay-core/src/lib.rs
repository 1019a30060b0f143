//! Snaprelay Core Library
//!
//! Configuration, error types, the submission model and validation helpers shared by
//! the snaprelay components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod smtp_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, RelayServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ImageUpload, RawSubmission, Submission};
pub use smtp_types::{LogFormat, SmtpTls};
