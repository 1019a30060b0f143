//! Data models for the application

mod submission;

pub use submission::*;
