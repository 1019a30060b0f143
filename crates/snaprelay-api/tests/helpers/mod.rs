//! Test helpers: build the router around a recording mail transport.
//!
//! Run from workspace root: `cargo test -p snaprelay-api --test upload_test`.
//! No SMTP server is needed; mail is captured in memory.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use lettre::message::{header, Mailboxes};
use snaprelay_api::setup::initialize_with_transport;
use snaprelay_api::{MailTransport, OutboundEmail};
use snaprelay_core::{AppError, Config};

/// Mail transport that renders and records every message instead of sending it.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    attempts: Mutex<usize>,
    failure: Option<String>,
}

impl RecordingTransport {
    /// Transport whose every send fails with `message` as a relay error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), AppError> {
        *self.attempts.lock().unwrap() += 1;
        // Render exactly as SmtpMailer does before handing the message to the relay.
        email.to_message()?;
        if let Some(message) = &self.failure {
            return Err(AppError::Relay(message.clone()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Test application: server plus the transport it delivers to.
pub struct TestApp {
    pub server: TestServer,
    pub transport: Arc<RecordingTransport>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub const SERVICE_ADDRESS: &str = "uploads@example.com";
pub const RECIPIENT: &str = "inbox@example.org";

fn create_test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("EMAIL_USER".to_string(), SERVICE_ADDRESS.to_string()),
        ("EMAIL_PASS".to_string(), "app-password".to_string()),
        ("UPLOAD_RECIPIENT".to_string(), RECIPIENT.to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_lookup(move |key| vars.get(key).cloned()).expect("Failed to build test config")
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[], RecordingTransport::default())
}

pub fn setup_test_app_with(overrides: &[(&str, &str)], transport: RecordingTransport) -> TestApp {
    let config = create_test_config(overrides);
    let transport = Arc::new(transport);

    let (_state, app) = initialize_with_transport(config, transport.clone())
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, transport }
}

/// Ten bytes starting with the PNG signature.
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0x00, 0x01]
}

pub fn image_part(data: Vec<u8>, file_name: &str, mime_type: &str) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime_type)
}

/// The canonical form: `photo.png`, `a@b.com`, `hello`.
pub fn full_form() -> MultipartForm {
    MultipartForm::new()
        .add_part("file", image_part(png_bytes(), "photo.png", "image/png"))
        .add_text("email", "a@b.com")
        .add_text("message", "hello")
}

/// Display name of the rendered From header.
pub fn rendered_from_name(email: &OutboundEmail) -> Option<String> {
    let message = email.to_message().expect("Failed to render message");
    let from = message
        .headers()
        .get::<header::From>()
        .expect("Missing From header");
    Mailboxes::from(from)
        .into_single()
        .expect("Expected a single From mailbox")
        .name
}
