pub mod compose;
pub mod email;
pub mod relay;

pub use compose::{EmailAttachment, EnvelopeSettings, OutboundEmail};
pub use email::{MailTransport, SmtpMailer};
pub use relay::UploadRelayService;
