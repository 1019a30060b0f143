//! Composition of the outbound email for one submission.
//!
//! [`OutboundEmail`] is a plain value so the exact envelope, body and attachment can be
//! inspected before (or instead of) being handed to an SMTP transport.

use bytes::Bytes;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{Address, Message};

use snaprelay_core::constants::FALLBACK_CONTENT_TYPE;
use snaprelay_core::{AppError, Submission};

/// Fixed parts of every relayed email.
#[derive(Clone, Debug)]
pub struct EnvelopeSettings {
    /// Authenticated service account address, shown as the From address.
    pub service_address: String,
    /// The single mailbox every upload is delivered to.
    pub recipient: String,
    pub subject: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Display name of the From mailbox: the address the submitter typed in, minus
    /// control characters.
    pub from_name: String,
    pub from_address: String,
    /// Submitter address, set only when it is a well-formed mailbox.
    pub reply_to: Option<String>,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: EmailAttachment,
}

impl OutboundEmail {
    /// Build the email for a validated submission.
    ///
    /// The recipient always comes from the envelope settings, never from the submission.
    pub fn compose(submission: &Submission, envelope: &EnvelopeSettings) -> Self {
        let reply_to = submission
            .sender_email
            .parse::<Address>()
            .ok()
            .map(|address| address.to_string());

        Self {
            from_name: display_name(&submission.sender_email),
            from_address: envelope.service_address.clone(),
            reply_to,
            to: envelope.recipient.clone(),
            subject: envelope.subject.clone(),
            body: submission.body_text().to_string(),
            attachment: EmailAttachment {
                filename: submission.image.filename.clone(),
                content_type: submission.image.content_type.clone(),
                data: submission.image.data.clone(),
            },
        }
    }

    /// Render into a lettre message: a `multipart/mixed` with the plain-text body
    /// followed by the single attachment.
    pub fn to_message(&self) -> Result<Message, AppError> {
        let from_address: Address = self
            .from_address
            .parse()
            .map_err(|e| AppError::Relay(format!("Invalid service account address: {}", e)))?;
        let to_address: Address = self
            .to
            .parse()
            .map_err(|e| AppError::Relay(format!("Invalid recipient address: {}", e)))?;

        // lettre panics while rendering a display name that holds CR or LF.
        let name = display_name(&self.from_name);
        let from = Mailbox::new((!name.is_empty()).then_some(name), from_address);

        let mut builder = Message::builder()
            .from(from)
            .to(Mailbox::new(None, to_address))
            .subject(self.subject.clone());

        if let Some(reply_to) = self.reply_to.as_deref() {
            if let Ok(address) = reply_to.parse::<Address>() {
                builder = builder.reply_to(Mailbox::new(None, address));
            }
        }

        let content_type = ContentType::parse(&self.attachment.content_type)
            .or_else(|_| ContentType::parse(FALLBACK_CONTENT_TYPE))
            .map_err(|e| AppError::Relay(format!("Invalid attachment content type: {}", e)))?;

        let attachment = Attachment::new(self.attachment.filename.clone())
            .body(self.attachment.data.to_vec(), content_type);

        builder
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(self.body.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| AppError::Relay(e.to_string()))
    }
}

/// Drop control characters so the value can only ever be a single header word.
fn display_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettre::message::{header, Mailboxes};
    use snaprelay_core::{ImageUpload, RawSubmission};

    fn envelope() -> EnvelopeSettings {
        EnvelopeSettings {
            service_address: "uploads@example.com".to_string(),
            recipient: "inbox@example.org".to_string(),
            subject: "📷 New Screenshot Uploaded".to_string(),
        }
    }

    fn submission(email: &str, message: Option<&str>) -> Submission {
        RawSubmission {
            image: Some(ImageUpload::new(
                Some("photo.png".to_string()),
                Some("image/png".to_string()),
                Bytes::from_static(b"\x89PNG\r\n\x1a\n\x00\x01"),
            )),
            email: Some(email.to_string()),
            message: message.map(str::to_string),
        }
        .validate()
        .expect("valid submission")
    }

    #[test]
    fn compose_uses_fixed_envelope() {
        let email = OutboundEmail::compose(&submission("a@b.com", Some("hello")), &envelope());
        assert_eq!(email.from_name, "a@b.com");
        assert_eq!(email.from_address, "uploads@example.com");
        assert_eq!(email.reply_to.as_deref(), Some("a@b.com"));
        assert_eq!(email.to, "inbox@example.org");
        assert_eq!(email.subject, "📷 New Screenshot Uploaded");
        assert_eq!(email.body, "hello");
        assert_eq!(email.attachment.filename, "photo.png");
        assert_eq!(email.attachment.content_type, "image/png");
        assert_eq!(&email.attachment.data[..], b"\x89PNG\r\n\x1a\n\x00\x01");
    }

    #[test]
    fn compose_ignores_submitted_address_for_recipient() {
        let email = OutboundEmail::compose(
            &submission("attacker@evil.example", None),
            &envelope(),
        );
        assert_eq!(email.to, "inbox@example.org");
        assert_eq!(email.body, "No message provided");
    }

    #[test]
    fn compose_skips_reply_to_for_malformed_address() {
        let email = OutboundEmail::compose(&submission("not an address", None), &envelope());
        assert_eq!(email.from_name, "not an address");
        assert_eq!(email.reply_to, None);
    }

    #[test]
    fn to_message_renders_headers_and_attachment() {
        let email = OutboundEmail::compose(&submission("a@b.com", Some("hello")), &envelope());
        let message = email.to_message().expect("message");
        let rendered = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(rendered.contains("<uploads@example.com>"));
        assert!(rendered.contains("inbox@example.org"));
        assert!(rendered.contains("Reply-To:"));
        assert!(rendered.contains("multipart/mixed"));
        assert!(rendered.contains("photo.png"));
        assert!(rendered.contains("hello"));
    }

    fn rendered_from(message: &Message) -> Mailbox {
        let from = message
            .headers()
            .get::<header::From>()
            .expect("From header");
        Mailboxes::from(from).into_single().expect("single From mailbox")
    }

    #[test]
    fn to_message_uses_submitted_address_as_display_name() {
        let email = OutboundEmail::compose(&submission("a@b.com", None), &envelope());
        let message = email.to_message().expect("message");

        let from = rendered_from(&message);
        assert_eq!(from.name.as_deref(), Some("a@b.com"));
        assert_eq!(from.email.to_string(), "uploads@example.com");
    }

    #[test]
    fn compose_strips_line_breaks_from_display_name() {
        let email = OutboundEmail::compose(
            &submission("a@b.com\r\nBcc: victim@example.com", None),
            &envelope(),
        );
        assert_eq!(email.from_name, "a@b.comBcc: victim@example.com");
        assert_eq!(email.reply_to, None);

        let message = email.to_message().expect("message");
        let rendered = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(!rendered.contains("\r\nBcc:"));
        assert!(message.headers().get_raw("Bcc").is_none());
    }

    #[test]
    fn to_message_renders_hand_built_name_with_line_breaks() {
        let mut email = OutboundEmail::compose(&submission("a@b.com", None), &envelope());
        email.from_name = "line\none\rtwo".to_string();

        let message = email.to_message().expect("message");
        assert_eq!(rendered_from(&message).name.as_deref(), Some("lineonetwo"));
    }

    #[test]
    fn to_message_omits_display_name_when_nothing_printable_remains() {
        let mut email = OutboundEmail::compose(&submission("a@b.com", None), &envelope());
        email.from_name = "\r\n".to_string();

        let message = email.to_message().expect("message");
        assert_eq!(rendered_from(&message).name, None);
    }

    #[test]
    fn to_message_falls_back_for_unparseable_content_type() {
        let mut email = OutboundEmail::compose(&submission("a@b.com", None), &envelope());
        email.attachment.content_type = "not a mime type".to_string();
        let message = email.to_message().expect("message");
        let rendered = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(rendered.contains("application/octet-stream"));
    }
}
