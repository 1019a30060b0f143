use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How the connection to the SMTP relay is secured.
///
/// Defined in core because it is part of configuration; the API crate maps it to a
/// concrete transport builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// TLS from the first byte (SMTPS, usually port 465).
    Implicit,
    /// Plaintext greeting upgraded with STARTTLS (usually port 587).
    StartTls,
    /// No encryption at all. Only meant for local development relays.
    None,
}

impl SmtpTls {
    /// Port used when `SMTP_PORT` is not set.
    pub fn default_port(&self) -> u16 {
        match self {
            SmtpTls::Implicit => 465,
            SmtpTls::StartTls => 587,
            SmtpTls::None => 25,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        !matches!(self, SmtpTls::None)
    }
}

impl FromStr for SmtpTls {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "implicit" | "tls" | "true" => Ok(SmtpTls::Implicit),
            "starttls" => Ok(SmtpTls::StartTls),
            "none" | "false" => Ok(SmtpTls::None),
            _ => Err(anyhow::anyhow!("Invalid SMTP TLS mode: {}", s)),
        }
    }
}

impl Display for SmtpTls {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SmtpTls::Implicit => write!(f, "implicit"),
            SmtpTls::StartTls => write!(f, "starttls"),
            SmtpTls::None => write!(f, "none"),
        }
    }
}

/// Console log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}
