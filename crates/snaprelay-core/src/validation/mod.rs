//! Validation helpers

use validator::ValidateEmail;

/// Syntactic check of an email address (HTML5 / RFC 5322 subset used by `validator`).
///
/// Used for configured addresses at startup and, when strict validation is enabled,
/// for the submitter's address.
pub fn is_valid_email(candidate: &str) -> bool {
    candidate.validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }
}
