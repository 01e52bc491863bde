use regex::Regex;
use serde::{Deserialize, Serialize};

/// Contact details found in a résumé. Either field may be absent; that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// `local@domain`. The domain may not end in a dot, so sentence punctuation is left out.
const EMAIL_PATTERN: &str = r"[A-Za-z0-9._-]+@[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*";

/// North-American 10-digit number: optional `+CC` prefix, optional `(area)` code,
/// optional space/dot/hyphen separators. Bare digits must start and end on a word
/// boundary, so slices of longer digit runs or of alphanumeric IDs never match.
const PHONE_PATTERN: &str = concat!(
    r"(?:\+\d{1,3}[\s.-]?(?:\(\d{3}\)|\d{3})",
    r"|(?:\b\d{1,3}[\s.-])?(?:\(\d{3}\)|\b\d{3}))",
    r"[\s.-]?\d{3}[\s.-]?\d{4}\b",
);

/// Regex-based recognizer for emails and phone numbers.
/// Patterns are compiled once; the extractor lives in `AppState`.
#[derive(Debug, Clone)]
pub struct ContactExtractor {
    email: Regex,
    phone: Regex,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
            phone: Regex::new(PHONE_PATTERN).expect("phone pattern is valid"),
        }
    }

    /// Returns the first email and the first phone number in `text`.
    pub fn extract(&self, text: &str) -> ContactRecord {
        ContactRecord {
            email: self.email.find(text).map(|m| m.as_str().to_string()),
            phone: self.phone.find(text).map(|m| m.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_line_scenario() {
        let text = "Contact me at jane.doe@example.com or 987-654-3210. Skills: Python, React, Excel.";
        let record = ContactExtractor::new().extract(text);
        assert_eq!(record.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(record.phone.as_deref(), Some("987-654-3210"));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert_eq!(ContactExtractor::new().extract(""), ContactRecord::default());
    }

    #[test]
    fn test_no_at_sign_means_no_email() {
        let extractor = ContactExtractor::new();
        for text in [
            "jane.doe at example dot com",
            "Senior engineer, 8 years of Rust",
            "email: (redacted)",
            "a.b-c_d example.com",
        ] {
            assert_eq!(extractor.extract(text).email, None, "input: {text}");
        }
    }

    #[test]
    fn test_returns_exact_email_substring() {
        let extractor = ContactExtractor::new();
        for (text, expected) in [
            ("mail: first_last-1@sub.domain.org", "first_last-1@sub.domain.org"),
            ("<a.b@c.io>", "a.b@c.io"),
            ("Reach me at x@y.com.", "x@y.com"),
        ] {
            assert_eq!(extractor.extract(text).email.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_first_email_wins() {
        let record = ContactExtractor::new().extract("work: a@corp.com personal: b@home.net");
        assert_eq!(record.email.as_deref(), Some("a@corp.com"));
    }

    #[test]
    fn test_phone_formats() {
        let extractor = ContactExtractor::new();
        for (text, expected) in [
            ("call 9876543210 now", "9876543210"),
            ("tel (987) 654-3210", "(987) 654-3210"),
            ("tel 987.654.3210", "987.654.3210"),
            ("tel +1 987 654 3210", "+1 987 654 3210"),
            ("tel +91-987-654-3210", "+91-987-654-3210"),
            ("tel +19876543210", "+19876543210"),
            ("tel 1-987-654-3210", "1-987-654-3210"),
        ] {
            assert_eq!(
                extractor.extract(text).phone.as_deref(),
                Some(expected),
                "input: {text}"
            );
        }
    }

    #[test]
    fn test_short_numbers_are_not_phones() {
        let record = ContactExtractor::new().extract("Graduated 2019, GPA 3.8, 120 credits");
        assert_eq!(record.phone, None);
    }

    #[test]
    fn test_digits_inside_longer_runs_are_not_phones() {
        let extractor = ContactExtractor::new();
        for text in [
            "Employee ID 123456789012345",
            "Ref A1234567890",
            "Order #98765432101",
            "+123456789012345",
        ] {
            assert_eq!(extractor.extract(text).phone, None, "input: {text}");
        }
    }

    #[test]
    fn test_phone_after_id_is_still_found() {
        let record = ContactExtractor::new().extract("ID 123456789012345, mobile 987-654-3210");
        assert_eq!(record.phone.as_deref(), Some("987-654-3210"));
    }

    #[test]
    fn test_first_phone_wins() {
        let record = ContactExtractor::new().extract("home 111-222-3333, work 444-555-6666");
        assert_eq!(record.phone.as_deref(), Some("111-222-3333"));
    }
}
