use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.\-#$]+@[\w.]+").unwrap());

/// Optional country/area prefix of up to three digits (with `+`, parentheses,
/// dash, space or dot around it) followed by exactly ten digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[(+]?\d{1,3}\)?[- ]?\.?)?\d{10}").unwrap());

/// First email-looking substring of `text`, or `""`.
///
/// Matches anywhere in the text, not only on a line of its own.
pub fn extract_email(text: &str) -> String {
    extract_email_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_email_with_config(text: &str, config: &ParsingConfig) -> String {
    let re = config.email_re.as_ref().unwrap_or(&EMAIL_RE);
    first_match(re, text)
}

/// First phone-number-looking substring of `text`, or `""`.
///
/// Matches anywhere in the text, not only on a line of its own.
pub fn extract_phone(text: &str) -> String {
    extract_phone_with_config(text, &ParsingConfig::default())
}

pub(crate) fn extract_phone_with_config(text: &str, config: &ParsingConfig) -> String {
    let re = config.phone_re.as_ref().unwrap_or(&PHONE_RE);
    first_match(re, text)
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_in_sentence() {
        assert_eq!(
            extract_email("Contact: jane@example.com, phone 9876543210."),
            "jane@example.com"
        );
    }

    #[test]
    fn test_email_local_part_symbols() {
        assert_eq!(
            extract_email("mail: j.doe-dev#1$x_y@mail.example.org"),
            "j.doe-dev#1$x_y@mail.example.org"
        );
    }

    #[test]
    fn test_email_first_of_many() {
        assert_eq!(extract_email("a@b.io and c@d.io"), "a@b.io");
    }

    #[test]
    fn test_email_at_start_and_end() {
        assert_eq!(extract_email("jane@example.com is my address"), "jane@example.com");
        assert_eq!(extract_email("Reach me at jane@example.com"), "jane@example.com");
    }

    #[test]
    fn test_email_is_idempotent() {
        let first = extract_email("Email - dev.ops@corp.co.uk\n");
        assert_eq!(first, "dev.ops@corp.co.uk");
        assert_eq!(extract_email(&first), first);
    }

    #[test]
    fn test_email_keeps_trailing_dot_literally() {
        // The domain class includes '.', so a sentence-final dot is kept.
        assert_eq!(extract_email("Write to jane@example.com."), "jane@example.com.");
    }

    #[test]
    fn test_phone_plain_ten_digits() {
        assert_eq!(
            extract_phone("Contact: jane@example.com, phone 9876543210."),
            "9876543210"
        );
    }

    #[test]
    fn test_phone_with_country_code() {
        assert_eq!(extract_phone("Mobile: +91 9876543210"), "+91 9876543210");
        assert_eq!(extract_phone("Mobile: +1-5551234567"), "+1-5551234567");
        assert_eq!(extract_phone("Tel (44) 2071234567 office"), "(44) 2071234567");
    }

    #[test]
    fn test_phone_at_start_and_end() {
        assert_eq!(extract_phone("9876543210 is my number"), "9876543210");
        assert_eq!(extract_phone("call 5551234567"), "5551234567");
    }

    #[test]
    fn test_phone_too_short() {
        assert_eq!(extract_phone("Call 555-1234"), "");
        assert_eq!(extract_phone("Zip 12345"), "");
    }

    #[test]
    fn test_no_contact_details() {
        let text = "Jane Doe\nSoftware engineer";
        assert_eq!(extract_email(text), "");
        assert_eq!(extract_phone(text), "");
    }

    #[test]
    fn test_custom_phone_regex() {
        let config = crate::ParsingConfigBuilder::new()
            .phone_regex(r"\d{3}-\d{4}")
            .build()
            .unwrap();
        assert_eq!(extract_phone_with_config("Call 555-1234", &config), "555-1234");
    }
}
