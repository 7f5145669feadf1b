//! Field validators — pure functions from raw text to a normalized value.
//!
//! `None` means rejected: the field stays unset and the controller
//! re-prompts. Rejection is never an error.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"));

/// Greeting tokens that cannot be a name on their own.
const GREETINGS: [&str; 4] = ["hi", "hello", "hey", "start"];

/// Accept an integer strictly between 0 and 120.
pub fn validate_age(input: &str) -> Option<u32> {
    let age: u32 = input.trim().parse().ok()?;
    (0 < age && age < 120).then_some(age)
}

/// Accept a non-negative amount; currency symbols and thousands
/// separators are stripped before parsing.
pub fn validate_income(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | '$'))
        .collect();
    let income: f64 = cleaned.parse().ok()?;
    (income >= 0.0).then_some(income)
}

/// Accept exactly 10 digits after stripping separators and an optional
/// leading country code (`+91`, or `91` when more than 10 digits remain).
pub fn validate_phone(input: &str) -> Option<String> {
    let mut digits: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if let Some(rest) = digits.strip_prefix("+91") {
        digits = rest.to_string();
    } else if digits.starts_with("91") && digits.len() > 10 {
        digits = digits[2..].to_string();
    }

    PHONE_RE.is_match(&digits).then_some(digits)
}

/// Accept a conventional `local-part@domain.tld` address, lowercased.
pub fn validate_email(input: &str) -> Option<String> {
    let email = input.trim().to_lowercase();
    EMAIL_RE.is_match(&email).then_some(email)
}

/// Accept any non-empty input that is not just a greeting; title-cased.
pub fn validate_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || GREETINGS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }
    Some(title_case(trimmed))
}

/// Accept any input longer than 2 characters; title-cased.
pub fn validate_state(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (trimmed.chars().count() > 2).then(|| title_case(trimmed))
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Age ─────────────────────────────────────────────────────────

    #[test]
    fn age_accepts_in_range() {
        assert_eq!(validate_age("45"), Some(45));
        assert_eq!(validate_age("1"), Some(1));
        assert_eq!(validate_age("119"), Some(119));
    }

    #[test]
    fn age_rejects_bounds_and_noise() {
        assert_eq!(validate_age("0"), None);
        assert_eq!(validate_age("120"), None);
        assert_eq!(validate_age("150"), None);
        assert_eq!(validate_age("-5"), None);
        assert_eq!(validate_age("forty"), None);
        assert_eq!(validate_age(""), None);
    }

    // ── Income ──────────────────────────────────────────────────────

    #[test]
    fn income_normalizes_currency_formats() {
        assert_eq!(validate_income("₹1,20,000"), Some(120000.0));
        assert_eq!(validate_income("120000"), Some(120000.0));
        assert_eq!(validate_income("$5000.50"), Some(5000.5));
    }

    #[test]
    fn income_accepts_zero_rejects_negative() {
        assert_eq!(validate_income("0"), Some(0.0));
        assert_eq!(validate_income("-1"), None);
        assert_eq!(validate_income("lots"), None);
    }

    // ── Phone ───────────────────────────────────────────────────────

    #[test]
    fn phone_normalizes_country_code_and_separators() {
        assert_eq!(
            validate_phone("+91 98765 43210"),
            Some("9876543210".to_string())
        );
        assert_eq!(validate_phone("9876543210"), Some("9876543210".to_string()));
        assert_eq!(
            validate_phone("919876543210"),
            Some("9876543210".to_string())
        );
        assert_eq!(
            validate_phone("(987) 654-3210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn phone_keeps_bare_91_prefix_when_ten_digits() {
        // "91" followed by 8 digits is a 10-digit number, not a country code.
        assert_eq!(validate_phone("9198765432"), Some("9198765432".to_string()));
    }

    #[test]
    fn phone_rejects_wrong_lengths_and_letters() {
        assert_eq!(validate_phone("12345"), None);
        assert_eq!(validate_phone("98765432101"), None);
        assert_eq!(validate_phone("98765abcde"), None);
        assert_eq!(validate_phone(""), None);
    }

    // ── Email ───────────────────────────────────────────────────────

    #[test]
    fn email_accepts_and_lowercases() {
        assert_eq!(
            validate_email("User@Example.COM"),
            Some("user@example.com".to_string())
        );
        assert_eq!(
            validate_email("a.b_c%d+e-f@sub.domain.org"),
            Some("a.b_c%d+e-f@sub.domain.org".to_string())
        );
    }

    #[test]
    fn email_rejects_malformed() {
        assert_eq!(validate_email("not-an-email"), None);
        assert_eq!(validate_email("missing@tld"), None);
        assert_eq!(validate_email("@example.com"), None);
        assert_eq!(validate_email("user@.com"), None);
    }

    // ── Name ────────────────────────────────────────────────────────

    #[test]
    fn name_rejects_greetings_only() {
        assert_eq!(validate_name("hi"), None);
        assert_eq!(validate_name("Hello"), None);
        assert_eq!(validate_name("START"), None);
        assert_eq!(validate_name(""), None);
    }

    #[test]
    fn name_accepts_and_title_cases() {
        assert_eq!(validate_name("priya"), Some("Priya".to_string()));
        assert_eq!(
            validate_name("priya sharma"),
            Some("Priya Sharma".to_string())
        );
        // A greeting plus more is a name.
        assert_eq!(validate_name("hi there"), Some("Hi There".to_string()));
    }

    // ── State ───────────────────────────────────────────────────────

    #[test]
    fn state_requires_more_than_two_chars() {
        assert_eq!(validate_state("up"), None);
        assert_eq!(validate_state("goa"), Some("Goa".to_string()));
        assert_eq!(
            validate_state("tamil nadu"),
            Some("Tamil Nadu".to_string())
        );
    }

    #[test]
    fn title_case_handles_mixed_input() {
        assert_eq!(title_case("mAhArAsHtRa"), "Maharashtra");
        assert_eq!(title_case("new  delhi"), "New Delhi");
    }
}
