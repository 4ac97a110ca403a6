//! Masking of login identifiers for log output

use once_cell::sync::Lazy;
use regex::Regex;

// Loose email shape; full RFC 5322 validation is not needed for masking
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^@\s]+)@([^@\s]+\.[^@\s]+)$").unwrap()
});

// E.164 phone number
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{6,14}$").unwrap()
});

/// Check if a login identifier looks like an email address
pub fn is_email_login(login: &str) -> bool {
    EMAIL_REGEX.is_match(login)
}

/// Check if a login identifier looks like a phone number
pub fn is_phone_login(login: &str) -> bool {
    PHONE_REGEX.is_match(login)
}

/// Mask a login identifier for display
///
/// Emails keep the first character of the local part and the domain
/// (`j***@example.com`), phone numbers keep the first three and last four
/// digits (`+15****0100`), anything else keeps its first two characters.
pub fn mask_login(login: &str) -> String {
    if let Some(captures) = EMAIL_REGEX.captures(login) {
        let local = &captures[1];
        let domain = &captures[2];
        let first: String = local.chars().take(1).collect();
        return format!("{}***@{}", first, domain);
    }

    if is_phone_login(login) {
        return format!("{}****{}", &login[..3], &login[login.len() - 4..]);
    }

    let visible: String = login.chars().take(2).collect();
    if login.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
