//! Bundled patterns for common value formats.
//!
//! These are configuration data, not logic: each constant is a pattern text
//! applied by [`PatternMatchAnalyzer`](super::PatternMatchAnalyzer) like any
//! user-supplied pattern. All of them compile under the `regex` crate, which
//! has no lookaround or backreferences.

use once_cell::sync::Lazy;
use regex::Regex;

/// Email addresses.
// http://emailregex.com
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#,
    )
    .expect("EMAIL pattern compiles")
});

/// HTTP, HTTPS and FTP URLs.
// @stephenhay via https://mathiasbynens.be/demo/url-regex
pub static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?|ftp)://[^\s/$.?#].[^\s]*").expect("URL pattern compiles")
});

/// US social security numbers, with or without separators.
pub static SOCIAL_SECURITY_NUMBER_US: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{3}[- ]?[0-9]{2}[- ]?[0-9]{4}\b")
        .expect("SOCIAL_SECURITY_NUMBER_US pattern compiles")
});

/// US phone numbers, with optional area code parentheses and separators.
pub static US_PHONE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(?\b[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
        .expect("US_PHONE_NUMBER pattern compiles")
});

/// Visa, MasterCard, Discover and American Express card numbers.
pub static CREDITCARD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:4[0-9]{3}|5[1-5][0-9]{2}|6(?:011|5[0-9]{2})|3[47][0-9]{2})[- ]?[0-9]{4}[- ]?[0-9]{4}[- ]?[0-9]{2,4}\b",
    )
    .expect("CREDITCARD pattern compiles")
});

/// US ZIP codes, five digits with an optional four-digit extension.
pub static US_POSTAL_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{5}(?:-[0-9]{4})?\b").expect("US_POSTAL_CODE pattern compiles"));
