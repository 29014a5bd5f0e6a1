//! Format rules and numeric limits shared by the section checks

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const NAME_LENGTH: RangeInclusive<usize> = 1..=64;
pub const ADDRESS_LENGTH: RangeInclusive<usize> = 54..=56;
pub const URL_LENGTH: RangeInclusive<usize> = 8..=256;
pub const MAX_ATTESTORS: usize = 100;
pub const SESSION_TIMEOUT_SECONDS: RangeInclusive<i128> = 60..=86_400;
pub const OPERATIONS_PER_SESSION: RangeInclusive<i128> = 1..=10_000;

// Compiled once and shared across every validation run
static CONTRACT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("contract name pattern is valid"));
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version pattern is valid"));
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(/.*)?$").expect("url pattern is valid")
});

/// Characters allowed after the leading `G`. X, Y and Z are listed on their
/// own because sample configs use them as placeholder padding.
const ADDRESS_EXTRA_CHARS: [char; 5] = ['+', '/', 'X', 'Y', 'Z'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("must be {min}-{max} characters, got {0}", min = ADDRESS_LENGTH.start(), max = ADDRESS_LENGTH.end())]
    Length(usize),
    #[error("must start with 'G'")]
    Prefix,
    #[error("contains invalid character {0:?}")]
    Character(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("must be {min}-{max} characters, got {0}", min = URL_LENGTH.start(), max = URL_LENGTH.end())]
    Length(usize),
    #[error("expected http(s)://host.tld[/path]")]
    Format,
}

pub fn is_valid_contract_name(name: &str) -> bool {
    NAME_LENGTH.contains(&name.chars().count()) && CONTRACT_NAME_RE.is_match(name)
}

pub fn is_valid_version(version: &str) -> bool {
    VERSION_RE.is_match(version)
}

pub fn check_address(address: &str) -> Result<(), AddressError> {
    let len = address.chars().count();
    if !ADDRESS_LENGTH.contains(&len) {
        return Err(AddressError::Length(len));
    }

    let mut chars = address.chars();
    if chars.next() != Some('G') {
        return Err(AddressError::Prefix);
    }

    match chars.find(|c| !(c.is_alphanumeric() || ADDRESS_EXTRA_CHARS.contains(c))) {
        Some(bad) => Err(AddressError::Character(bad)),
        None => Ok(()),
    }
}

pub fn is_valid_address(address: &str) -> bool {
    check_address(address).is_ok()
}

pub fn check_url(url: &str) -> Result<(), UrlError> {
    let len = url.chars().count();
    if !URL_LENGTH.contains(&len) {
        return Err(UrlError::Length(len));
    }
    if !URL_RE.is_match(url) {
        return Err(UrlError::Format);
    }
    Ok(())
}

pub fn is_valid_url(url: &str) -> bool {
    check_url(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    #[test]
    fn test_address_rule() {
        assert_eq!(VALID_ADDRESS.len(), 56);
        assert!(is_valid_address(VALID_ADDRESS));
        // 55 characters is inside the tolerated range
        assert!(is_valid_address(&VALID_ADDRESS[..55]));
        assert!(is_valid_address(&VALID_ADDRESS[..54]));

        assert_eq!(
            check_address("ABBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB"),
            Err(AddressError::Prefix)
        );
        assert_eq!(check_address("GBBBBBB"), Err(AddressError::Length(7)));
        assert_eq!(
            check_address(&format!("{VALID_ADDRESS}A")),
            Err(AddressError::Length(57))
        );
    }

    #[test]
    fn test_address_allows_placeholders_and_base64_symbols() {
        let placeholder = format!("G{}", "XYZ".repeat(18));
        assert_eq!(placeholder.len(), 55);
        assert!(is_valid_address(&placeholder));

        let with_symbols = format!("G{}+/", "A".repeat(53));
        assert!(is_valid_address(&with_symbols));
    }

    #[test]
    fn test_address_rejects_punctuation() {
        let bad = format!("G{}-", "A".repeat(54));
        assert_eq!(check_address(&bad), Err(AddressError::Character('-')));
    }

    #[test]
    fn test_url_rule() {
        assert!(is_valid_url("https://example.com/verify"));
        assert!(is_valid_url("http://anchor-1.example.org"));
        assert!(!is_valid_url("http://a.b"));
        assert_eq!(check_url("http://a.b"), Err(UrlError::Format));
        assert_eq!(check_url("example.com/verify"), Err(UrlError::Format));
        assert_eq!(check_url("not-a-url-at-all"), Err(UrlError::Format));
        assert_eq!(check_url("ftp://example.com"), Err(UrlError::Format));
        assert_eq!(check_url("https://"), Err(UrlError::Format));
        assert_eq!(check_url("http://"), Err(UrlError::Length(7)));
    }

    #[test]
    fn test_url_length_bounds() {
        let long = format!("https://example.com/{}", "a".repeat(240));
        assert_eq!(check_url(&long), Err(UrlError::Length(260)));

        let max = format!("https://example.com/{}", "a".repeat(236));
        assert_eq!(max.len(), 256);
        assert!(is_valid_url(&max));
    }

    #[test]
    fn test_contract_name_rule() {
        assert!(is_valid_contract_name("test-anchor"));
        assert!(is_valid_contract_name("anchor2"));
        assert!(!is_valid_contract_name(""));
        assert!(!is_valid_contract_name("Test-Anchor"));
        assert!(!is_valid_contract_name("test_anchor"));
        assert!(!is_valid_contract_name(&"a".repeat(65)));
        assert!(is_valid_contract_name(&"a".repeat(64)));
    }

    #[test]
    fn test_version_rule() {
        assert!(is_valid_version("1.0.0"));
        assert!(is_valid_version("10.20.300"));
        assert!(!is_valid_version("1.0"));
        assert!(!is_valid_version("1.0.0-beta"));
        assert!(!is_valid_version("v1.0.0"));
        assert!(!is_valid_version("1.0.0\n"));
    }
}
