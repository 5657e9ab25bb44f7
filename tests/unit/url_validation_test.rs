//! Unit tests for bookmark input validation and URL normalization.

use livemarks::services::url_validation::{display_domain, normalize_url, validate_entry};
use livemarks::types::errors::ValidationError;
use rstest::rstest;

#[rstest]
#[case("example.com", "https://example.com")]
#[case("  example.com/path?q=1  ", "https://example.com/path?q=1")]
#[case("http://example.com", "http://example.com")]
#[case("https://docs.rs/tokio", "https://docs.rs/tokio")]
#[case("HTTPS://Example.com", "HTTPS://Example.com")]
#[case("localhost:8080", "https://localhost:8080")]
fn test_normalize_accepts(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(normalize_url(input).unwrap(), expected);
}

#[rstest]
#[case("not a url")]
#[case("https://")]
#[case("http://exa mple.com")]
fn test_normalize_rejects(#[case] input: &str) {
    assert!(matches!(
        normalize_url(input),
        Err(ValidationError::InvalidUrl(_))
    ));
}

#[test]
fn test_normalize_blank_is_empty_fields() {
    assert_eq!(normalize_url("   "), Err(ValidationError::EmptyFields));
}

#[rstest]
#[case("", "example.com")]
#[case("Title", "")]
#[case("   ", "example.com")]
#[case("Title", "  \t ")]
fn test_validate_entry_requires_both_fields(#[case] title: &str, #[case] url: &str) {
    assert_eq!(validate_entry(title, url), Err(ValidationError::EmptyFields));
}

#[test]
fn test_validate_entry_trims_title_and_normalizes_url() {
    let (title, url) = validate_entry("  Rust  ", "rust-lang.org").unwrap();
    assert_eq!(title, "Rust");
    assert_eq!(url, "https://rust-lang.org");
}

#[rstest]
#[case("https://www.rust-lang.org/learn", "rust-lang.org")]
#[case("https://docs.rs", "docs.rs")]
#[case("http://sub.www.example.com", "sub.www.example.com")]
#[case("garbage", "garbage")]
fn test_display_domain(#[case] url: &str, #[case] expected: &str) {
    assert_eq!(display_domain(url), expected);
}
