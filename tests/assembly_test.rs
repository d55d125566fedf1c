//! Settings Assembly Integration Tests
//!
//! End-to-end assembly of `AppSettings` from a fabricated environment:
//! - Defaults for every optional field
//! - Values read from the environment
//! - Missing required variables and malformed values
//! - Lenient string reads
//! - Credential advisory
//! - Build-mode derived flags
//! - Determinism across repeated runs

mod common;

use common::{CLIENT_ID, CLIENT_SECRET, TestFixture, assert_same_settings};
use envsettings::{
    AppSettings, BuildMode, Error, ExposeSecret, FIELDS, HostBinding, SettingsAssembler, Version,
};
use std::path::PathBuf;
use time::Duration;

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_absent_optionals_yield_documented_defaults() {
    let settings = TestFixture::new().assemble().unwrap();

    assert_eq!(settings.static_dir, PathBuf::from("static"));
    assert_eq!(settings.root, "http://localhost:3000");
    assert_eq!(settings.host, HostBinding::PreferIpv4);
    assert_eq!(settings.port, 3000);
    assert!(!settings.ip_from_header);
    assert_eq!(settings.analytics, None);
    assert!(settings.github_auth_token.is_none());
    assert_eq!(settings.data_dir, PathBuf::from("data"));
    assert_eq!(settings.max_parse_errors, 100);
    assert_eq!(settings.min_regeneration_interval, Duration::hours(1));
    assert_eq!(settings.min_compiler_version, Version::zero());
}

#[test]
fn test_required_values_are_read() {
    let settings = TestFixture::new().assemble().unwrap();

    assert_eq!(settings.github_client_id, CLIENT_ID);
    assert_eq!(settings.github_client_secret.expose_secret(), CLIENT_SECRET);
}

// =============================================================================
// Present Values
// =============================================================================

#[test]
fn test_present_values_override_defaults() {
    let settings = TestFixture::new()
        .set("STATIC_DIR", "/srv/static")
        .set("ROOT", "https://example.org")
        .set("HOST", "127.0.0.1")
        .set("PORT", "8080")
        .set("IP_FROM_HEADER", "true")
        .set("ANALYTICS", "UA-12345")
        .set("GITHUB_AUTH_TOKEN", "ghp_token")
        .set("DATA_DIR", "/var/lib/site")
        .set("MAX_PARSE_ERRORS", "7")
        .set("MIN_REGENERATION_INTERVAL", "15m")
        .set("MIN_COMPILER_VERSION", "9.4.7")
        .assemble()
        .unwrap();

    assert_eq!(settings.static_dir, PathBuf::from("/srv/static"));
    assert_eq!(settings.root, "https://example.org");
    assert_eq!(settings.host, HostBinding::Host("127.0.0.1".into()));
    assert_eq!(settings.port, 8080);
    assert!(settings.ip_from_header);
    assert_eq!(settings.analytics.as_deref(), Some("UA-12345"));
    assert_eq!(
        settings.github_auth_token.as_ref().map(|t| t.expose_secret()),
        Some("ghp_token")
    );
    assert_eq!(settings.data_dir, PathBuf::from("/var/lib/site"));
    assert_eq!(settings.max_parse_errors, 7);
    assert_eq!(settings.min_regeneration_interval, Duration::minutes(15));
    assert_eq!(settings.min_compiler_version, Version::new(vec![9, 4, 7]));
}

#[test]
fn test_min_compiler_version_has_no_tags() {
    let settings = TestFixture::new()
        .set("MIN_COMPILER_VERSION", "2.3.1")
        .assemble()
        .unwrap();

    assert_eq!(settings.min_compiler_version.branch(), &[2, 3, 1]);
    assert!(settings.min_compiler_version.tags().is_empty());
}

// =============================================================================
// Lenient String Reads
// =============================================================================

#[test]
fn test_unquoted_and_quoted_strings_read_the_same() {
    let unquoted = TestFixture::new()
        .set("ROOT", "http://localhost:3000")
        .assemble()
        .unwrap();
    let quoted = TestFixture::new()
        .set("ROOT", "\"http://localhost:3000\"")
        .assemble()
        .unwrap();

    assert_eq!(unquoted.root, "http://localhost:3000");
    assert_same_settings(&unquoted, &quoted);
}

#[test]
fn test_unquoted_text_keeps_tabs_and_newlines() {
    let settings = TestFixture::new()
        .set("ANALYTICS", "UA-1\tUA-2")
        .set("GITHUB_CLIENT_SECRET", "line1\nline2")
        .assemble()
        .unwrap();

    assert_eq!(settings.analytics.as_deref(), Some("UA-1\tUA-2"));
    assert_eq!(settings.github_client_secret.expose_secret(), "line1\nline2");
}

#[test]
fn test_quoted_host_wildcard() {
    let settings = TestFixture::new().set("HOST", "\"*6\"").assemble().unwrap();
    assert_eq!(settings.host, HostBinding::PreferIpv6);
}

// =============================================================================
// Missing Required Variables
// =============================================================================

#[test]
fn test_missing_required_names_the_variable() {
    let err = TestFixture::empty()
        .set("GITHUB_CLIENT_SECRET", "s")
        .assemble()
        .unwrap_err();

    assert_eq!(
        err,
        Error::MissingRequired {
            var: "APP_GITHUB_CLIENT_ID".into()
        }
    );
}

#[test]
fn test_missing_secret_is_fatal_too() {
    let err = TestFixture::empty()
        .set("GITHUB_CLIENT_ID", "id")
        .assemble()
        .unwrap_err();

    assert!(err.is_missing_required());
    assert_eq!(err.var_name(), Some("APP_GITHUB_CLIENT_SECRET"));
}

#[test]
fn test_first_failure_wins() {
    // MAX_PARSE_ERRORS is resolved after the client credentials
    let err = TestFixture::empty()
        .set("MAX_PARSE_ERRORS", "lots")
        .assemble()
        .unwrap_err();

    assert_eq!(err.var_name(), Some("APP_GITHUB_CLIENT_ID"));
}

// =============================================================================
// Parse Failures
// =============================================================================

#[test]
fn test_malformed_values_fail_even_with_defaults() {
    let cases = [
        ("PORT", "30x0", "integer"),
        ("PORT", "\"3000\"", "integer"),
        ("PORT", "99999", "integer"),
        ("PORT", "+3000", "integer"),
        ("IP_FROM_HEADER", "yes", "boolean"),
        ("MAX_PARSE_ERRORS", "-1", "integer"),
        ("MIN_REGENERATION_INTERVAL", "soon", "duration"),
        ("MIN_COMPILER_VERSION", "v2.3", "version"),
    ];

    for (key, raw, expected) in cases {
        let err = TestFixture::new().set(key, raw).assemble().unwrap_err();
        assert_eq!(
            err,
            Error::ParseFailure {
                var: format!("APP_{key}"),
                raw: raw.to_string(),
                expected,
            },
            "{key}={raw}"
        );
    }
}

#[test]
fn test_malformed_optional_without_default_is_fatal() {
    let err = TestFixture::new()
        .set("ANALYTICS", "UA-\"broken")
        .assemble()
        .unwrap_err();

    assert!(err.is_parse_failure());
    assert!(err.to_string().contains("APP_ANALYTICS"));
    assert!(err.to_string().contains("UA-\\\"broken"));
}

#[test]
fn test_empty_numeric_value_is_a_parse_failure() {
    let err = TestFixture::new().set("PORT", "").assemble().unwrap_err();
    assert!(err.is_parse_failure());
}

// =============================================================================
// Credential Advisory
// =============================================================================

#[test]
fn test_absent_auth_token_emits_exactly_one_advisory() {
    let fixture = TestFixture::new();
    let mut assembler = fixture.assembler();
    let settings: AppSettings = assembler.assemble().unwrap();

    assert!(settings.github_auth_token.is_none());
    assert_eq!(assembler.advisories().len(), 1);
    assert_eq!(assembler.advisories()[0].var, "APP_GITHUB_AUTH_TOKEN");
    assert!(assembler.advisories()[0].message.contains("rate limit"));
}

#[test]
fn test_present_auth_token_emits_no_advisory() {
    let fixture = TestFixture::new().set("GITHUB_AUTH_TOKEN", "ghp_x");
    let mut assembler = fixture.assembler();
    let _: AppSettings = assembler.assemble().unwrap();

    assert!(assembler.advisories().is_empty());
}

#[test]
fn test_absent_analytics_is_silent() {
    let fixture = TestFixture::new().set("GITHUB_AUTH_TOKEN", "ghp_x");
    let mut assembler = fixture.assembler();
    let settings: AppSettings = assembler.assemble().unwrap();

    assert!(settings.analytics.is_none());
    assert!(assembler.advisories().is_empty());
}

// =============================================================================
// Build Mode
// =============================================================================

#[test]
fn test_derived_flags_follow_build_mode() {
    let dev = TestFixture::new()
        .mode(BuildMode::Development)
        .assemble()
        .unwrap();
    assert!(dev.detailed_request_logging);
    assert!(dev.should_log_all);
    assert!(dev.reload_templates);
    assert!(dev.mutable_static);
    assert!(dev.skip_combining);

    let prod = TestFixture::new()
        .mode(BuildMode::Production)
        .assemble()
        .unwrap();
    assert!(!prod.detailed_request_logging);
    assert!(!prod.should_log_all);
    assert!(!prod.reload_templates);
    assert!(!prod.mutable_static);
    assert!(!prod.skip_combining);
}

#[test]
fn test_derived_flags_ignore_environment() {
    let settings = TestFixture::new()
        .mode(BuildMode::Production)
        .set("RELOAD_TEMPLATES", "true")
        .set("SHOULD_LOG_ALL", "true")
        .assemble()
        .unwrap();

    assert!(!settings.reload_templates);
    assert!(!settings.should_log_all);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_assembly_is_equal() {
    let fixture = TestFixture::new()
        .set("PORT", "4000")
        .set("MIN_COMPILER_VERSION", "8.10.7");

    let mut assembler = fixture.assembler();
    let first: AppSettings = assembler.assemble().unwrap();
    let second: AppSettings = assembler.assemble().unwrap();
    let third = fixture.assemble().unwrap();

    assert_same_settings(&first, &second);
    assert_same_settings(&first, &third);
    // Advisories reset per run rather than accumulating
    assert_eq!(assembler.advisories().len(), 1);
}

#[test]
fn test_custom_prefix() {
    let mut assembler = SettingsAssembler::builder()
        .prefix("SITE")
        .vars([
            ("SITE_GITHUB_CLIENT_ID", "id"),
            ("SITE_GITHUB_CLIENT_SECRET", "secret"),
            ("APP_PORT", "9999"),
            ("SITE_PORT", "5000"),
        ])
        .build()
        .unwrap();
    let settings: AppSettings = assembler.assemble().unwrap();

    assert_eq!(settings.port, 5000);
}

#[test]
fn test_every_schema_field_is_documented() {
    for field in FIELDS {
        assert!(!field.description.is_empty(), "{} has no description", field.key);
    }
}
