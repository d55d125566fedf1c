//! The application's settings record and its schema
//!
//! Every environment variable the web application reads at startup is
//! declared here, prefixed by the assembler's namespace (`APP_` by default).
//!
//! | Variable                       | Type     | Default                 |
//! |--------------------------------|----------|-------------------------|
//! | `APP_STATIC_DIR`               | string   | `static`                |
//! | `APP_ROOT`                     | string   | `http://localhost:3000` |
//! | `APP_HOST`                     | host     | `*4`                    |
//! | `APP_PORT`                     | integer  | `3000`                  |
//! | `APP_IP_FROM_HEADER`           | boolean  | `false`                 |
//! | `APP_ANALYTICS`                | string   | none                    |
//! | `APP_GITHUB_AUTH_TOKEN`        | secret   | none (advisory)         |
//! | `APP_DATA_DIR`                 | string   | `data`                  |
//! | `APP_GITHUB_CLIENT_ID`         | string   | required                |
//! | `APP_GITHUB_CLIENT_SECRET`     | secret   | required                |
//! | `APP_MAX_PARSE_ERRORS`         | integer  | `100`                   |
//! | `APP_MIN_REGENERATION_INTERVAL`| duration | `1h`                    |
//! | `APP_MIN_COMPILER_VERSION`     | version  | `0.0.0.0`               |

use secrecy::SecretString;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use time::Duration;

use crate::assembler::SettingsAssembler;
use crate::config::{FieldSpec, SettingsSchema, ValueType};
use crate::error::Result;
use crate::parse;
use crate::values::{HostBinding, Version, serialize_redacted, serialize_redacted_opt};

pub const STATIC_DIR: FieldSpec = FieldSpec::optional("STATIC_DIR", ValueType::String, "static")
    .describe("Directory static files are served from");

pub const ROOT: FieldSpec = FieldSpec::optional("ROOT", ValueType::String, "http://localhost:3000")
    .describe("Base URL used to render absolute links");

pub const HOST: FieldSpec = FieldSpec::optional("HOST", ValueType::HostBinding, "*4")
    .describe("Interface to bind: *, *4, !4, *6, !6 or a host name");

pub const PORT: FieldSpec = FieldSpec::optional("PORT", ValueType::Integer, "3000")
    .describe("Port to listen on");

pub const IP_FROM_HEADER: FieldSpec =
    FieldSpec::optional("IP_FROM_HEADER", ValueType::Boolean, "false")
        .describe("Take the client IP from the X-Forwarded-For header");

pub const ANALYTICS: FieldSpec = FieldSpec::optional_no_default("ANALYTICS", ValueType::String)
    .describe("Analytics tracking code");

pub const GITHUB_AUTH_TOKEN: FieldSpec =
    FieldSpec::optional_no_default("GITHUB_AUTH_TOKEN", ValueType::Secret)
        .describe("Token for GitHub API calls")
        .advise_when_absent(
            "GitHub API calls will be unauthenticated and subject to stricter rate limits",
        );

pub const DATA_DIR: FieldSpec = FieldSpec::optional("DATA_DIR", ValueType::String, "data")
    .describe("Directory for generated data");

pub const GITHUB_CLIENT_ID: FieldSpec =
    FieldSpec::required("GITHUB_CLIENT_ID", ValueType::String).describe("GitHub OAuth client id");

pub const GITHUB_CLIENT_SECRET: FieldSpec =
    FieldSpec::required("GITHUB_CLIENT_SECRET", ValueType::Secret)
        .describe("GitHub OAuth client secret");

pub const MAX_PARSE_ERRORS: FieldSpec =
    FieldSpec::optional("MAX_PARSE_ERRORS", ValueType::Integer, "100")
        .describe("Parse errors tolerated before a regeneration is abandoned");

pub const MIN_REGENERATION_INTERVAL: FieldSpec =
    FieldSpec::optional("MIN_REGENERATION_INTERVAL", ValueType::Duration, "1h")
        .describe("Minimum time between two regenerations");

pub const MIN_COMPILER_VERSION: FieldSpec =
    FieldSpec::optional("MIN_COMPILER_VERSION", ValueType::Version, "0.0.0.0")
        .describe("Oldest compiler version accepted");

/// Every environment-sourced field, in resolution order
pub const FIELDS: &[FieldSpec] = &[
    STATIC_DIR,
    ROOT,
    HOST,
    PORT,
    IP_FROM_HEADER,
    ANALYTICS,
    GITHUB_AUTH_TOKEN,
    DATA_DIR,
    GITHUB_CLIENT_ID,
    GITHUB_CLIENT_SECRET,
    MAX_PARSE_ERRORS,
    MIN_REGENERATION_INTERVAL,
    MIN_COMPILER_VERSION,
];

/// Flags fixed by the build mode rather than read from the environment
pub const DERIVED_FLAGS: &[&str] = &[
    "detailed_request_logging",
    "should_log_all",
    "reload_templates",
    "mutable_static",
    "skip_combining",
];

/// Fully resolved application settings.
///
/// Built once at startup by [`SettingsAssembler::assemble`] and shared
/// read-only afterwards (wrap it in an `Arc` to hand it to workers).
/// Credentials print as `***` in JSON dumps.
#[derive(Debug, Clone, Serialize)]
pub struct AppSettings {
    pub static_dir: PathBuf,
    pub root: String,
    pub host: HostBinding,
    pub port: u16,
    pub ip_from_header: bool,
    pub analytics: Option<String>,
    #[serde(serialize_with = "serialize_redacted_opt")]
    pub github_auth_token: Option<SecretString>,
    pub data_dir: PathBuf,
    pub github_client_id: String,
    #[serde(serialize_with = "serialize_redacted")]
    pub github_client_secret: SecretString,
    pub max_parse_errors: u32,
    #[serde(serialize_with = "serialize_duration")]
    pub min_regeneration_interval: Duration,
    pub min_compiler_version: Version,

    // Build-mode derived
    pub detailed_request_logging: bool,
    pub should_log_all: bool,
    pub reload_templates: bool,
    pub mutable_static: bool,
    pub skip_combining: bool,
}

fn serialize_duration<S: Serializer>(
    d: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&parse::format_duration(*d))
}

impl SettingsSchema for AppSettings {
    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn derived_flags() -> &'static [&'static str] {
        DERIVED_FLAGS
    }

    fn resolve(a: &mut SettingsAssembler) -> Result<Self> {
        let derived = a.derived_flag();

        Ok(Self {
            static_dir: a.resolve_optional_with_default(
                &STATIC_DIR,
                &parse::path(),
                PathBuf::from("static"),
            )?,
            root: a.resolve_optional_with_default(
                &ROOT,
                &parse::string(),
                "http://localhost:3000".to_string(),
            )?,
            host: a.resolve_optional_with_default(&HOST, &parse::host(), HostBinding::PreferIpv4)?,
            port: a.resolve_optional_with_default(&PORT, &parse::integer(), 3000)?,
            ip_from_header: a.resolve_optional_with_default(
                &IP_FROM_HEADER,
                &parse::boolean(),
                false,
            )?,
            analytics: a.resolve_optional_no_default(&ANALYTICS, &parse::string())?,
            github_auth_token: a
                .resolve_optional_no_default(&GITHUB_AUTH_TOKEN, &parse::secret())?,
            data_dir: a.resolve_optional_with_default(
                &DATA_DIR,
                &parse::path(),
                PathBuf::from("data"),
            )?,
            github_client_id: a.resolve_required(&GITHUB_CLIENT_ID, &parse::string())?,
            github_client_secret: a.resolve_required(&GITHUB_CLIENT_SECRET, &parse::secret())?,
            max_parse_errors: a.resolve_optional_with_default(
                &MAX_PARSE_ERRORS,
                &parse::integer(),
                100,
            )?,
            min_regeneration_interval: a.resolve_optional_with_default(
                &MIN_REGENERATION_INTERVAL,
                &parse::duration(),
                Duration::hours(1),
            )?,
            min_compiler_version: a.resolve_optional_with_default(
                &MIN_COMPILER_VERSION,
                &parse::version(),
                Version::zero(),
            )?,
            detailed_request_logging: derived,
            should_log_all: derived,
            reload_templates: derived,
            mutable_static: derived,
            skip_combining: derived,
        })
    }
}

impl AppSettings {
    /// Assemble from the process environment with the default prefix
    ///
    /// Hosting binaries typically print the error and exit on `Err`.
    pub fn from_process_env() -> Result<Self> {
        SettingsAssembler::builder().process_env().build()?.assemble()
    }
}
