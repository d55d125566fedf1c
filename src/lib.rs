//! # envsettings - Typed settings from the environment
//!
//! Materializes one strongly-typed, immutable settings record from
//! namespaced environment variables at process startup.
//!
//! ## Features
//!
//! - **Namespacing**: Every variable is read as `{PREFIX}_{KEY}` (default prefix `APP`)
//! - **Defaults**: Optional fields fall back to a default, or to `None`
//! - **Required Fields**: Missing required variables fail assembly, naming the variable
//! - **Strict and Lenient Parsers**: Numbers and booleans must be exact; strings also accept unquoted text
//! - **Fail Fast**: A malformed value is always fatal, even when the field has a default
//! - **Secrets**: Credentials are `secrecy::SecretString`, redacted in `Debug` output and serialized dumps
//! - **Build Mode**: Development-only flags follow a compile-time switch
//! - **Injectable Environment**: Tests substitute a fabricated `MapEnv`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use envsettings::AppSettings;
//!
//! let settings = match AppSettings::from_process_env() {
//!     Ok(settings) => settings,
//!     Err(e) => {
//!         eprintln!("Configuration error: {e}");
//!         std::process::exit(1);
//!     }
//! };
//! println!("listening on {}:{}", settings.host, settings.port);
//! ```
//!
//! ## Defining a Schema
//!
//! ```rust
//! use envsettings::{
//!     parse, FieldSpec, MapEnv, Result, SettingsAssembler, SettingsSchema, ValueType,
//! };
//!
//! const PORT: FieldSpec = FieldSpec::optional("PORT", ValueType::Integer, "8080");
//! const DB_URL: FieldSpec = FieldSpec::required("DB_URL", ValueType::String);
//!
//! struct Config {
//!     port: u16,
//!     db_url: String,
//! }
//!
//! impl SettingsSchema for Config {
//!     fn fields() -> &'static [FieldSpec] {
//!         &[PORT, DB_URL]
//!     }
//!
//!     fn resolve(a: &mut SettingsAssembler) -> Result<Self> {
//!         Ok(Self {
//!             port: a.resolve_optional_with_default(&PORT, &parse::integer(), 8080)?,
//!             db_url: a.resolve_required(&DB_URL, &parse::string())?,
//!         })
//!     }
//! }
//!
//! let env = MapEnv::new().with("MYAPP_DB_URL", "postgres://localhost/db");
//! let config: Config = SettingsAssembler::builder()
//!     .prefix("MYAPP")
//!     .source(env)
//!     .build()?
//!     .assemble()?;
//!
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.db_url, "postgres://localhost/db");
//! # Ok::<(), envsettings::Error>(())
//! ```

// Core modules
mod app;
mod assembler;
mod docs;
mod error;
pub mod parse;
pub mod values;

// Grouped modules
pub mod config;

// Re-exports from core
pub use app::{AppSettings, DERIVED_FLAGS, FIELDS};
pub use assembler::{
    Advisory, DEFAULT_PREFIX, EnvironmentReader, Lookup, SettingsAssembler,
    SettingsAssemblerBuilder,
};
pub use docs::{DocsConfig, generate_docs, generate_docs_from_fields};
pub use error::{Error, Result};
pub use parse::Parser;

// Re-exports from config
pub use config::{
    BuildMode, EnvSource, FieldKind, FieldSpec, MapEnv, ProcessEnv, SettingsSchema, ValueType,
    validate_schema,
};

// Re-exports from values
pub use values::{HostBinding, Version};

pub use secrecy::{ExposeSecret, SecretString};

/// Field definitions of [`AppSettings`], one constant per variable
pub mod fields {
    pub use crate::app::{
        ANALYTICS, DATA_DIR, GITHUB_AUTH_TOKEN, GITHUB_CLIENT_ID, GITHUB_CLIENT_SECRET, HOST,
        IP_FROM_HEADER, MAX_PARSE_ERRORS, MIN_COMPILER_VERSION, MIN_REGENERATION_INTERVAL, PORT,
        ROOT, STATIC_DIR,
    };
}
