//! Builder for SettingsAssembler
//!
//! This module contains [`SettingsAssemblerBuilder`] which provides a fluent
//! API for creating a [`SettingsAssembler`](super::SettingsAssembler).

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::config::{BuildMode, EnvSource, MapEnv, ProcessEnv};
use crate::error::{Error, Result};

use super::{EnvironmentReader, SettingsAssembler};

/// Namespace prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "APP";

static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("prefix pattern is valid"));

/// Builder for creating a [`SettingsAssembler`] with a fluent API.
///
/// Defaults: prefix `APP`, the process environment, and the compile-time
/// [`BuildMode`].
///
/// # Example
///
/// ```rust
/// use envsettings::{BuildMode, SettingsAssembler};
///
/// let assembler = SettingsAssembler::builder()
///     .prefix("MYSITE")
///     .vars([("MYSITE_PORT", "8080")])
///     .build_mode(BuildMode::Development)
///     .build()?;
///
/// assert_eq!(assembler.reader().var_name("PORT"), "MYSITE_PORT");
/// # Ok::<(), envsettings::Error>(())
/// ```
pub struct SettingsAssemblerBuilder {
    prefix: String,
    source: Arc<dyn EnvSource>,
    build_mode: BuildMode,
}

impl std::fmt::Debug for SettingsAssemblerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsAssemblerBuilder")
            .field("prefix", &self.prefix)
            .field("build_mode", &self.build_mode)
            .finish_non_exhaustive()
    }
}

impl Default for SettingsAssemblerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsAssemblerBuilder {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            source: Arc::new(ProcessEnv),
            build_mode: BuildMode::current(),
        }
    }

    /// Set the namespace prefix (e.g., "MYAPP" -> MYAPP_PORT)
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Read variables from a custom source
    #[must_use]
    pub fn source(mut self, source: impl EnvSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    /// Read variables from the process environment (the default)
    #[must_use]
    pub fn process_env(self) -> Self {
        self.source(ProcessEnv)
    }

    /// Read variables from a fixed list of pairs
    #[must_use]
    pub fn vars<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.source(vars.into_iter().collect::<MapEnv>())
    }

    /// Override the compile-time build mode
    #[must_use]
    pub fn build_mode(mut self, mode: BuildMode) -> Self {
        self.build_mode = mode;
        self
    }

    /// Build the assembler
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the prefix is empty or not an identifier.
    pub fn build(self) -> Result<SettingsAssembler> {
        if !PREFIX_RE.is_match(&self.prefix) {
            return Err(Error::Config(format!(
                "invalid environment prefix {:?}: must match [A-Za-z][A-Za-z0-9_]*",
                self.prefix
            )));
        }
        let reader = EnvironmentReader::new(self.prefix, self.source);
        Ok(SettingsAssembler::new(reader, self.build_mode))
    }
}
