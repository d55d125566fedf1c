//! Environment sources and build mode

use std::collections::HashMap;

/// Read-only key-value mapping that variables are resolved against.
///
/// The process environment is the production source; tests inject a
/// [`MapEnv`] so assembly is deterministic.
pub trait EnvSource: Send + Sync {
    /// Raw value of `name`, or `None` when the variable is unset
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = std::env::var_os(name)?;
        match value.into_string() {
            Ok(s) => Some(s),
            Err(raw) => {
                log::warn!("Environment variable {name} is not valid UTF-8, decoding lossily");
                Some(raw.to_string_lossy().into_owned())
            }
        }
    }
}

/// An in-memory environment, typically a fabricated one in tests.
///
/// # Example
///
/// ```
/// use envsettings::{EnvSource, MapEnv};
///
/// let env: MapEnv = [("APP_PORT", "8080")].into_iter().collect();
/// assert_eq!(env.var("APP_PORT").as_deref(), Some("8080"));
/// assert_eq!(env.var("APP_HOST"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Compile-time build mode.
///
/// Some flags are never read from the environment; they follow the build
/// mode instead: `true` in development, `false` in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// The mode this crate was compiled in (cargo feature `development`)
    pub const fn current() -> Self {
        if cfg!(feature = "development") {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub const fn is_development(self) -> bool {
        matches!(self, BuildMode::Development)
    }

    /// Value of every build-mode derived flag
    pub const fn derived_flag(self) -> bool {
        self.is_development()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
