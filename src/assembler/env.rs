//! Environment variable lookups
//!
//! Resolves one namespaced variable and converts its text with a
//! [`Parser`]. Absent, present and unparsable are kept apart so the caller
//! decides what absence means.

use std::sync::Arc;

use crate::config::EnvSource;
use crate::error::{Error, Result};
use crate::parse::Parser;

/// Outcome of an optional lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The variable is unset
    Absent,
    /// The variable is set and parsed
    Present(T),
    /// The variable is set but the parser rejected this raw text
    ParseFailure(String),
}

impl<T> Lookup<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }
}

/// Handles environment variable lookups and parsing
#[derive(Clone)]
pub struct EnvironmentReader {
    prefix: String,
    source: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for EnvironmentReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentReader")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl EnvironmentReader {
    pub fn new(prefix: impl Into<String>, source: Arc<dyn EnvSource>) -> Self {
        Self {
            prefix: prefix.into(),
            source,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Get the environment variable name for a field key
    ///
    /// Format: {PREFIX}_{KEY} (all uppercase)
    pub fn var_name(&self, key: &str) -> String {
        let env_key = key.replace('.', "_").to_uppercase();
        format!("{}_{}", self.prefix.to_uppercase(), env_key)
    }

    /// Resolve `key`, treating an unset variable as a normal outcome
    pub fn lookup_optional<T: 'static>(&self, key: &str, parser: &Parser<T>) -> Lookup<T> {
        let var = self.var_name(key);
        match self.source.var(&var) {
            None => Lookup::Absent,
            Some(raw) => match parser.parse(&raw) {
                Some(value) => Lookup::Present(value),
                None => Lookup::ParseFailure(raw),
            },
        }
    }

    /// Resolve `key`, treating an unset variable as an error
    pub fn lookup_required<T: 'static>(&self, key: &str, parser: &Parser<T>) -> Result<T> {
        match self.lookup_optional(key, parser) {
            Lookup::Present(value) => Ok(value),
            Lookup::Absent => Err(Error::MissingRequired {
                var: self.var_name(key),
            }),
            Lookup::ParseFailure(raw) => Err(self.parse_failure(key, raw, parser)),
        }
    }

    pub(crate) fn parse_failure<T>(&self, key: &str, raw: String, parser: &Parser<T>) -> Error
    where
        T: 'static,
    {
        Error::ParseFailure {
            var: self.var_name(key),
            raw,
            expected: parser.expected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapEnv;
    use crate::parse;

    fn reader(vars: &[(&str, &str)]) -> EnvironmentReader {
        let env: MapEnv = vars.iter().copied().collect();
        EnvironmentReader::new("app", Arc::new(env))
    }

    #[test]
    fn test_var_name_is_prefixed_and_uppercased() {
        let r = reader(&[]);
        assert_eq!(r.var_name("PORT"), "APP_PORT");
        assert_eq!(r.var_name("github.auth_token"), "APP_GITHUB_AUTH_TOKEN");
    }

    #[test]
    fn test_lookup_optional_outcomes() {
        let r = reader(&[("APP_PORT", "8080"), ("APP_BAD_PORT", "eighty")]);
        let port = parse::integer::<u16>();

        assert_eq!(r.lookup_optional("PORT", &port), Lookup::Present(8080));
        assert_eq!(r.lookup_optional("MISSING", &port), Lookup::Absent);
        assert_eq!(
            r.lookup_optional("BAD_PORT", &port),
            Lookup::ParseFailure("eighty".into())
        );
    }

    #[test]
    fn test_unprefixed_variable_is_not_seen() {
        let r = reader(&[("PORT", "8080")]);
        assert!(r.lookup_optional("PORT", &parse::integer::<u16>()).is_absent());
    }

    #[test]
    fn test_lookup_required_errors() {
        let r = reader(&[("APP_PORT", "30x0")]);
        let port = parse::integer::<u16>();

        let missing = r.lookup_required("CLIENT_ID", &parse::string()).unwrap_err();
        assert_eq!(
            missing,
            Error::MissingRequired {
                var: "APP_CLIENT_ID".into()
            }
        );

        let bad = r.lookup_required("PORT", &port).unwrap_err();
        assert_eq!(
            bad,
            Error::ParseFailure {
                var: "APP_PORT".into(),
                raw: "30x0".into(),
                expected: "integer",
            }
        );
    }
}
