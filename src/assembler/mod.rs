//! Settings assembly
//!
//! [`SettingsAssembler`] walks a schema, resolves each field through an
//! [`EnvironmentReader`], applies defaults, and hands back one complete
//! record or the first fatal error.
//!
//! # Module Structure
//!
//! - `env` - Single-variable lookups (`EnvironmentReader`, `Lookup`)
//! - `builder` - Fluent construction (`SettingsAssemblerBuilder`)

mod builder;
mod env;

pub use builder::{DEFAULT_PREFIX, SettingsAssemblerBuilder};
pub use env::{EnvironmentReader, Lookup};

use log::{debug, info, warn};

use crate::config::{
    BuildMode, FieldKind, FieldSpec, SettingsSchema, ValueType, validate_schema,
};
use crate::error::{Error, Result};
use crate::parse::Parser;

/// A non-fatal notice raised while resolving an optional field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    /// Fully namespaced variable name
    pub var: String,
    pub message: &'static str,
}

/// Resolves schema fields from the environment into a settings record.
///
/// Assembly is a single linear pass: the first missing required variable or
/// unparsable value aborts it, and no partial record is ever returned.
///
/// # Example
///
/// ```rust
/// use envsettings::{AppSettings, MapEnv, SettingsAssembler};
///
/// let env = MapEnv::new()
///     .with("APP_GITHUB_CLIENT_ID", "client")
///     .with("APP_GITHUB_CLIENT_SECRET", "s3cret")
///     .with("APP_PORT", "8080");
///
/// let mut assembler = SettingsAssembler::builder().source(env).build()?;
/// let settings: AppSettings = assembler.assemble()?;
///
/// assert_eq!(settings.port, 8080);
/// # Ok::<(), envsettings::Error>(())
/// ```
#[derive(Debug)]
pub struct SettingsAssembler {
    reader: EnvironmentReader,
    build_mode: BuildMode,
    resolved: Vec<&'static str>,
    advisories: Vec<Advisory>,
}

impl SettingsAssembler {
    /// Create a builder for configuring the assembler
    pub fn builder() -> SettingsAssemblerBuilder {
        SettingsAssemblerBuilder::new()
    }

    pub fn new(reader: EnvironmentReader, build_mode: BuildMode) -> Self {
        Self {
            reader,
            build_mode,
            resolved: Vec::new(),
            advisories: Vec::new(),
        }
    }

    pub fn reader(&self) -> &EnvironmentReader {
        &self.reader
    }

    pub fn build_mode(&self) -> BuildMode {
        self.build_mode
    }

    /// Value for every build-mode derived flag
    pub fn derived_flag(&self) -> bool {
        self.build_mode.derived_flag()
    }

    /// Advisories raised by the most recent assembly
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    // =========================================================================
    // Field resolution
    // =========================================================================

    /// Resolve a field that falls back to `default` when unset
    ///
    /// A set but malformed variable is an error; the default never hides it.
    pub fn resolve_optional_with_default<T: 'static>(
        &mut self,
        field: &FieldSpec,
        parser: &Parser<T>,
        default: T,
    ) -> Result<T> {
        self.mark_resolved(field, FieldKind::OptionalWithDefault(""), parser.expected())?;
        match self.reader.lookup_optional(field.key, parser) {
            Lookup::Present(value) => {
                debug!("{} read from environment", self.reader.var_name(field.key));
                Ok(value)
            }
            Lookup::Absent => {
                debug!(
                    "{} unset, using default {}",
                    self.reader.var_name(field.key),
                    field.default_text().unwrap_or_default()
                );
                Ok(default)
            }
            Lookup::ParseFailure(raw) => Err(self.reader.parse_failure(field.key, raw, parser)),
        }
    }

    /// Resolve a field that must be set and well-formed
    pub fn resolve_required<T: 'static>(
        &mut self,
        field: &FieldSpec,
        parser: &Parser<T>,
    ) -> Result<T> {
        self.mark_resolved(field, FieldKind::Required, parser.expected())?;
        let value = self.reader.lookup_required(field.key, parser)?;
        debug!("{} read from environment", self.reader.var_name(field.key));
        Ok(value)
    }

    /// Resolve a field that is `None` when unset
    ///
    /// When the field carries an advisory and resolves to `None`, the
    /// advisory is logged once per assembly.
    pub fn resolve_optional_no_default<T: 'static>(
        &mut self,
        field: &FieldSpec,
        parser: &Parser<T>,
    ) -> Result<Option<T>> {
        self.mark_resolved(field, FieldKind::OptionalNoDefault, parser.expected())?;
        match self.reader.lookup_optional(field.key, parser) {
            Lookup::Present(value) => {
                debug!("{} read from environment", self.reader.var_name(field.key));
                Ok(Some(value))
            }
            Lookup::Absent => {
                let var = self.reader.var_name(field.key);
                debug!("{var} unset");
                if let Some(message) = field.advisory {
                    self.advise(var, message);
                }
                Ok(None)
            }
            Lookup::ParseFailure(raw) => Err(self.reader.parse_failure(field.key, raw, parser)),
        }
    }

    fn advise(&mut self, var: String, message: &'static str) {
        if self.advisories.iter().any(|a| a.var == var) {
            return;
        }
        warn!("{var} is not set: {message}");
        self.advisories.push(Advisory { var, message });
    }

    fn mark_resolved(
        &mut self,
        field: &FieldSpec,
        expected: FieldKind,
        parser_name: &'static str,
    ) -> Result<()> {
        if std::mem::discriminant(&field.kind) != std::mem::discriminant(&expected) {
            return Err(Error::KindMismatch {
                key: field.key.to_string(),
                expected: expected.as_str(),
                actual: field.kind.as_str(),
            });
        }
        if let Some(parsed) = ValueType::for_parser(parser_name) {
            if parsed != field.value_type {
                return Err(Error::TypeMismatch {
                    key: field.key.to_string(),
                    declared: field.value_type.as_str(),
                    parser: parser_name,
                });
            }
        }
        if self.resolved.contains(&field.key) {
            return Err(Error::InvalidSchema {
                key: field.key.to_string(),
                reason: "resolved more than once".to_string(),
            });
        }
        self.resolved.push(field.key);
        Ok(())
    }

    // =========================================================================
    // Assembly
    // =========================================================================

    /// Resolve every field of `S` and build the record
    ///
    /// Fails on the first missing required variable or malformed value.
    /// Calling this again against the same environment yields an equal
    /// record.
    pub fn assemble<S: SettingsSchema>(&mut self) -> Result<S> {
        let fields = S::fields();
        validate_schema(fields)?;

        self.resolved.clear();
        self.advisories.clear();

        let settings = S::resolve(self)?;

        if let Some(field) = fields.iter().find(|f| !self.resolved.contains(&f.key)) {
            return Err(Error::UnresolvedField(field.key.to_string()));
        }
        if let Some(key) = self
            .resolved
            .iter()
            .find(|key| !fields.iter().any(|f| f.key == **key))
        {
            return Err(Error::InvalidSchema {
                key: (*key).to_string(),
                reason: "resolved but not declared in the schema".to_string(),
            });
        }

        info!(
            "Settings assembled: {} fields from environment, {} build",
            fields.len(),
            self.build_mode
        );
        Ok(settings)
    }
}
