//! Settings schema trait and field definitions
//!
//! # Overview
//!
//! A schema is a fixed, ordered list of [`FieldSpec`]s known at compile
//! time. Each `FieldSpec` names one environment variable (without the namespace
//! prefix), the type its text parses to, and whether it is required.
//!
//! ```rust
//! use envsettings::{FieldSpec, ValueType};
//!
//! const PORT: FieldSpec = FieldSpec::optional("PORT", ValueType::Integer, "3000")
//!     .describe("Port to listen on");
//!
//! const CLIENT_SECRET: FieldSpec = FieldSpec::required("CLIENT_SECRET", ValueType::Secret);
//!
//! assert!(PORT.default_text().is_some());
//! assert!(CLIENT_SECRET.is_secret());
//! ```
//!
//! The record type implements [`SettingsSchema`], pairing the field list
//! with the code that resolves each field through a
//! [`SettingsAssembler`](crate::SettingsAssembler).

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use crate::assembler::SettingsAssembler;
use crate::error::{Error, Result};

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("key pattern is valid"));

// =============================================================================
// Field Types
// =============================================================================

/// Type a field's text is converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Free-form text, read leniently
    String,
    /// Whole number, read strictly
    Integer,
    /// `true` / `false`, read strictly
    Boolean,
    /// Count with an optional `ms|s|m|h|d` unit
    Duration,
    /// Dotted numeric version, e.g. `2.3.1`
    Version,
    /// Free-form text wrapped so it never prints
    Secret,
    /// Interface to bind, e.g. `*4` or `127.0.0.1`
    HostBinding,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::Duration => "duration",
            ValueType::Version => "version",
            ValueType::Secret => "secret",
            ValueType::HostBinding => "host",
        }
    }

    /// The type a built-in parser produces, looked up by its expected name
    ///
    /// Custom parsers have names of their own and map to `None`.
    pub fn for_parser(expected: &str) -> Option<Self> {
        match expected {
            "string" | "path" => Some(ValueType::String),
            "integer" => Some(ValueType::Integer),
            "boolean" => Some(ValueType::Boolean),
            "duration" => Some(ValueType::Duration),
            "version" => Some(ValueType::Version),
            "secret" => Some(ValueType::Secret),
            "host" => Some(ValueType::HostBinding),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field behaves when its variable is unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Absence is fatal
    Required,
    /// Absence yields a default; the text here is its documented form
    OptionalWithDefault(&'static str),
    /// Absence yields `None`
    OptionalNoDefault,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Required => "required",
            FieldKind::OptionalWithDefault(_) => "optional",
            FieldKind::OptionalNoDefault => "optional (no default)",
        }
    }
}

// =============================================================================
// Field Spec
// =============================================================================

/// One named, typed configuration slot
///
/// `value_type` is checked against the parser passed to each
/// `resolve_*` call when that parser is one of the built-ins in
/// [`parse`](crate::parse); custom parsers are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Variable name without the namespace prefix, e.g. `PORT`
    pub key: &'static str,
    pub value_type: ValueType,
    pub kind: FieldKind,
    pub description: &'static str,
    /// Operator-facing message logged once when an optional field is absent
    pub advisory: Option<&'static str>,
}

impl FieldSpec {
    const fn new(key: &'static str, value_type: ValueType, kind: FieldKind) -> Self {
        Self {
            key,
            value_type,
            kind,
            description: "",
            advisory: None,
        }
    }

    /// A field that must be set
    pub const fn required(key: &'static str, value_type: ValueType) -> Self {
        Self::new(key, value_type, FieldKind::Required)
    }

    /// A field with a default, documented as `default`
    pub const fn optional(key: &'static str, value_type: ValueType, default: &'static str) -> Self {
        Self::new(key, value_type, FieldKind::OptionalWithDefault(default))
    }

    /// A field with no sensible default; resolves to `None` when unset
    pub const fn optional_no_default(key: &'static str, value_type: ValueType) -> Self {
        Self::new(key, value_type, FieldKind::OptionalNoDefault)
    }

    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Attach a warning emitted when this optional field resolves to `None`
    #[must_use]
    pub const fn advise_when_absent(mut self, message: &'static str) -> Self {
        self.advisory = Some(message);
        self
    }

    pub const fn is_required(&self) -> bool {
        matches!(self.kind, FieldKind::Required)
    }

    pub const fn is_secret(&self) -> bool {
        matches!(self.value_type, ValueType::Secret)
    }

    /// Documented default text, if the field has one
    pub const fn default_text(&self) -> Option<&'static str> {
        match self.kind {
            FieldKind::OptionalWithDefault(text) => Some(text),
            _ => None,
        }
    }
}

// =============================================================================
// Settings Schema Trait
// =============================================================================

/// Trait for settings records assembled from the environment
///
/// Implement this for the application's settings struct. `resolve` must
/// resolve every entry of `fields()` exactly once;
/// [`SettingsAssembler::assemble`] checks this.
pub trait SettingsSchema: Sized {
    /// All environment-sourced fields, in resolution order
    fn fields() -> &'static [FieldSpec];

    /// Names of flags derived from the build mode instead of the environment
    #[must_use]
    fn derived_flags() -> &'static [&'static str] {
        &[]
    }

    /// Build the record, resolving each field through `assembler`
    fn resolve(assembler: &mut SettingsAssembler) -> Result<Self>;
}

// =============================================================================
// Schema Validation
// =============================================================================

/// Validate a field list before any variable is read
///
/// Checks:
/// - Keys are non-empty upper-case identifiers (`[A-Z][A-Z0-9_]*`)
/// - Keys are unique
/// - Secret fields carry no documented default
/// - Advisories are only attached to optional fields without a default
pub fn validate_schema(fields: &[FieldSpec]) -> Result<()> {
    let mut seen = HashSet::new();

    for field in fields {
        let invalid = |reason: &str| Error::InvalidSchema {
            key: field.key.to_string(),
            reason: reason.to_string(),
        };

        if !KEY_RE.is_match(field.key) {
            return Err(invalid("key must match [A-Z][A-Z0-9_]*"));
        }
        if !seen.insert(field.key) {
            return Err(invalid("duplicate key"));
        }
        if field.is_secret() && field.default_text().is_some() {
            return Err(invalid("secret fields cannot have a default"));
        }
        if field.advisory.is_some() && field.kind != FieldKind::OptionalNoDefault {
            return Err(invalid("advisories only apply to optional fields without a default"));
        }
    }

    Ok(())
}
