//! Documentation generator for settings schema
//!
//! Generates a markdown reference of environment variables from
//! `SettingsSchema` field lists.

use crate::assembler::DEFAULT_PREFIX;
use crate::config::{FieldKind, FieldSpec, SettingsSchema};

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Namespace prefix shown in variable names (default: `APP`)
    pub prefix: Option<String>,
    /// Whether to list build-mode derived flags
    pub show_derived: bool,
    /// Whether to split required and optional variables into sections
    pub group_by_kind: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_derived: true,
            group_by_kind: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn hide_derived(mut self) -> Self {
        self.show_derived = false;
        self
    }

    #[must_use]
    pub fn flat(mut self) -> Self {
        self.group_by_kind = false;
        self
    }
}

/// Generate markdown documentation from a settings schema
#[must_use]
pub fn generate_docs<T: SettingsSchema>(config: DocsConfig) -> String {
    generate_docs_from_fields(T::fields(), T::derived_flags(), config)
}

/// Generate docs from a raw field list (useful when schema isn't available)
#[must_use]
pub fn generate_docs_from_fields(
    fields: &[FieldSpec],
    derived_flags: &[&str],
    config: DocsConfig,
) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    let prefix = config
        .prefix
        .as_deref()
        .unwrap_or(DEFAULT_PREFIX)
        .to_uppercase();

    let title = config
        .title
        .unwrap_or_else(|| "Environment Reference".to_string());
    writeln!(output, "# {title}\n").unwrap();

    if let Some(desc) = config.description {
        writeln!(output, "{desc}\n").unwrap();
    }

    if config.group_by_kind {
        let (required, optional): (Vec<&FieldSpec>, Vec<&FieldSpec>) =
            fields.iter().partition(|f| f.is_required());

        if !required.is_empty() {
            output.push_str("## Required\n\n");
            write_table(&mut output, &prefix, &required);
        }
        if !optional.is_empty() {
            output.push_str("## Optional\n\n");
            write_table(&mut output, &prefix, &optional);
        }
    } else {
        output.push_str("## Variables\n\n");
        let all: Vec<&FieldSpec> = fields.iter().collect();
        write_table(&mut output, &prefix, &all);
    }

    if config.show_derived && !derived_flags.is_empty() {
        output.push_str("## Build-mode flags\n\n");
        output.push_str(
            "Not read from the environment. `true` in development builds, `false` in production.\n\n",
        );
        for flag in derived_flags {
            writeln!(output, "- `{flag}`").unwrap();
        }
        output.push('\n');
    }

    output
}

fn write_table(out: &mut String, prefix: &str, fields: &[&FieldSpec]) {
    use std::fmt::Write;

    out.push_str("| Variable | Type | Default | Description |\n");
    out.push_str("|----------|------|---------|-------------|\n");
    for field in fields {
        let mut description = field.description.to_string();
        if let Some(advisory) = field.advisory {
            if !description.is_empty() {
                description.push_str(". ");
            }
            write!(description, "If unset: {advisory}").unwrap();
        }
        writeln!(
            out,
            "| `{prefix}_{}` | {} | {} | {} |",
            field.key,
            field.value_type,
            format_default(field.kind),
            description
        )
        .unwrap();
    }
    out.push('\n');
}

fn format_default(kind: FieldKind) -> String {
    match kind {
        FieldKind::Required => "*required*".to_string(),
        FieldKind::OptionalWithDefault(text) => format!("`{text}`"),
        FieldKind::OptionalNoDefault => "*none*".to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
