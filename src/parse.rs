//! Value parsers for environment variable text
//!
//! A [`Parser`] turns raw variable text into a typed value, or rejects it.
//! Parsers come in two flavours:
//!
//! - **Strict** ([`integer`], [`boolean`], [`duration`], [`version`]): the
//!   text must be exactly a literal of the type. `PORT="3000"` and
//!   `PORT=+3000` are rejected.
//! - **Lenient** ([`string`], [`path`], [`host`], [`secret`]): the text is
//!   first read as a JSON string literal (`"http://x"`); if that fails it is
//!   wrapped in double quotes and read again, so unquoted shell values such
//!   as `http://localhost:3000` are accepted too. Raw control characters
//!   (tabs, newlines) survive the retry as-is.
//!
//! Custom parsers are built with [`Parser::new`].
//!
//! ```rust
//! use envsettings::parse;
//!
//! let root = parse::string();
//! assert_eq!(root.parse("http://localhost:3000").as_deref(), Some("http://localhost:3000"));
//! assert_eq!(root.parse("\"http://localhost:3000\"").as_deref(), Some("http://localhost:3000"));
//!
//! let port = parse::integer::<u16>();
//! assert_eq!(port.parse("3000"), Some(3000));
//! assert_eq!(port.parse("\"3000\""), None);
//! ```

use regex::Regex;
use serde::de::DeserializeOwned;
use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use time::Duration;

use crate::values::{HostBinding, Version};

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)(ms|s|m|h|d)?$").expect("duration pattern is valid")
});

/// A named parse function from raw text to `T`
pub struct Parser<T> {
    expected: &'static str,
    run: Arc<dyn Fn(&str) -> Option<T> + Send + Sync>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            expected: self.expected,
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> std::fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap a custom parse function
    ///
    /// `expected` names the target type in diagnostics
    /// (`failed to parse APP_X as <expected>`).
    pub fn new<F>(expected: &'static str, f: F) -> Self
    where
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            expected,
            run: Arc::new(f),
        }
    }

    pub fn parse(&self, raw: &str) -> Option<T> {
        (self.run)(raw)
    }

    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// Convert successful results
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let run = self.run;
        Parser::new(self.expected, move |raw| run(raw).map(&f))
    }

    /// Try `fallback` when this parser rejects the text
    #[must_use]
    pub fn or(self, fallback: Parser<T>) -> Parser<T> {
        let primary = self.run;
        let secondary = fallback.run;
        Parser::new(self.expected, move |raw| {
            primary(raw).or_else(|| secondary(raw))
        })
    }
}

// =============================================================================
// Literal Parsers
// =============================================================================

/// Read the text as a JSON literal of `T`
pub fn literal<T: DeserializeOwned + 'static>(expected: &'static str) -> Parser<T> {
    Parser::new(expected, |raw| serde_json::from_str(raw).ok())
}

/// Wrap the text in double quotes, then read it as a JSON literal of `T`
///
/// Control characters are escaped on the way in, since JSON strings cannot
/// hold them raw.
pub fn quoted<T: DeserializeOwned + 'static>(expected: &'static str) -> Parser<T> {
    Parser::new(expected, |raw| serde_json::from_str(&quote(raw)).ok())
}

fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        if c < '\u{20}' {
            out.push_str(&format!("\\u{:04x}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}

/// [`literal`], retried as [`quoted`] when the first read fails
pub fn lenient<T: DeserializeOwned + 'static>(expected: &'static str) -> Parser<T> {
    literal(expected).or(quoted(expected))
}

// =============================================================================
// Lenient Parsers
// =============================================================================

pub fn string() -> Parser<String> {
    lenient("string")
}

pub fn path() -> Parser<PathBuf> {
    lenient::<String>("path").map(PathBuf::from)
}

pub fn host() -> Parser<HostBinding> {
    lenient::<String>("host").map(HostBinding::from)
}

pub fn secret() -> Parser<SecretString> {
    lenient::<String>("secret").map(SecretString::from)
}

// =============================================================================
// Strict Parsers
// =============================================================================

/// Decimal digits, with a leading `-` for signed types
pub fn integer<T: FromStr + 'static>() -> Parser<T> {
    Parser::new("integer", |raw| {
        if raw.starts_with('+') {
            return None;
        }
        raw.parse().ok()
    })
}

/// `true` or `false`, any case
pub fn boolean() -> Parser<bool> {
    Parser::new("boolean", |raw| {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    })
}

/// A non-negative count with an optional unit; a bare count is seconds
///
/// Units: `ms`, `s`, `m`, `h`, `d`.
pub fn duration() -> Parser<Duration> {
    Parser::new("duration", parse_duration)
}

pub fn version() -> Parser<Version> {
    Parser::new("version", |raw| raw.parse().ok())
}

fn parse_duration(raw: &str) -> Option<Duration> {
    let caps = DURATION_RE.captures(raw)?;
    let count: i64 = caps.get(1)?.as_str().parse().ok()?;

    match caps.get(2).map(|m| m.as_str()) {
        Some("ms") => Some(Duration::milliseconds(count)),
        None | Some("s") => Some(Duration::seconds(count)),
        Some("m") => count.checked_mul(60).map(Duration::seconds),
        Some("h") => count.checked_mul(60 * 60).map(Duration::seconds),
        Some("d") => count.checked_mul(24 * 60 * 60).map(Duration::seconds),
        Some(_) => None,
    }
}

/// Render a duration the way [`duration`] reads it, in the largest exact unit
pub fn format_duration(d: Duration) -> String {
    let ms = d.whole_milliseconds();
    if ms % 1000 != 0 {
        return format!("{ms}ms");
    }
    let secs = d.whole_seconds();
    for (unit, size) in [("d", 86_400), ("h", 3_600), ("m", 60)] {
        if secs != 0 && secs % size == 0 {
            return format!("{}{unit}", secs / size);
        }
    }
    format!("{secs}s")
}
