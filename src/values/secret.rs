//! Redacted output for credentials
//!
//! Credentials are held as [`secrecy::SecretString`], whose `Debug` output
//! is already redacted. It deliberately has no `Serialize`, so records that
//! carry one use these helpers to write a placeholder instead.
//!
//! ```
//! use envsettings::SecretString;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Creds {
//!     #[serde(serialize_with = "envsettings::values::serialize_redacted")]
//!     token: SecretString,
//! }
//!
//! let creds = Creds { token: SecretString::from("ghp_abc") };
//! assert_eq!(serde_json::to_string(&creds).unwrap(), r#"{"token":"***"}"#);
//! ```

use secrecy::SecretString;
use serde::Serializer;

/// Placeholder written in place of a secret value
pub const REDACTED: &str = "***";

pub fn serialize_redacted<S: Serializer>(
    _secret: &SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

/// Like [`serialize_redacted`], but an absent secret stays `null`
pub fn serialize_redacted_opt<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(_) => serializer.serialize_str(REDACTED),
        None => serializer.serialize_none(),
    }
}
