//! Value types a settings field can resolve to
//!
//! - `serialize_redacted` - placeholder output for credentials
//! - `HostBinding` - which interface a server should bind to
//! - `Version` - dotted numeric version with optional tags

mod host;
mod secret;
mod version;

pub use host::HostBinding;
pub use secret::{REDACTED, serialize_redacted, serialize_redacted_opt};
pub use version::{ParseVersionError, Version};
