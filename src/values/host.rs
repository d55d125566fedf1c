//! Host binding descriptor

use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which interface(s) a server should listen on.
///
/// Every string is a valid descriptor: the wildcard forms below have a
/// special meaning and anything else names a concrete host.
///
/// | Text  | Meaning                       |
/// |-------|-------------------------------|
/// | `*`   | any interface                 |
/// | `*4`  | any, IPv4 preferred           |
/// | `!4`  | IPv4 only                     |
/// | `*6`  | any, IPv6 preferred           |
/// | `!6`  | IPv6 only                     |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum HostBinding {
    Any,
    #[default]
    PreferIpv4,
    Ipv4Only,
    PreferIpv6,
    Ipv6Only,
    Host(String),
}

impl HostBinding {
    /// Whether this names a concrete host rather than a wildcard
    pub fn is_specific(&self) -> bool {
        matches!(self, HostBinding::Host(_))
    }
}

impl From<&str> for HostBinding {
    fn from(s: &str) -> Self {
        match s {
            "*" => HostBinding::Any,
            "*4" => HostBinding::PreferIpv4,
            "!4" => HostBinding::Ipv4Only,
            "*6" => HostBinding::PreferIpv6,
            "!6" => HostBinding::Ipv6Only,
            other => HostBinding::Host(other.to_string()),
        }
    }
}

impl From<String> for HostBinding {
    fn from(s: String) -> Self {
        match HostBinding::from(s.as_str()) {
            HostBinding::Host(_) => HostBinding::Host(s),
            wildcard => wildcard,
        }
    }
}

impl FromStr for HostBinding {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HostBinding::from(s))
    }
}

impl fmt::Display for HostBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostBinding::Any => f.write_str("*"),
            HostBinding::PreferIpv4 => f.write_str("*4"),
            HostBinding::Ipv4Only => f.write_str("!4"),
            HostBinding::PreferIpv6 => f.write_str("*6"),
            HostBinding::Ipv6Only => f.write_str("!6"),
            HostBinding::Host(host) => f.write_str(host),
        }
    }
}

impl Serialize for HostBinding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
