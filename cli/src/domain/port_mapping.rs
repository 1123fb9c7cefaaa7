//! Load-balancer routing rules as a tagged type.
//!
//! The platform encodes a routing rule as a plain string in one of two
//! forms: `"host:ext=int"` (traffic for `host` arriving on `ext` goes to the
//! target's `int`) or `"ext=int"` when the load balancer's own container
//! publishes `ext` directly. A string counts as the bare form only when both
//! sides of the `=` are all digits; anything with a `:` before the `=` is
//! host-qualified.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::MappingParseError;

/// One routing rule bound to a load-balancer target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortMapping {
    /// `"<host>:<external>=<internal>"`
    HostQualified {
        host: String,
        external: u16,
        internal: u16,
    },
    /// `"<external>=<internal>"` — the LB container publishes `external`.
    Bare { external: u16, internal: u16 },
}

impl PortMapping {
    /// External (source) port of the rule.
    #[must_use]
    pub fn external(&self) -> u16 {
        match self {
            Self::HostQualified { external, .. } | Self::Bare { external, .. } => *external,
        }
    }

    /// Internal (target) port of the rule.
    #[must_use]
    pub fn internal(&self) -> u16 {
        match self {
            Self::HostQualified { internal, .. } | Self::Bare { internal, .. } => *internal,
        }
    }

    /// Whether this mapping serves the given route.
    ///
    /// Host comparison is case-insensitive; a bare mapping matches on the
    /// external port alone, since the host plays no part in its routing.
    #[must_use]
    pub fn serves_route(&self, host: &str, external: u16) -> bool {
        match self {
            Self::HostQualified {
                host: own,
                external: ext,
                ..
            } => *ext == external && own.eq_ignore_ascii_case(host),
            Self::Bare { external: ext, .. } => *ext == external,
        }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostQualified {
                host,
                external,
                internal,
            } => write!(f, "{host}:{external}={internal}"),
            Self::Bare { external, internal } => write!(f, "{external}={internal}"),
        }
    }
}

/// Strict port parse: all-ASCII-digit, no sign, no whitespace.
fn parse_port(s: &str) -> Option<u16> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for PortMapping {
    type Err = MappingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lhs, rhs)) = s.split_once('=') else {
            return Err(MappingParseError::Malformed(s.to_string()));
        };
        let internal =
            parse_port(rhs).ok_or_else(|| MappingParseError::BadPort(s.to_string()))?;

        if let Some((host, ext)) = lhs.rsplit_once(':') {
            if host.is_empty() {
                return Err(MappingParseError::Malformed(s.to_string()));
            }
            let external =
                parse_port(ext).ok_or_else(|| MappingParseError::BadPort(s.to_string()))?;
            return Ok(Self::HostQualified {
                host: host.to_string(),
                external,
                internal,
            });
        }

        let external =
            parse_port(lhs).ok_or_else(|| MappingParseError::Malformed(s.to_string()))?;
        Ok(Self::Bare { external, internal })
    }
}

impl Serialize for PortMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PortMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
