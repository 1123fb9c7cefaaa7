//! Human-readable service locators.

use std::str::FromStr;

use crate::domain::error::LocatorError;

/// `"<service>.<stack>.<anything>"` — only the first two dot-separated
/// labels matter; the rest is typically a DNS suffix and is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLocator {
    pub service: String,
    pub stack: String,
}

impl FromStr for ServiceLocator {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut labels = s.split('.');
        match (labels.next(), labels.next()) {
            (Some(service), Some(stack)) if !service.is_empty() && !stack.is_empty() => {
                Ok(Self {
                    service: service.to_string(),
                    stack: stack.to_string(),
                })
            }
            _ => Err(LocatorError::Invalid(s.to_string())),
        }
    }
}
