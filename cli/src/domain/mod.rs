//! Domain layer — pure types, parsing, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod locator;
pub mod port_mapping;
pub mod target;

pub use config::{ApiConfig, WaitTimeouts};
pub use error::{
    AllocError, ApiError, LocatorError, LookupError, MappingParseError, MergeError, WaitError,
};
pub use locator::ServiceLocator;
pub use port_mapping::PortMapping;
pub use target::{PortRule, PublicEndpoint, Target, TargetState};
