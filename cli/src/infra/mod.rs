//! Infrastructure layer — concrete implementations of application port
//! traits. All I/O-performing code lives here: the platform HTTP
//! transport, the registrar client, and the real clock.

pub mod api;
pub mod clock;
pub mod dns;

pub use api::HttpTransport;
pub use clock::SystemClock;
pub use dns::{DnsClient, DnsConfig, DnsOutcome};
