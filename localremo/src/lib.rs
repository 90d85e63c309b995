//! Talk to a Nature Remo style IR bridge on the local network.
//!
//! Two independent phases, always run in order:
//! 1. [`mdns::resolver::discover`] browses for `_remo._tcp` and returns the
//!    first device that answers, bounded by its own timeout.
//! 2. [`api::client::SignalClient`] performs one GET or POST against the
//!    device's `/messages` endpoint, bounded by a [`api::scope::RequestScope`].
//!
//! The discovery timeout and the request scope are separate deadline domains:
//! neither one shortens the other.

pub mod api;
pub mod config;
pub mod error;
pub mod mdns;
pub mod signal_file;

pub use api::client::SignalClient;
pub use api::scope::RequestScope;
pub use error::{Error, ErrorKind, Result};
pub use shared::types::{IrSignal, ServiceEndpoint};
