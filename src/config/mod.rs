//! Configuration of the transport: the deployment metadata (branch, environment, domain, gateway)
//! and the per-service routes and credentials.
//!
//! `TransportConfig` is the explicit struct handed to each service constructor.
//! It can be deserialized from JSON or collected from a `ConfigSource` (e.g., `SOA_*` environment variables).

// region:    --- Modules

mod config_source;
mod transport_config;

pub use config_source::*;
pub use transport_config::*;

// endregion: --- Modules
