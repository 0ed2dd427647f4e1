//! Resolves where a service lives.
//!
//! - `Endpoint` - the base URL a client is bound to.
//! - `Namespace`, `Protocol` - the routing metadata that alters address construction.
//! - host naming - `local_host_name`, `local_base_url`, `gateway_url`.

// region:    --- Modules

mod endpoint;
mod host_name;
mod namespace;

pub use endpoint::*;
pub use host_name::*;
pub use namespace::*;

// endregion: --- Modules
