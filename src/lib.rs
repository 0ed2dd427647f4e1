//! Client-side transport for calling microservices from an aggregator.
//!
//! Two kinds of targets are supported:
//! - `LocalService` - reached directly through the branch/environment host-naming convention.
//! - `CloudService` - reached through the API gateway, with a login step and a bearer token per call.
//!
//! Both implement `ServiceCaller`: `dial(request)` resolves the address and binds the request,
//! then `call()` (blocking) or `call_async()` executes it.

// region:    --- Modules

mod error;
mod request;

pub mod config;
pub mod resolver;
pub mod service;
pub mod webc;

pub use error::{Error, Result};
pub use request::*;
pub use service::{AuthToken, CloudService, LocalService, ServiceCaller, ServiceTarget};

// endregion: --- Modules
