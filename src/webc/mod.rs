//! The HTTP collaborator.
//!
//! `HttpTransport` is the seam services execute requests through. `WebClient` is its
//! `reqwest` implementation; tests provide their own.

// region:    --- Modules

mod error;
mod web_client;

pub use error::{Error, Result};
pub use web_client::*;

// endregion: --- Modules
