use crate::webc;
use derive_more::{Display, From};
use std::sync::Arc;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
#[display("{self:?}")]
pub enum Error {
	// -- Contract violations
	/// `call()` was invoked before `dial()`.
	NotDialed { service: String },
	/// A cloud service was called without an email/password pair.
	MissingCredentials { service: String },
	/// The blocking `call()` was invoked from within an async runtime.
	BlockingCallInRuntime { service: String },

	// -- Authentication
	/// The gateway login did not yield a token, so the call cannot proceed.
	CouldNotAuthenticate { service: String },

	// -- Web Call
	WebServiceCall {
		service: String,
		webc_error: Arc<webc::Error>,
	},

	// -- Runtime
	/// The blocking `call()` could not build its runtime.
	Runtime { cause: String },

	// -- Externals
	#[from]
	Io(std::io::Error),
	#[from]
	SerdeJson(serde_json::Error),
}

/// Classification
impl Error {
	/// Programmer misuse: calling before dialing, calling a cloud service without credentials,
	/// or blocking on a call from within an async runtime.
	pub fn is_contract_violation(&self) -> bool {
		matches!(
			self,
			Self::NotDialed { .. } | Self::MissingCredentials { .. } | Self::BlockingCallInRuntime { .. }
		)
	}

	/// Errors that must cross the component boundary as hard failures.
	///
	/// Everything else (transport failures, non-2xx responses) is recoverable and
	/// also retrievable from the service's `last_error()`.
	pub fn is_fatal(&self) -> bool {
		self.is_contract_violation() || matches!(self, Self::CouldNotAuthenticate { .. })
	}

	/// The underlying web error for a failed service call, if that is what this is.
	pub fn webc_error(&self) -> Option<&webc::Error> {
		match self {
			Self::WebServiceCall { webc_error, .. } => Some(webc_error.as_ref()),
			_ => None,
		}
	}
}

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
