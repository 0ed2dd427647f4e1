use derive_more::{Display, From};
use reqwest::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
#[display("{self:?}")]
pub enum Error {
	ResponseFailedStatus {
		status: StatusCode,
		body: String,
	},
	ResponseFailedInvalidJson {
		body: String,
		cause: String,
	},
	InvalidMethod {
		method: String,
	},
	InvalidHeader {
		name: String,
	},

	#[from]
	Reqwest(reqwest::Error),
}

/// Getters
impl Error {
	/// The response body of the failed exchange, if there was one.
	pub fn response_body(&self) -> Option<&str> {
		match self {
			Self::ResponseFailedStatus { body, .. } | Self::ResponseFailedInvalidJson { body, .. } => Some(body),
			_ => None,
		}
	}

	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::ResponseFailedStatus { status, .. } => Some(*status),
			Self::Reqwest(err) => err.status(),
			_ => None,
		}
	}
}

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
