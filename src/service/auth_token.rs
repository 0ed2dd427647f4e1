use std::sync::Arc;

/// A bearer token obtained from the API gateway login.
///
/// Tokens are not cached: every authenticated call logs in again.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
	inner: Arc<str>,
}

impl AuthToken {
	pub fn new(token: impl Into<Arc<str>>) -> Self {
		Self { inner: token.into() }
	}

	pub fn as_str(&self) -> &str {
		&self.inner
	}

	/// The `Authorization` header value.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.inner)
	}
}

// Keep the token out of the logs.
impl std::fmt::Debug for AuthToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("AuthToken(REDACTED)")
	}
}
