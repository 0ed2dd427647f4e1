use std::sync::Arc;

/// A construct to store the base URL a service client is bound to.
/// It is designed to be efficiently clonable.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
	inner: Arc<str>,
}

/// Constructors
impl Endpoint {
	#[must_use]
	pub fn from_static(url: &'static str) -> Self {
		Self { inner: Arc::from(url) }
	}

	pub fn from_owned(url: impl Into<Arc<str>>) -> Self {
		Self { inner: url.into() }
	}
}

/// Getters
impl Endpoint {
	#[must_use]
	pub fn base_url(&self) -> &str {
		&self.inner
	}

	/// Joins a relative path onto the base URL with exactly one `/` between them.
	/// An empty path returns the base URL as is.
	#[must_use]
	pub fn join(&self, path: &str) -> String {
		let path = path.trim_start_matches('/');
		if path.is_empty() {
			return self.inner.to_string();
		}
		format!("{}/{path}", self.inner.trim_end_matches('/'))
	}
}

impl std::fmt::Display for Endpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.inner)
	}
}

// region:    --- Tests


// endregion: --- Tests
