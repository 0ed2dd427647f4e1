use crate::resolver::Endpoint;

/// A `ServiceTarget` represents the destination a service client is bound to by `dial()`.
///
/// This structure contains:
/// - `service`: The logical name of the service being called.
/// - `endpoint`: The base URL every request path of this binding is joined onto.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ServiceTarget {
	pub service: String,
	pub endpoint: Endpoint,
}

/// Getters
impl ServiceTarget {
	pub fn base_url(&self) -> &str {
		self.endpoint.base_url()
	}
}
