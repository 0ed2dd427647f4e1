use crate::resolver::Endpoint;
use crate::service::ServiceTarget;
use crate::webc::{self, HttpTransport, WebPayload, WebRequest};
use crate::{Error, Request, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// The per-call state shared by all service variants.
#[derive(Debug, Default)]
pub(crate) struct CallSession {
	target: Option<ServiceTarget>,
	current_request: Option<Request>,
	last_error: Option<Arc<webc::Error>>,
}

/// Binding
impl CallSession {
	/// Replaces the bound target and the current request.
	pub fn bind(&mut self, target: ServiceTarget, request: Request) {
		debug!("dial {} -> {}", target.service, target.endpoint);
		self.target = Some(target);
		self.current_request = Some(request);
	}

	/// The bound target and current request, or `Error::NotDialed`.
	pub fn dialed(&self, service: &str) -> Result<(&ServiceTarget, &Request)> {
		match (&self.target, &self.current_request) {
			(Some(target), Some(request)) => Ok((target, request)),
			_ => Err(Error::NotDialed {
				service: service.to_string(),
			}),
		}
	}
}

/// Getters
impl CallSession {
	pub fn target(&self) -> Option<&ServiceTarget> {
		self.target.as_ref()
	}

	pub fn current_request(&self) -> Option<&Request> {
		self.current_request.as_ref()
	}

	pub fn last_error(&self) -> Option<&webc::Error> {
		self.last_error.as_deref()
	}
}

/// Execution
impl CallSession {
	/// Sends `web_request` and decodes the response body.
	/// A failed exchange is captured as the last error and returned as `Error::WebServiceCall`.
	pub async fn execute<T: HttpTransport>(
		&mut self,
		transport: &T,
		service: &str,
		web_request: WebRequest,
	) -> Result<Value> {
		match transport.send(web_request).await {
			Ok(web_response) => Ok(web_response.body),
			Err(webc_error) => {
				error!("An error occurred calling the service '{service}'. Detail: {webc_error}");
				Err(self.capture(service, webc_error))
			}
		}
	}

	/// Stores the error as the last error and wraps it for the caller.
	pub fn capture(&mut self, service: &str, webc_error: webc::Error) -> Error {
		let webc_error = Arc::new(webc_error);
		self.last_error = Some(webc_error.clone());
		Error::WebServiceCall {
			service: service.to_string(),
			webc_error,
		}
	}
}

// region:    --- Support

/// Builds the outgoing request for `request` against `endpoint`/`path`.
///
/// - the query is always sent (an empty one adds nothing to the URL)
/// - multipart parts, when present, take precedence over the JSON body
/// - `extra_headers` override request headers of the same name (case-insensitive)
pub(crate) fn to_web_request(
	endpoint: &Endpoint,
	path: &str,
	request: &Request,
	extra_headers: Vec<(String, String)>,
) -> WebRequest {
	let mut headers: Vec<(String, String)> = request
		.headers
		.iter()
		.filter(|(name, _)| !extra_headers.iter().any(|(extra, _)| extra.eq_ignore_ascii_case(name)))
		.map(|(name, value)| (name.clone(), value.clone()))
		.collect();
	headers.extend(extra_headers);

	let payload = if request.has_multipart() {
		WebPayload::Multipart(request.multipart.clone())
	} else if request.has_body() {
		WebPayload::Json(Value::Object(request.body.clone()))
	} else {
		WebPayload::Empty
	};

	WebRequest {
		method: request.method.clone(),
		url: endpoint.join(path),
		query: request.query_pairs(),
		headers,
		payload,
	}
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MultipartPart;
	use serde_json::json;

	#[test]
	fn test_to_web_request_json_body() {
		let endpoint = Endpoint::from_static("http://orders-master-testing.orders");
		let request = Request::new("example", "POST")
			.with_body(json!({"wibble": true}))
			.with_query(json!({"page": 2, "sort": "asc"}))
			.with_header("x-trace", "abc");

		let web_request = to_web_request(&endpoint, &request.resource, &request, Vec::new());

		assert_eq!(web_request.url, "http://orders-master-testing.orders/example");
		assert_eq!(web_request.method, "POST");
		assert_eq!(web_request.payload, WebPayload::Json(json!({"wibble": true})));
		assert_eq!(
			web_request.query,
			vec![("page".to_string(), "2".to_string()), ("sort".to_string(), "asc".to_string())]
		);
		assert_eq!(web_request.header("X-Trace"), Some("abc"));
	}

	#[test]
	fn test_to_web_request_empty_body_and_multipart() {
		let endpoint = Endpoint::from_static("http://host");

		let request = Request::new("list", "GET");
		let web_request = to_web_request(&endpoint, "list", &request, Vec::new());
		assert_eq!(web_request.payload, WebPayload::Empty);

		let part = MultipartPart::new("file", "content").with_filename("a.txt");
		let request = Request::new("upload", "POST")
			.with_body(json!({"ignored": true}))
			.with_multipart_part(part.clone());
		let web_request = to_web_request(&endpoint, "upload", &request, Vec::new());
		assert_eq!(web_request.payload, WebPayload::Multipart(vec![part]));
	}

	#[test]
	fn test_to_web_request_extra_headers_override() {
		let endpoint = Endpoint::from_static("https://gw");
		let request = Request::new("list", "GET").with_header("authorization", "Bearer stale");

		let extra = vec![("Authorization".to_string(), "Bearer fresh".to_string())];
		let web_request = to_web_request(&endpoint, "service/orders/list", &request, extra);

		assert_eq!(web_request.headers.len(), 1);
		assert_eq!(web_request.header("authorization"), Some("Bearer fresh"));
	}

	#[test]
	fn test_dialed_before_bind() {
		let session = CallSession::default();
		let err = session.dialed("orders").err();
		assert!(matches!(err, Some(Error::NotDialed { .. })));
	}
}

// endregion: --- Tests
