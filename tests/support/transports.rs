use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use svc_transport::webc::{self, HttpTransport, WebClient, WebRequest, WebResponse};

// region:    --- MockTransport

/// An in-memory transport that records every request and replays queued responses in order.
/// When nothing is queued, it answers `503 Service Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
	inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
	responses: VecDeque<webc::Result<WebResponse>>,
	requests: Vec<WebRequest>,
}

impl MockTransport {
	pub fn push_json(&self, body: Value) -> &Self {
		self.push(Ok(WebResponse {
			status: StatusCode::OK,
			body,
		}))
	}

	pub fn push_status(&self, status: StatusCode, body: &str) -> &Self {
		self.push(Err(webc::Error::ResponseFailedStatus {
			status,
			body: body.to_string(),
		}))
	}

	fn push(&self, response: webc::Result<WebResponse>) -> &Self {
		self.inner.lock().unwrap().responses.push_back(response);
		self
	}

	pub fn requests(&self) -> Vec<WebRequest> {
		self.inner.lock().unwrap().requests.clone()
	}

	pub fn request_count(&self) -> usize {
		self.inner.lock().unwrap().requests.len()
	}
}

impl HttpTransport for MockTransport {
	async fn send(&self, request: WebRequest) -> webc::Result<WebResponse> {
		let mut inner = self.inner.lock().unwrap();
		inner.requests.push(request);
		inner.responses.pop_front().unwrap_or_else(|| {
			Err(webc::Error::ResponseFailedStatus {
				status: StatusCode::SERVICE_UNAVAILABLE,
				body: String::new(),
			})
		})
	}
}

// endregion: --- MockTransport

// region:    --- RedirectTransport

/// Sends through a real `WebClient`, but replaces the scheme and host of every URL with `base_url`
/// (e.g., an `httpmock` server), keeping the path.
#[derive(Debug, Clone)]
pub struct RedirectTransport {
	base_url: String,
	web_client: WebClient,
}

impl RedirectTransport {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			web_client: WebClient::default(),
		}
	}
}

impl HttpTransport for RedirectTransport {
	async fn send(&self, mut request: WebRequest) -> webc::Result<WebResponse> {
		let path = request
			.url
			.split_once("://")
			.and_then(|(_, rest)| rest.find('/').map(|idx| rest[idx..].to_string()))
			.unwrap_or_default();
		request.url = format!("{}{path}", self.base_url.trim_end_matches('/'));
		self.web_client.send(request).await
	}
}

// endregion: --- RedirectTransport
