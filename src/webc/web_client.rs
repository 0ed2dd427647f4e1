use crate::MultipartPart;
use crate::webc::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;

// region:    --- HttpTransport

/// The HTTP exchange capability services are executed through.
///
/// The returned future resolves once the response body has been read and decoded.
/// Timeouts and cancellation, if any, are the implementation's contract.
pub trait HttpTransport: Send + Sync {
	fn send(&self, request: WebRequest) -> impl Future<Output = Result<WebResponse>> + Send;
}

// endregion: --- HttpTransport

// region:    --- WebRequest

/// A fully resolved request: absolute URL, method, query, headers and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WebRequest {
	pub method: String,
	pub url: String,
	pub query: Vec<(String, String)>,
	pub headers: Vec<(String, String)>,
	pub payload: WebPayload,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WebPayload {
	#[default]
	Empty,
	Json(Value),
	Multipart(Vec<MultipartPart>),
}

/// Getters
impl WebRequest {
	/// The first header value matching `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

// endregion: --- WebRequest

// region:    --- WebResponse

#[derive(Debug, Clone)]
pub struct WebResponse {
	pub status: StatusCode,
	pub body: Value,
}

impl WebResponse {
	/// Reads and decodes the body of a `reqwest::Response`.
	/// Non-success statuses become `Error::ResponseFailedStatus` with the full body text.
	/// An empty body decodes as `Value::Null`.
	pub(crate) async fn from_reqwest_response(res: reqwest::Response) -> Result<WebResponse> {
		let status = res.status();
		let body = res.text().await?;

		if !status.is_success() {
			return Err(Error::ResponseFailedStatus { status, body });
		}

		let body = if body.trim().is_empty() {
			Value::Null
		} else {
			serde_json::from_str::<Value>(&body).map_err(|err| Error::ResponseFailedInvalidJson {
				body: body.clone(),
				cause: err.to_string(),
			})?
		};

		Ok(WebResponse { status, body })
	}
}

// endregion: --- WebResponse

// region:    --- WebClient

/// The `reqwest` backed `HttpTransport`.
#[derive(Debug, Clone, Default)]
pub struct WebClient {
	reqwest_client: reqwest::Client,
}

impl WebClient {
	pub fn from_reqwest_client(reqwest_client: reqwest::Client) -> Self {
		Self { reqwest_client }
	}

	fn new_req_builder(&self, request: WebRequest) -> Result<reqwest::RequestBuilder> {
		let WebRequest {
			method,
			url,
			query,
			headers,
			payload,
		} = request;

		let method = Method::from_bytes(method.to_uppercase().as_bytes()).map_err(|_| Error::InvalidMethod { method })?;

		let mut reqwest_builder = self.reqwest_client.request(method, &url);

		if !query.is_empty() {
			reqwest_builder = reqwest_builder.query(&query);
		}

		for (name, value) in headers {
			reqwest_builder = reqwest_builder.header(name, value);
		}

		reqwest_builder = match payload {
			WebPayload::Empty => reqwest_builder,
			WebPayload::Json(content) => reqwest_builder.json(&content),
			WebPayload::Multipart(parts) => reqwest_builder.multipart(into_form(parts)?),
		};

		Ok(reqwest_builder)
	}
}

impl HttpTransport for WebClient {
	async fn send(&self, request: WebRequest) -> Result<WebResponse> {
		let reqwest_builder = self.new_req_builder(request)?;
		let reqwest_res = reqwest_builder.send().await?;
		WebResponse::from_reqwest_response(reqwest_res).await
	}
}

// endregion: --- WebClient

// region:    --- Support

fn into_form(parts: Vec<MultipartPart>) -> Result<Form> {
	let mut form = Form::new();

	for MultipartPart {
		name,
		contents,
		headers,
		filename,
	} in parts
	{
		let mut part = Part::text(contents);
		if let Some(filename) = filename {
			part = part.file_name(filename);
		}
		if !headers.is_empty() {
			part = part.headers(into_header_map(&headers)?);
		}
		form = form.part(name, part);
	}

	Ok(form)
}

fn into_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
	let mut header_map = HeaderMap::new();
	for (name, value) in headers {
		let header_name =
			HeaderName::from_bytes(name.as_bytes()).map_err(|_| Error::InvalidHeader { name: name.clone() })?;
		let header_value = HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader { name: name.clone() })?;
		header_map.insert(header_name, header_value);
	}
	Ok(header_map)
}

// endregion: --- Support
