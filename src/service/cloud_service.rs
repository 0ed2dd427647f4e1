use crate::config::{Credentials, TransportConfig};
use crate::resolver::{Endpoint, Namespace, Protocol, gateway_url, resolve_identifier};
use crate::service::{AuthToken, CallSession, ServiceCaller, ServiceTarget, to_web_request};
use crate::webc::{self, HttpTransport, WebClient, WebPayload, WebRequest};
use crate::{Error, Request, Result};
use serde_json::{Value, json};
use std::future::Future;
use tracing::{error, warn};
use value_ext::JsonValueExt;

const LOGIN_RESOURCE: &str = "login";
const HEADER_AUTHORIZATION: &str = "Authorization";
const HEADER_SERVICE_VERSION: &str = "x-service-version";

/// A service reached through the API gateway.
///
/// Every call first logs in against `<gateway>/login` with the configured credentials,
/// then sends the request to `<namespace>/<uri>/<resource>` on the gateway with
/// `Authorization: Bearer <token>` (and `x-service-version` when a version is configured).
#[derive(Debug)]
pub struct CloudService<T: HttpTransport = WebClient> {
	name: String,
	branch: String,
	environment: String,
	domain: String,
	gateway_uri: String,
	aggregator_prefix: Option<String>,
	namespace: Namespace,
	uri: Option<String>,
	version: Option<String>,
	credentials: Credentials,

	transport: T,
	session: CallSession,
}

/// Constructors
impl CloudService<WebClient> {
	/// Binds the service `name` to the configuration, using a default `reqwest` client.
	pub fn new(name: impl Into<String>, config: &TransportConfig) -> Self {
		Self::with_transport(name, config, WebClient::default())
	}
}

impl<T: HttpTransport> CloudService<T> {
	/// Binds the service `name` to the configuration, executing requests through `transport`.
	///
	/// The route is read from `services.cloud.<name>` and the credentials from `auth.<name>`.
	pub fn with_transport(name: impl Into<String>, config: &TransportConfig, transport: T) -> Self {
		let name = name.into();
		let route = config.cloud_route(&name).cloned().unwrap_or_default();
		let credentials = config.credentials(&name).cloned().unwrap_or_default();

		Self {
			branch: config.branch.clone().unwrap_or_default(),
			environment: config.environment.clone().unwrap_or_default(),
			domain: config.domain.clone().unwrap_or_default(),
			gateway_uri: config.gateway_uri.clone().unwrap_or_default(),
			aggregator_prefix: config.aggregator_prefix.clone(),
			namespace: Namespace::default(),
			uri: route.uri,
			version: route.version,
			credentials,
			name,
			transport,
			session: CallSession::default(),
		}
	}
}

/// Chainable Setters
impl<T: HttpTransport> CloudService<T> {
	pub fn with_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
		self.namespace = namespace.into();
		self
	}

	pub fn with_credentials(mut self, credentials: Credentials) -> Self {
		self.credentials = credentials;
		self
	}
}

/// Setters
impl<T: HttpTransport> CloudService<T> {
	pub fn set_branch(&mut self, branch: impl Into<String>) {
		self.branch = branch.into();
	}

	pub fn set_environment(&mut self, environment: impl Into<String>) {
		self.environment = environment.into();
	}

	pub fn set_namespace(&mut self, namespace: impl Into<Namespace>) {
		self.namespace = namespace.into();
	}

	pub fn set_uri(&mut self, uri: impl Into<String>) {
		self.uri = Some(uri.into());
	}

	pub fn set_version(&mut self, version: Option<String>) {
		self.version = version;
	}

	pub fn set_email(&mut self, email: impl Into<String>) {
		self.credentials.email = email.into();
	}

	pub fn set_password(&mut self, password: impl Into<String>) {
		self.credentials.password = password.into();
	}
}

/// Getters
impl<T: HttpTransport> CloudService<T> {
	pub fn branch(&self) -> &str {
		&self.branch
	}

	pub fn environment(&self) -> &str {
		&self.environment
	}

	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}

	pub fn uri(&self) -> Option<&str> {
		self.uri.as_deref()
	}

	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	pub fn email(&self) -> &str {
		&self.credentials.email
	}

	pub fn password(&self) -> &str {
		&self.credentials.password
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// `https://<gateway_uri>-<environment>.<domain>`
	pub fn api_gateway_url(&self) -> Endpoint {
		gateway_url(&self.gateway_uri, &self.environment, &self.domain)
	}

	/// The configured `uri` (or the name when not set), prefixed with the aggregator prefix
	/// in the `aggregators` namespace.
	pub fn resolved_uri(&self) -> String {
		let uri = self.uri.as_deref().unwrap_or(&self.name);
		resolve_identifier(uri, &self.namespace, self.aggregator_prefix.as_deref())
	}

	/// The gateway path of a resource: `<namespace>/<resolved_uri>/<resource>`
	pub fn resource_path(&self, resource: &str) -> String {
		let resource = resource.trim_start_matches('/');
		format!("{}/{}/{resource}", self.namespace, self.resolved_uri())
	}
}

/// Authentication
impl<T: HttpTransport> CloudService<T> {
	/// Logs in against the API gateway and returns the first consumer token.
	///
	/// Returns `None` when the exchange fails (logged and captured as `last_error()`) or when the
	/// response has no `data.consumer`. It never fails harder than that; callers must check.
	pub async fn authenticate(&mut self) -> Option<AuthToken> {
		let web_request = WebRequest {
			method: "POST".to_string(),
			url: self.api_gateway_url().join(LOGIN_RESOURCE),
			query: Vec::new(),
			headers: Vec::new(),
			payload: WebPayload::Json(json!({
				"email": self.credentials.email,
				"password": self.credentials.password,
			})),
		};

		let body = match self.transport.send(web_request).await {
			Ok(web_response) => web_response.body,
			Err(webc_error) => {
				error!("Could not authenticate for cloud service '{}'. Reason: {webc_error}", self.name);
				self.session.capture(&self.name, webc_error);
				return None;
			}
		};

		let token = extract_token(&body);
		if token.is_none() {
			warn!("Gateway login for cloud service '{}' returned no consumer token", self.name);
		}
		token
	}
}

impl<T: HttpTransport> ServiceCaller for CloudService<T> {
	fn name(&self) -> &str {
		&self.name
	}

	fn protocol(&self) -> Protocol {
		Protocol::Https
	}

	/// Binds the request to the API gateway. All cloud traffic is gateway-routed.
	fn dial(&mut self, request: Request) {
		let target = ServiceTarget {
			service: self.name.clone(),
			endpoint: self.api_gateway_url(),
		};
		self.session.bind(target, request);
	}

	fn current_request(&self) -> Option<&Request> {
		self.session.current_request()
	}

	fn client(&self) -> Option<&ServiceTarget> {
		self.session.target()
	}

	fn last_error(&self) -> Option<&webc::Error> {
		self.session.last_error()
	}

	fn call_async(&mut self) -> impl Future<Output = Result<Value>> + Send {
		async move {
			// -- Preconditions (checked before any network exchange)
			if !self.credentials.is_complete() {
				return Err(Error::MissingCredentials {
					service: self.name.clone(),
				});
			}
			self.session.dialed(&self.name)?;

			// -- Authenticate
			let token = self.authenticate().await.ok_or_else(|| Error::CouldNotAuthenticate {
				service: self.name.clone(),
			})?;

			// -- Build the authenticated request
			let mut extra_headers = vec![(HEADER_AUTHORIZATION.to_string(), token.bearer())];
			if let Some(version) = self.version.as_ref().filter(|v| !v.is_empty()) {
				extra_headers.push((HEADER_SERVICE_VERSION.to_string(), version.clone()));
			}

			let web_request = {
				let (target, request) = self.session.dialed(&self.name)?;
				let path = self.resource_path(&request.resource);
				to_web_request(&target.endpoint, &path, request, extra_headers)
			};

			self.session.execute(&self.transport, &self.name, web_request).await
		}
	}
}

// region:    --- Support

/// `data.consumer.tokens[0].value`, when `data.consumer` is present and not empty.
fn extract_token(body: &Value) -> Option<AuthToken> {
	let consumer = body.x_get::<Value>("/data/consumer").ok()?;
	let has_consumer = match &consumer {
		Value::Null => false,
		Value::Object(map) => !map.is_empty(),
		_ => true,
	};
	if !has_consumer {
		return None;
	}

	consumer
		.x_get::<String>("/tokens/0/value")
		.ok()
		.filter(|token| !token.is_empty())
		.map(AuthToken::new)
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_extract_token_ok() {
		let body = json!({"data": {"consumer": {"tokens": [{"value": "tok123"}, {"value": "other"}]}}});
		let token = extract_token(&body).map(|t| t.as_str().to_string());
		assert_eq!(token.as_deref(), Some("tok123"));
	}

	#[test]
	fn test_extract_token_missing_consumer() {
		assert!(extract_token(&json!({"data": {}})).is_none());
		assert!(extract_token(&json!({"data": {"consumer": null}})).is_none());
		assert!(extract_token(&json!({"data": {"consumer": {}}})).is_none());
		assert!(extract_token(&Value::Null).is_none());
	}

	#[test]
	fn test_extract_token_no_tokens() {
		assert!(extract_token(&json!({"data": {"consumer": {"tokens": []}}})).is_none());
	}
}

// endregion: --- Tests
