use crate::config::TransportConfig;
use crate::resolver::{Namespace, Protocol, local_base_url, local_host_name, resolve_identifier};
use crate::service::{CallSession, ServiceCaller, ServiceTarget, to_web_request};
use crate::webc::{self, HttpTransport, WebClient};
use crate::{Request, Result};
use serde_json::Value;
use std::future::Future;

/// A service reached directly through the host-naming convention:
/// `<protocol>://<id>-<branch>-<environment>.<id>[-<version>]`
///
/// ```rust,ignore
/// let mut orders = LocalService::new("orders", &config);
/// orders.dial(Request::new("orders", "POST").with_body(json!({"sku": "bb-42"})));
/// let created = orders.call()?;
/// ```
#[derive(Debug)]
pub struct LocalService<T: HttpTransport = WebClient> {
	name: String,
	branch: String,
	environment: String,
	namespace: Namespace,
	uri: Option<String>,
	version: Option<String>,
	aggregator_prefix: Option<String>,
	protocol: Protocol,

	transport: T,
	session: CallSession,
}

/// Constructors
impl LocalService<WebClient> {
	/// Binds the service `name` to the configuration, using a default `reqwest` client.
	pub fn new(name: impl Into<String>, config: &TransportConfig) -> Self {
		Self::with_transport(name, config, WebClient::default())
	}
}

impl<T: HttpTransport> LocalService<T> {
	/// Binds the service `name` to the configuration, executing requests through `transport`.
	///
	/// The route is read from `services.local.<name>`.
	pub fn with_transport(name: impl Into<String>, config: &TransportConfig, transport: T) -> Self {
		let name = name.into();
		let route = config.local_route(&name).cloned().unwrap_or_default();

		Self {
			branch: config.branch.clone().unwrap_or_default(),
			environment: config.environment.clone().unwrap_or_default(),
			namespace: Namespace::default(),
			uri: route.uri,
			version: route.version,
			aggregator_prefix: config.aggregator_prefix.clone(),
			protocol: Protocol::Http,
			name,
			transport,
			session: CallSession::default(),
		}
	}
}

/// Chainable Setters
impl<T: HttpTransport> LocalService<T> {
	pub fn with_namespace(mut self, namespace: impl Into<Namespace>) -> Self {
		self.namespace = namespace.into();
		self
	}

	pub fn with_protocol(mut self, protocol: Protocol) -> Self {
		self.protocol = protocol;
		self
	}
}

/// Setters
impl<T: HttpTransport> LocalService<T> {
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
}

/// Getters
impl<T: HttpTransport> LocalService<T> {
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

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// The identifier used in host construction: the configured `uri` (or the name when not set),
	/// prefixed with the aggregator prefix in the `aggregators` namespace.
	pub fn resolved_uri(&self) -> String {
		let uri = self.uri.as_deref().unwrap_or(&self.name);
		resolve_identifier(uri, &self.namespace, self.aggregator_prefix.as_deref())
	}

	pub fn host_name(&self) -> String {
		local_host_name(
			&self.resolved_uri(),
			&self.branch,
			&self.environment,
			self.version.as_deref(),
		)
	}
}

impl<T: HttpTransport> ServiceCaller for LocalService<T> {
	fn name(&self) -> &str {
		&self.name
	}

	fn protocol(&self) -> Protocol {
		self.protocol
	}

	fn dial(&mut self, request: Request) {
		let target = ServiceTarget {
			service: self.name.clone(),
			endpoint: local_base_url(self.protocol, &self.host_name()),
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
			let web_request = {
				let (target, request) = self.session.dialed(&self.name)?;
				to_web_request(&target.endpoint, &request.resource, request, Vec::new())
			};

			self.session.execute(&self.transport, &self.name, web_request).await
		}
	}
}
