use crate::config::{
	ConfigSource, KEY_AGGREGATOR_PREFIX, KEY_BRANCH, KEY_DOMAIN, KEY_ENVIRONMENT, KEY_GATEWAY_URI, ServiceKind, auth_key,
	service_key,
};
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

// region:    --- TransportConfig

/// The configuration shared by all services of an aggregator.
///
/// Example (JSON):
///
/// ```json
/// {
///   "branch": "master",
///   "environment": "staging",
///   "domain": "example.com",
///   "gateway_uri": "api-gateway",
///   "aggregator_prefix": "agg",
///   "services": {
///     "local": { "orders": { "uri": "ordersepos" } },
///     "cloud": { "orders": { "uri": "orders", "version": "2" } }
///   },
///   "auth": { "orders": { "email": "svc@example.com", "password": "..." } }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
	/// The top level domain of the service environment.
	pub domain: Option<String>,

	/// The CI branch, for example `master`.
	pub branch: Option<String>,

	/// The CI environment, for example `dev` or `staging`.
	pub environment: Option<String>,

	/// The URI of the API gateway.
	pub gateway_uri: Option<String>,

	/// The prefix applied to aggregator URIs.
	pub aggregator_prefix: Option<String>,

	pub services: ServicesConfig,

	/// Credentials for cloud services, by service name.
	pub auth: HashMap<String, Credentials>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
	pub local: HashMap<String, ServiceRoute>,
	pub cloud: HashMap<String, ServiceRoute>,
}

/// The routing metadata of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRoute {
	pub uri: Option<String>,
	/// Accepts a JSON string or number (`"2"` or `2`).
	#[serde(deserialize_with = "deserialize_version")]
	pub version: Option<String>,
}

impl ServiceRoute {
	pub fn new(uri: impl Into<String>) -> Self {
		Self {
			uri: Some(uri.into()),
			version: None,
		}
	}

	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}
}

/// The static credential pair used to log in against the API gateway.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

impl Credentials {
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			password: password.into(),
		}
	}

	/// Both the email and the password are set.
	pub fn is_complete(&self) -> bool {
		!self.email.is_empty() && !self.password.is_empty()
	}
}

// Keep the password out of the logs.
impl std::fmt::Debug for Credentials {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Credentials")
			.field("email", &self.email)
			.field("password", &"REDACTED")
			.finish()
	}
}

fn deserialize_version<'de, D>(deserializer: D) -> core::result::Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(version)) => Ok(Some(version)),
		Some(Value::Number(version)) => Ok(Some(version.to_string())),
		Some(other) => Err(serde::de::Error::custom(format!(
			"service version must be a string or a number, found {other}"
		))),
	}
}

// endregion: --- TransportConfig

// region:    --- Loaders

impl TransportConfig {
	pub fn from_json_str(content: &str) -> Result<Self> {
		let config = serde_json::from_str(content)?;
		Ok(config)
	}

	pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_json_str(&content)
	}

	/// Collects the configuration from a key lookup source.
	///
	/// A source can only be queried by key, so the names of the services to collect must be given.
	pub fn from_source(source: &impl ConfigSource, local_names: &[&str], cloud_names: &[&str]) -> Self {
		let mut config = Self {
			domain: source.get(KEY_DOMAIN),
			branch: source.get(KEY_BRANCH),
			environment: source.get(KEY_ENVIRONMENT),
			gateway_uri: source.get(KEY_GATEWAY_URI),
			aggregator_prefix: source.get(KEY_AGGREGATOR_PREFIX),
			..Default::default()
		};

		for name in local_names {
			let route = route_from_source(source, ServiceKind::Local, name);
			config.services.local.insert((*name).to_string(), route);
		}

		for name in cloud_names {
			let route = route_from_source(source, ServiceKind::Cloud, name);
			config.services.cloud.insert((*name).to_string(), route);

			let credentials = Credentials {
				email: source.get(&auth_key(name, "email")).unwrap_or_default(),
				password: source.get(&auth_key(name, "password")).unwrap_or_default(),
			};
			config.auth.insert((*name).to_string(), credentials);
		}

		config
	}
}

fn route_from_source(source: &impl ConfigSource, kind: ServiceKind, name: &str) -> ServiceRoute {
	ServiceRoute {
		uri: source.get(&service_key(kind, name, "uri")),
		version: source.get(&service_key(kind, name, "version")),
	}
}

// endregion: --- Loaders

// region:    --- Builder

/// Chainable Setters
impl TransportConfig {
	pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
		self.domain = Some(domain.into());
		self
	}

	pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
		self.branch = Some(branch.into());
		self
	}

	pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());
		self
	}

	pub fn with_gateway_uri(mut self, gateway_uri: impl Into<String>) -> Self {
		self.gateway_uri = Some(gateway_uri.into());
		self
	}

	pub fn with_aggregator_prefix(mut self, aggregator_prefix: impl Into<String>) -> Self {
		self.aggregator_prefix = Some(aggregator_prefix.into());
		self
	}

	pub fn with_local_service(mut self, name: impl Into<String>, route: ServiceRoute) -> Self {
		self.services.local.insert(name.into(), route);
		self
	}

	pub fn with_cloud_service(mut self, name: impl Into<String>, route: ServiceRoute) -> Self {
		self.services.cloud.insert(name.into(), route);
		self
	}

	pub fn with_credentials(mut self, name: impl Into<String>, credentials: Credentials) -> Self {
		self.auth.insert(name.into(), credentials);
		self
	}
}

/// Getters
impl TransportConfig {
	pub fn local_route(&self, name: &str) -> Option<&ServiceRoute> {
		self.services.local.get(name)
	}

	pub fn cloud_route(&self, name: &str) -> Option<&ServiceRoute> {
		self.services.cloud.get(name)
	}

	pub fn credentials(&self, name: &str) -> Option<&Credentials> {
		self.auth.get(name)
	}
}

// endregion: --- Builder
