use std::collections::HashMap;

/// A key lookup over the configuration.
///
/// Keys are dotted paths, for example:
/// - `transport.branch`, `transport.environment`, `transport.domain`
/// - `transport.gateway_uri`, `transport.aggregator_prefix`
/// - `transport.services.local.<name>.uri`, `transport.services.cloud.<name>.version`
/// - `transport.auth.<name>.email`, `transport.auth.<name>.password`
pub trait ConfigSource {
	fn get(&self, key: &str) -> Option<String>;
}

// region:    --- Keys

pub const KEY_DOMAIN: &str = "transport.domain";
pub const KEY_BRANCH: &str = "transport.branch";
pub const KEY_ENVIRONMENT: &str = "transport.environment";
pub const KEY_GATEWAY_URI: &str = "transport.gateway_uri";
pub const KEY_AGGREGATOR_PREFIX: &str = "transport.aggregator_prefix";

/// The kind of a service entry, which is also its config key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
	Local,
	Cloud,
}

impl ServiceKind {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Local => "local",
			Self::Cloud => "cloud",
		}
	}
}

/// e.g., `transport.services.local.orders.uri`
pub fn service_key(kind: ServiceKind, name: &str, field: &str) -> String {
	format!("transport.services.{}.{name}.{field}", kind.as_str())
}

/// e.g., `transport.auth.orders.email`
pub fn auth_key(name: &str, field: &str) -> String {
	format!("transport.auth.{name}.{field}")
}

// endregion: --- Keys

// region:    --- Map Source

impl ConfigSource for HashMap<String, String> {
	fn get(&self, key: &str) -> Option<String> {
		HashMap::get(self, key).cloned()
	}
}

impl ConfigSource for HashMap<&str, &str> {
	fn get(&self, key: &str) -> Option<String> {
		HashMap::get(self, key).map(|v| (*v).to_string())
	}
}

// endregion: --- Map Source

// region:    --- EnvConfigSource

/// Reads the configuration from `SOA_*` environment variables.
///
/// | key                                        | variable                         |
/// |--------------------------------------------|----------------------------------|
/// | `transport.branch`                         | `SOA_BRANCH`                     |
/// | `transport.gateway_uri`                    | `SOA_GATEWAY_URI`                |
/// | `transport.services.local.<name>.uri`      | `SOA_LOCAL_<NAME>_URI`           |
/// | `transport.services.cloud.<name>.version`  | `SOA_CLOUD_<NAME>_VERSION`       |
/// | `transport.auth.<name>.email`              | `SOA_CLOUD_<NAME>_AUTH_EMAIL`    |
///
/// `<NAME>` is the service name upper-cased, with `-` replaced by `_`.
/// Empty variables are treated as absent.
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
	prefix: String,
}

impl Default for EnvConfigSource {
	fn default() -> Self {
		Self {
			prefix: Self::DEFAULT_PREFIX.to_string(),
		}
	}
}

impl EnvConfigSource {
	pub const DEFAULT_PREFIX: &str = "SOA";

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self { prefix: prefix.into() }
	}

	/// The environment variable name for a dotted config key, if the key is a known one.
	pub fn env_name(&self, key: &str) -> Option<String> {
		let rest = key.strip_prefix("transport.")?;

		let parts: Vec<String> = if let Some(services) = rest.strip_prefix("services.") {
			let (kind, entry) = services.split_once('.')?;
			let (name, field) = entry.rsplit_once('.')?;
			vec![kind.to_string(), env_segment(name), field.to_string()]
		} else if let Some(auth) = rest.strip_prefix("auth.") {
			let (name, field) = auth.rsplit_once('.')?;
			vec![
				ServiceKind::Cloud.as_str().to_string(),
				env_segment(name),
				"auth".to_string(),
				field.to_string(),
			]
		} else if rest.contains('.') {
			return None;
		} else {
			vec![rest.to_string()]
		};

		let name = std::iter::once(self.prefix.clone())
			.chain(parts)
			.collect::<Vec<_>>()
			.join("_")
			.to_uppercase();

		Some(name)
	}
}

impl ConfigSource for EnvConfigSource {
	fn get(&self, key: &str) -> Option<String> {
		let env_name = self.env_name(key)?;
		std::env::var(env_name).ok().filter(|v| !v.is_empty())
	}
}

fn env_segment(name: &str) -> String {
	name.replace(['-', '.'], "_")
}

// endregion: --- EnvConfigSource

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_env_name_global_keys() {
		let source = EnvConfigSource::default();
		assert_eq!(source.env_name(KEY_BRANCH).as_deref(), Some("SOA_BRANCH"));
		assert_eq!(source.env_name(KEY_GATEWAY_URI).as_deref(), Some("SOA_GATEWAY_URI"));
		assert_eq!(
			source.env_name(KEY_AGGREGATOR_PREFIX).as_deref(),
			Some("SOA_AGGREGATOR_PREFIX")
		);
	}

	#[test]
	fn test_env_name_service_keys() {
		let source = EnvConfigSource::default();
		let key = service_key(ServiceKind::Local, "orders", "uri");
		assert_eq!(source.env_name(&key).as_deref(), Some("SOA_LOCAL_ORDERS_URI"));

		let key = service_key(ServiceKind::Cloud, "email-receipt", "version");
		assert_eq!(
			source.env_name(&key).as_deref(),
			Some("SOA_CLOUD_EMAIL_RECEIPT_VERSION")
		);
	}

	#[test]
	fn test_env_name_auth_keys() {
		let source = EnvConfigSource::default();
		let key = auth_key("orders", "password");
		assert_eq!(
			source.env_name(&key).as_deref(),
			Some("SOA_CLOUD_ORDERS_AUTH_PASSWORD")
		);
	}

	#[test]
	fn test_env_name_unknown_keys() {
		let source = EnvConfigSource::default();
		assert_eq!(source.env_name("app.name"), None);
		assert_eq!(source.env_name("transport.something.nested"), None);
	}
}

// endregion: --- Tests
