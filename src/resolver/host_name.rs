//! Host naming conventions.
//!
//! - local:   `<protocol>://<id>-<branch>-<environment>.<id>[-<version>]`
//! - gateway: `https://<gateway_uri>-<environment>.<domain>`

use crate::resolver::{Endpoint, Namespace, Protocol};

/// Resolves the service identifier used in host and resource construction.
///
/// In the `aggregators` namespace, the identifier is `<aggregator_prefix>-<uri>`.
/// Any other namespace, or a missing/empty prefix, leaves `uri` unchanged.
pub fn resolve_identifier(uri: &str, namespace: &Namespace, aggregator_prefix: Option<&str>) -> String {
	match (namespace, aggregator_prefix) {
		(Namespace::Aggregators, Some(prefix)) if !prefix.is_empty() => format!("{prefix}-{uri}"),
		_ => uri.to_string(),
	}
}

/// The DNS-style host of a local service.
///
/// The trailing "service namespace" segment is the identifier, suffixed with `-<version>` when a version is set.
pub fn local_host_name(identifier: &str, branch: &str, environment: &str, version: Option<&str>) -> String {
	let service_namespace = match version {
		Some(version) if !version.is_empty() => format!("{identifier}-{version}"),
		_ => identifier.to_string(),
	};

	format!("{identifier}-{branch}-{environment}.{service_namespace}")
}

pub fn local_base_url(protocol: Protocol, host_name: &str) -> Endpoint {
	Endpoint::from_owned(format!("{protocol}://{host_name}"))
}

/// The base URL of the API gateway. The protocol is always `https`.
pub fn gateway_url(gateway_uri: &str, environment: &str, domain: &str) -> Endpoint {
	let protocol = Protocol::Https;
	Endpoint::from_owned(format!("{protocol}://{gateway_uri}-{environment}.{domain}"))
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_identifier_aggregators() {
		let id = resolve_identifier("orders", &Namespace::Aggregators, Some("agg"));
		assert_eq!(id, "agg-orders");
	}

	#[test]
	fn test_resolve_identifier_other_namespaces() {
		assert_eq!(resolve_identifier("orders", &Namespace::Service, Some("agg")), "orders");
		assert_eq!(
			resolve_identifier("orders", &Namespace::Other("tools".to_string()), Some("agg")),
			"orders"
		);
		assert_eq!(resolve_identifier("orders", &Namespace::Aggregators, None), "orders");
	}

	#[test]
	fn test_local_host_name_without_version() {
		let host = local_host_name("example-service", "master", "testing", None);
		assert_eq!(host, "example-service-master-testing.example-service");

		let url = local_base_url(Protocol::Http, &host);
		assert_eq!(url.base_url(), "http://example-service-master-testing.example-service");
	}

	#[test]
	fn test_local_host_name_with_version() {
		let host = local_host_name("example-service", "master", "testing", Some("2"));
		assert_eq!(host, "example-service-master-testing.example-service-2");
	}

	#[test]
	fn test_gateway_url() {
		let url = gateway_url("api-gateway", "staging", "test.com");
		assert_eq!(url.base_url(), "https://api-gateway-staging.test.com");
	}
}

// endregion: --- Tests
