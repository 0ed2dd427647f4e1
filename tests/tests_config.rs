mod support;

use crate::support::Result;
use std::collections::HashMap;
use svc_transport::config::{ConfigSource, Credentials, EnvConfigSource, ServiceRoute, TransportConfig};
use svc_transport::{CloudService, LocalService, Request, ServiceCaller};

const CONFIG_JSON: &str = r#"
{
	"branch": "master",
	"environment": "staging",
	"domain": "test.com",
	"gateway_uri": "api-gateway",
	"aggregator_prefix": "agg",
	"services": {
		"local": { "orders": { "uri": "ordersepos" } },
		"cloud": { "orders": { "uri": "orders", "version": "2" } }
	},
	"auth": { "orders": { "email": "svc@test.com", "password": "secret" } }
}
"#;

#[test]
fn test_config_from_json_ok() -> Result<()> {
	let config = TransportConfig::from_json_str(CONFIG_JSON)?;

	assert_eq!(config.branch.as_deref(), Some("master"));
	assert_eq!(config.gateway_uri.as_deref(), Some("api-gateway"));
	assert_eq!(config.local_route("orders"), Some(&ServiceRoute::new("ordersepos")));
	assert_eq!(
		config.cloud_route("orders"),
		Some(&ServiceRoute::new("orders").with_version("2"))
	);
	assert_eq!(config.credentials("orders"), Some(&Credentials::new("svc@test.com", "secret")));

	Ok(())
}

#[test]
fn test_config_from_json_partial() -> Result<()> {
	let config = TransportConfig::from_json_str(r#"{"branch": "develop"}"#)?;

	assert_eq!(config.branch.as_deref(), Some("develop"));
	assert!(config.environment.is_none());
	assert!(config.services.local.is_empty());
	assert!(config.auth.is_empty());

	Ok(())
}

#[test]
fn test_config_from_json_numeric_version() -> Result<()> {
	let config = TransportConfig::from_json_str(
		r#"{"environment": "testing", "branch": "master", "services": {"local": {"orders": {"uri": "orders", "version": 2}}}}"#,
	)?;

	assert_eq!(
		config.local_route("orders"),
		Some(&ServiceRoute::new("orders").with_version("2"))
	);

	let mut local = LocalService::new("orders", &config);
	local.dial(Request::new("orders", "GET"));
	let client = local.client().ok_or("should be dialed")?;
	assert_eq!(client.base_url(), "http://orders-master-testing.orders-2");

	Ok(())
}

#[test]
fn test_config_from_json_invalid_version() -> Result<()> {
	let res = TransportConfig::from_json_str(r#"{"services": {"cloud": {"orders": {"version": [2]}}}}"#);
	assert!(matches!(res, Err(svc_transport::Error::SerdeJson(_))));
	Ok(())
}

#[test]
fn test_config_from_json_invalid() -> Result<()> {
	let res = TransportConfig::from_json_str("{ not json");
	assert!(matches!(res, Err(svc_transport::Error::SerdeJson(_))));
	Ok(())
}

#[test]
fn test_config_from_source_ok() -> Result<()> {
	let source: HashMap<&str, &str> = HashMap::from([
		("transport.branch", "master"),
		("transport.environment", "testing"),
		("transport.domain", "test.com"),
		("transport.gateway_uri", "api-gateway"),
		("transport.services.local.orders.uri", "ordersepos"),
		("transport.services.cloud.email-receipt.uri", "email-receipt"),
		("transport.services.cloud.email-receipt.version", "1"),
		("transport.auth.email-receipt.email", "svc@test.com"),
		("transport.auth.email-receipt.password", "secret"),
	]);

	let config = TransportConfig::from_source(&source, &["orders"], &["email-receipt"]);

	assert_eq!(config.environment.as_deref(), Some("testing"));
	assert!(config.aggregator_prefix.is_none());
	assert_eq!(config.local_route("orders"), Some(&ServiceRoute::new("ordersepos")));
	assert_eq!(
		config.cloud_route("email-receipt"),
		Some(&ServiceRoute::new("email-receipt").with_version("1"))
	);
	let credentials = config.credentials("email-receipt").ok_or("should have credentials")?;
	assert!(credentials.is_complete());

	Ok(())
}

#[test]
fn test_config_from_source_missing_credentials() -> Result<()> {
	let source: HashMap<String, String> = HashMap::new();

	let config = TransportConfig::from_source(&source, &[], &["orders"]);

	let credentials = config.credentials("orders").ok_or("should have an entry")?;
	assert!(!credentials.is_complete());

	Ok(())
}

#[test]
fn test_env_config_source_reads_env() -> Result<()> {
	// `cargo test` exports CARGO_MANIFEST_DIR to the test process.
	let source = EnvConfigSource::with_prefix("CARGO");

	let manifest_dir = source.get("transport.manifest_dir");

	assert_eq!(manifest_dir.as_deref(), Some(env!("CARGO_MANIFEST_DIR")));
	assert_eq!(source.get("transport.services.local.nope-not-set.uri"), None);

	Ok(())
}

#[test]
fn test_credentials_debug_redacted() -> Result<()> {
	let credentials = Credentials::new("svc@test.com", "secret");

	let debug = format!("{credentials:?}");

	assert!(debug.contains("svc@test.com"));
	assert!(!debug.contains("secret"));

	Ok(())
}

#[test]
fn test_services_from_json_config_dial() -> Result<()> {
	let config = TransportConfig::from_json_str(CONFIG_JSON)?;

	let mut local = LocalService::new("orders", &config);
	local.dial(Request::new("orders", "GET"));
	let local_client = local.client().ok_or("should be dialed")?;
	assert_eq!(local_client.base_url(), "http://ordersepos-master-staging.ordersepos");

	let mut cloud = CloudService::new("orders", &config);
	cloud.dial(Request::new("orders", "GET"));
	let cloud_client = cloud.client().ok_or("should be dialed")?;
	assert_eq!(cloud_client.base_url(), "https://api-gateway-staging.test.com");
	assert_eq!(cloud.resource_path("orders"), "service/orders/orders");
	assert_eq!(cloud.version(), Some("2"));

	Ok(())
}
