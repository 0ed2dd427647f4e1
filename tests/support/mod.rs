//! Some support utilities for the tests
//! Note: Must be imported in each test file

#![allow(unused)] // For test support

// region:    --- Modules

mod transports;

pub use transports::*;

pub type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

// endregion: --- Modules

// region:    --- Common Config

use svc_transport::config::{Credentials, ServiceRoute, TransportConfig};

pub const LOCAL_SERVICE_NAME: &str = "example_service";
pub const CLOUD_SERVICE_NAME: &str = "example_cloud_service";

/// The configuration of the example services:
/// branch `master`, environment `testing`, gateway `api-gateway` on `test.com`.
pub fn example_config() -> TransportConfig {
	TransportConfig::default()
		.with_domain("test.com")
		.with_branch("master")
		.with_environment("testing")
		.with_gateway_uri("api-gateway")
		.with_aggregator_prefix("aggregator")
		.with_local_service(LOCAL_SERVICE_NAME, ServiceRoute::new("example-service"))
		.with_cloud_service(CLOUD_SERVICE_NAME, ServiceRoute::new("example-service"))
		.with_credentials(CLOUD_SERVICE_NAME, Credentials::new("foo", "bar"))
}

pub fn login_ok_body(token: &str) -> serde_json::Value {
	serde_json::json!({"data": {"consumer": {"tokens": [{"value": token}]}}})
}

/// Installs a tracing subscriber honoring `RUST_LOG` (once per test binary).
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}

// endregion: --- Common Config
