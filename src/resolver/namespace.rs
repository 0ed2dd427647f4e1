use derive_more::Display;
use serde::{Deserialize, Serialize};

// region:    --- Namespace

/// The routing category of a service.
///
/// `Aggregators` prefixes the resolved service identifier with the configured aggregator prefix.
#[derive(Debug, Clone, Default, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
	#[default]
	#[display("service")]
	Service,
	#[display("aggregators")]
	Aggregators,
	#[display("{_0}")]
	#[serde(untagged)]
	Other(String),
}

impl Namespace {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Service => "service",
			Self::Aggregators => "aggregators",
			Self::Other(name) => name,
		}
	}
}

impl From<&str> for Namespace {
	fn from(name: &str) -> Self {
		match name {
			"service" => Self::Service,
			"aggregators" => Self::Aggregators,
			other => Self::Other(other.to_string()),
		}
	}
}

// endregion: --- Namespace

// region:    --- Protocol

#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
	#[default]
	#[display("http")]
	Http,
	#[display("https")]
	Https,
}

impl Protocol {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Http => "http",
			Self::Https => "https",
		}
	}
}

// endregion: --- Protocol
