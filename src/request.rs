//! The `Request` describes one call against a service resource.
//!
//! It is a plain value object: no validation is done here. An invalid method or an empty
//! resource only surfaces as a failure of the eventual HTTP exchange.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// region:    --- Request

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
	/// The logical endpoint path segment (e.g., `orders` or `orders/42`).
	pub resource: String,

	/// The HTTP verb (e.g., `GET`, `POST`).
	pub method: String,

	/// Sent as a JSON body when not empty.
	#[serde(default)]
	pub body: Map<String, Value>,

	/// Sent as the query string when not empty.
	#[serde(default)]
	pub query: Map<String, Value>,

	/// Merged into the outgoing request headers.
	#[serde(default)]
	pub headers: BTreeMap<String, String>,

	/// When not empty, the request is sent as `multipart/form-data` instead of JSON.
	#[serde(default)]
	pub multipart: Vec<MultipartPart>,
}

/// Constructors
impl Request {
	pub fn new(resource: impl Into<String>, method: impl Into<String>) -> Self {
		Self {
			resource: resource.into(),
			method: method.into(),
			body: Map::new(),
			query: Map::new(),
			headers: BTreeMap::new(),
			multipart: Vec::new(),
		}
	}
}

/// Chainable Setters
impl Request {
	/// Sets the body from a JSON value.
	/// Anything other than a JSON object results in an empty body.
	pub fn with_body(mut self, body: impl Into<Value>) -> Self {
		self.body = match body.into() {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		self
	}

	/// Sets the query from a JSON value.
	/// Anything other than a JSON object results in an empty query.
	pub fn with_query(mut self, query: impl Into<Value>) -> Self {
		self.query = match query.into() {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	pub fn with_multipart_part(mut self, part: MultipartPart) -> Self {
		self.multipart.push(part);
		self
	}
}

/// Setters
impl Request {
	/// Sets (or replaces) one header.
	pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.headers.insert(name.into(), value.into());
	}
}

/// Getters
impl Request {
	pub fn has_body(&self) -> bool {
		!self.body.is_empty()
	}

	pub fn has_multipart(&self) -> bool {
		!self.multipart.is_empty()
	}

	/// The query as `(key, value)` string pairs, in key order.
	///
	/// Values are flattened with bracket notation: arrays and objects become bracketed keys
	/// (`tags[0]=1`, `filter[status]=open`), booleans become `1`/`0`, and null values are omitted.
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let mut pairs = Vec::new();
		for (key, value) in &self.query {
			push_query_pairs(&mut pairs, key.clone(), value);
		}
		pairs
	}
}

fn push_query_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
	match value {
		Value::Null => {}
		Value::Bool(flag) => pairs.push((key, if *flag { "1" } else { "0" }.to_string())),
		Value::Number(number) => pairs.push((key, number.to_string())),
		Value::String(s) => pairs.push((key, s.clone())),
		Value::Array(items) => {
			for (idx, item) in items.iter().enumerate() {
				push_query_pairs(pairs, format!("{key}[{idx}]"), item);
			}
		}
		Value::Object(map) => {
			for (name, item) in map {
				push_query_pairs(pairs, format!("{key}[{name}]"), item);
			}
		}
	}
}

// endregion: --- Request

// region:    --- MultipartPart

/// One part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartPart {
	/// The form field name.
	pub name: String,
	pub contents: String,
	#[serde(default)]
	pub headers: BTreeMap<String, String>,
	#[serde(default)]
	pub filename: Option<String>,
}

impl MultipartPart {
	pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			contents: contents.into(),
			headers: BTreeMap::new(),
			filename: None,
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
		self.filename = Some(filename.into());
		self
	}
}

// endregion: --- MultipartPart

// region:    --- Tests


// endregion: --- Tests
