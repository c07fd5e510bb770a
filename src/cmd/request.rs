use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Target location, assembled into `scheme://host:port/path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, jsonflag::Reflect)]
pub struct Url {
	/// URL scheme.
	pub scheme: String,
	/// Host name or address.
	pub host: String,
	/// TCP port.
	pub port: u16,
	/// Request path.
	pub path: String,
}

impl Default for Url {
	fn default() -> Self {
		Self {
			scheme: "https".to_owned(),
			host: "localhost".to_owned(),
			port: 8080,
			path: String::new(),
		}
	}
}

/// Everything `simplecurl` can be told on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, jsonflag::Reflect)]
pub struct Config {
	/// Where to send the request.
	pub url: Url,
	/// Include the configuration in the output.
	pub verbose: bool,
	/// Extra request headers as a JSON object.
	#[jsonflag(usage = "extra request headers, e.g. {\"Accept\":\"text/plain\"}")]
	pub headers: BTreeMap<String, String>,
	/// Query parameters, one `key=value` per occurrence.
	pub query: Vec<String>,
}

/// The request `simplecurl` would send.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
	/// HTTP method.
	pub method: &'static str,
	/// Fully assembled URL.
	pub url: String,
	/// Request headers.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub headers: BTreeMap<String, String>,
	/// Whether verbose output was asked for.
	pub verbose: bool,
}

impl Request {
	/// Build a GET request from `config`.
	pub fn from_config(config: &Config) -> Self {
		Self {
			method: "GET",
			url: assemble_url(config),
			headers: config.headers.clone(),
			verbose: config.verbose,
		}
	}
}

fn assemble_url(config: &Config) -> String {
	let Url { scheme, host, port, path } = &config.url;
	let mut url = format!("{scheme}://{host}:{port}");
	if !path.is_empty() && !path.starts_with('/') {
		url.push('/');
	}
	url.push_str(path);
	if !config.query.is_empty() {
		url.push('?');
		url.push_str(&config.query.join("&"));
	}
	url
}
