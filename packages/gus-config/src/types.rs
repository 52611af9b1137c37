use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Base URL of the user-search API.
	#[serde(default = "default_api_base")]
	pub api_base: String,
	/// Optional bearer token; empty strings are normalized to `None`.
	#[serde(default)]
	pub token: Option<String>,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_per_page")]
	pub per_page: u32,
	/// Debounce delay applied before a query is dispatched.
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	/// Queries shorter than this many characters yield an empty result list
	/// without contacting the API.
	#[serde(default = "default_min_query_len")]
	pub min_query_len: usize,
}

impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level() }
	}
}

impl Default for Search {
	fn default() -> Self {
		Self {
			api_base: default_api_base(),
			token: None,
			timeout_ms: default_timeout_ms(),
			per_page: default_per_page(),
			debounce_ms: default_debounce_ms(),
			min_query_len: default_min_query_len(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_api_base() -> String {
	"https://api.github.com".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_per_page() -> u32 {
	30
}

fn default_debounce_ms() -> u64 {
	500
}

fn default_min_query_len() -> usize {
	3
}
