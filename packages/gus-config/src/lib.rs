mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.search.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "search.api_base must be non-empty.".to_string() });
	}
	if cfg.search.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.per_page == 0 || cfg.search.per_page > 100 {
		return Err(Error::Validation {
			message: "search.per_page must be between 1 and 100.".to_string(),
		});
	}
	if cfg.search.min_query_len == 0 {
		return Err(Error::Validation {
			message: "search.min_query_len must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.search.token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
		cfg.search.token = None;
	}
	if cfg.search.api_base.ends_with('/') {
		cfg.search.api_base = cfg.search.api_base.trim_end_matches('/').to_string();
	}
}
