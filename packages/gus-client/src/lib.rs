mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client, Response, StatusCode,
	header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;

use gus_domain::{RawSearchResponse, UserEntity, map_users};

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// HTTP client for the GitHub `/search/users` endpoint.
///
/// One instance is shared by every fetch; cancellation is cooperative and
/// per-call via the token passed to [`GithubClient::search`].
pub struct GithubClient {
	http: Client,
	api_base: String,
	per_page: u32,
}

impl GithubClient {
	pub fn new(cfg: &gus_config::Search) -> Result<Self> {
		let mut headers = HeaderMap::new();

		headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.text-match+json"));
		headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
		headers.insert(USER_AGENT, HeaderValue::from_static("gus-client"));

		if let Some(token) = cfg.token.as_deref() {
			headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
		}

		let http = Client::builder()
			.default_headers(headers)
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()?;

		Ok(Self {
			http,
			api_base: cfg.api_base.trim_end_matches('/').to_string(),
			per_page: cfg.per_page,
		})
	}

	/// Runs one search, racing the request against the cancellation token.
	///
	/// A cancelled call returns [`Error::Cancelled`] and never a successful
	/// value, regardless of how far the underlying request progressed.
	pub async fn search(
		&self,
		query: &str,
		cancel: &CancellationToken,
	) -> Result<Vec<UserEntity>> {
		tokio::select! {
			biased;
			_ = cancel.cancelled() => Err(Error::Cancelled),
			result = self.search_inner(query) => result,
		}
	}

	async fn search_inner(&self, query: &str) -> Result<Vec<UserEntity>> {
		let url = format!("{}/search/users", self.api_base);
		let response = self
			.http
			.get(&url)
			.query(&[("q", query.to_string()), ("per_page", self.per_page.to_string())])
			.send()
			.await?;
		let status = response.status();

		if let Some(err) = rate_limit_error(
			status,
			header_str(&response, RATE_LIMIT_REMAINING_HEADER),
			header_str(&response, RATE_LIMIT_RESET_HEADER),
		) {
			tracing::warn!(%status, "User search hit the rate limit.");

			return Err(err);
		}
		if !status.is_success() {
			return Err(Error::Status { status: status.as_u16() });
		}

		let raw: RawSearchResponse = response.json().await?;

		Ok(map_users(raw))
	}
}

fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
	response.headers().get(name).and_then(|value| value.to_str().ok())
}

/// Classifies a response as rate-limited: 403/429 with a zero remaining-quota
/// header and a parseable unix-seconds reset header. Anything else is left to
/// generic status handling.
fn rate_limit_error(
	status: StatusCode,
	remaining: Option<&str>,
	reset: Option<&str>,
) -> Option<Error> {
	if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
		return None;
	}
	if remaining != Some("0") {
		return None;
	}

	let reset_at = reset?
		.parse::<i64>()
		.ok()
		.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())?;

	Some(Error::RateLimited {
		message: format!("Rate limit exceeded. Resets at {reset_at}."),
		reset_at,
		remaining: 0,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_exhausted_quota_as_rate_limited() {
		let err = rate_limit_error(StatusCode::FORBIDDEN, Some("0"), Some("1700000000"))
			.expect("Expected a rate-limit error.");

		match err {
			Error::RateLimited { reset_at, remaining, message } => {
				assert_eq!(reset_at.unix_timestamp(), 1_700_000_000);
				assert_eq!(remaining, 0);
				assert!(message.contains("Rate limit exceeded."));
			},
			other => panic!("Expected RateLimited, got {other:?}"),
		}
	}

	#[test]
	fn ignores_forbidden_with_quota_left() {
		assert!(rate_limit_error(StatusCode::FORBIDDEN, Some("12"), Some("1700000000")).is_none());
	}

	#[test]
	fn ignores_missing_or_bad_reset_header() {
		assert!(rate_limit_error(StatusCode::TOO_MANY_REQUESTS, Some("0"), None).is_none());
		assert!(
			rate_limit_error(StatusCode::TOO_MANY_REQUESTS, Some("0"), Some("soon")).is_none()
		);
	}

	#[test]
	fn ignores_non_rate_limit_statuses() {
		assert!(
			rate_limit_error(StatusCode::INTERNAL_SERVER_ERROR, Some("0"), Some("1700000000"))
				.is_none()
		);
	}
}
