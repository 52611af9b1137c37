//! Debounced query dispatch and the fetch state machine.
//!
//! `dispatch_query` coalesces rapid query changes into a single fetch;
//! `dispatch_now` is the immediate path the timer lands on. Supersession is
//! enforced twice: the in-flight token is cancelled, and every outcome is
//! committed only if its fetch generation is still current.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;

use gus_domain::GateStatus;

use crate::{GENERIC_FETCH_ERROR, SearchController};

impl SearchController {
	/// Schedules a debounced fetch for `query`.
	///
	/// When the rate-limit gate is armed and `now` is still inside the
	/// window, this sets an error message and returns without touching the
	/// pending timer; a timer scheduled before the gate armed may still fire,
	/// in which case supersession (generation plus token) decides whether its
	/// outcome lands, and a repeated rate-limit response simply re-arms the
	/// gate. When `now` has passed the window, the gate and the error are
	/// cleared before scheduling.
	pub fn dispatch_query(self: &Arc<Self>, query: &str, now: OffsetDateTime) {
		{
			let mut inner = self.lock();

			match inner.gate.poll(now) {
				GateStatus::Blocked { reset_at } => {
					inner.error = Some(format!("Rate limit exceeded. Try again at {reset_at}."));

					return;
				},
				GateStatus::Cleared => {
					inner.error = None;
				},
				GateStatus::Open => {},
			}

			if let Some(handle) = inner.debounce.take() {
				handle.abort();
			}

			let weak = Arc::downgrade(self);
			let query = query.to_string();
			let delay = self.debounce_delay;

			inner.debounce = Some(tokio::spawn(async move {
				tokio::time::sleep(delay).await;

				// The controller may have been disposed while the timer ran.
				if let Some(controller) = weak.upgrade() {
					controller.dispatch_now(&query).await;
				}
			}));
		}

		tracing::debug!(query_len = query.len(), "Scheduled a debounced search.");
	}

	/// Dispatches `query` immediately, superseding any in-flight fetch.
	pub async fn dispatch_now(&self, query: &str) {
		let (cancel, generation) = {
			let mut inner = self.lock();

			// Invalidate the previous request even when this query will not
			// produce a fetch; no stale response may land after this point.
			inner.cancel.cancel();
			inner.cancel = CancellationToken::new();
			inner.generation += 1;

			if query.trim().is_empty() || query.chars().count() < self.min_query_len {
				inner.results.clear();
				inner.loading = false;

				return;
			}

			inner.loading = true;
			inner.error = None;

			(inner.cancel.clone(), inner.generation)
		};
		let result = self.provider().search(query, &cancel).await;
		let mut inner = self.lock();

		if inner.generation != generation {
			return;
		}

		match result {
			Ok(users) => {
				tracing::info!(count = users.len(), "User search succeeded.");

				inner.results = users;
				inner.loading = false;
				inner.error = None;
			},
			Err(gus_client::Error::Cancelled) => {},
			Err(gus_client::Error::RateLimited { message, reset_at, .. }) => {
				// Policy: a rate-limited fetch always yields an empty list,
				// prior data included.
				inner.gate.arm(reset_at);
				inner.error = Some(message);
				inner.results.clear();
				inner.loading = false;
			},
			Err(err) => {
				tracing::error!(error = %err, "User search failed.");

				inner.error = Some(GENERIC_FETCH_ERROR.to_string());
				inner.loading = false;
			},
		}
	}
}
