mod dispatch;

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use gus_client::GithubClient;
use gus_domain::{RateLimitGate, UserEntity, selection};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const GENERIC_FETCH_ERROR: &str = "Unable to fetch users. Please try again.";

/// Capability seam for the remote user search.
///
/// The controller owns no transport details; anything that can run one query
/// and honor cooperative cancellation can back it.
pub trait SearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, gus_client::Result<Vec<UserEntity>>>;
}

impl SearchProvider for GithubClient {
	fn search<'a>(
		&'a self,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, gus_client::Result<Vec<UserEntity>>> {
		Box::pin(GithubClient::search(self, query, cancel))
	}
}

pub(crate) struct Inner {
	pub(crate) results: Vec<UserEntity>,
	pub(crate) selected: Vec<String>,
	pub(crate) loading: bool,
	pub(crate) error: Option<String>,
	pub(crate) gate: RateLimitGate,
	/// Bumped on every dispatch; outcomes from older generations are dropped.
	pub(crate) generation: u64,
	/// Token handed to the in-flight request, if any.
	pub(crate) cancel: CancellationToken,
	/// Pending debounce timer; only the most recently scheduled one may fire.
	pub(crate) debounce: Option<JoinHandle<()>>,
}

/// Search-and-selection controller over a remote user-search API.
///
/// Owns the debounce timer, the in-flight cancellation token, the rate-limit
/// gate, and the selection model. One instance tracks one logical "current
/// query"; state is never shared across instances.
pub struct SearchController {
	provider: Arc<dyn SearchProvider>,
	pub(crate) debounce_delay: Duration,
	pub(crate) min_query_len: usize,
	inner: Mutex<Inner>,
}

impl SearchController {
	pub fn new(cfg: &gus_config::Search, provider: Arc<dyn SearchProvider>) -> Arc<Self> {
		Self::with_initial_results(cfg, provider, Vec::new())
	}

	/// Builds a controller seeded with an initial result list.
	pub fn with_initial_results(
		cfg: &gus_config::Search,
		provider: Arc<dyn SearchProvider>,
		results: Vec<UserEntity>,
	) -> Arc<Self> {
		Arc::new(Self {
			provider,
			debounce_delay: Duration::from_millis(cfg.debounce_ms),
			min_query_len: cfg.min_query_len,
			inner: Mutex::new(Inner {
				results,
				selected: Vec::new(),
				loading: false,
				error: None,
				gate: RateLimitGate::default(),
				generation: 0,
				cancel: CancellationToken::new(),
				debounce: None,
			}),
		})
	}

	pub(crate) fn provider(&self) -> &Arc<dyn SearchProvider> {
		&self.provider
	}

	pub(crate) fn lock(&self) -> MutexGuard<'_, Inner> {
		self.inner.lock().unwrap_or_else(|err| err.into_inner())
	}

	pub fn results(&self) -> Vec<UserEntity> {
		self.lock().results.clone()
	}

	pub fn selected_ids(&self) -> Vec<String> {
		self.lock().selected.clone()
	}

	pub fn loading(&self) -> bool {
		self.lock().loading
	}

	pub fn error(&self) -> Option<String> {
		self.lock().error.clone()
	}

	pub fn is_all_selected(&self) -> bool {
		let inner = self.lock();

		selection::is_all_selected(&inner.results, &inner.selected)
	}

	pub fn is_some_selected(&self) -> bool {
		let inner = self.lock();

		selection::is_some_selected(&inner.results, &inner.selected)
	}

	pub fn toggle_selection(&self, node_id: &str) {
		let mut inner = self.lock();

		selection::toggle(&mut inner.selected, node_id);
	}

	pub fn select_all(&self) {
		let mut inner = self.lock();

		inner.selected = selection::select_all(&inner.results);
	}

	pub fn clear_selection(&self) {
		self.lock().selected.clear();
	}

	pub fn delete_selected(&self) {
		let mut inner = self.lock();
		let Inner { results, selected, .. } = &mut *inner;

		selection::delete_selected(results, selected);
	}

	/// Duplicates every selected user; the suffix defaults to a generated
	/// time-plus-random value unless an override is supplied.
	pub fn duplicate_selected(&self, suffix_override: Option<&str>) {
		let suffix = match suffix_override {
			Some(suffix) => suffix.to_string(),
			None => selection::unique_suffix(time::OffsetDateTime::now_utc()),
		};
		let mut inner = self.lock();
		let Inner { results, selected, .. } = &mut *inner;

		selection::duplicate_selected(results, selected, &suffix);
	}
}

impl Drop for SearchController {
	fn drop(&mut self) {
		let mut inner = self.lock();

		inner.cancel.cancel();

		if let Some(handle) = inner.debounce.take() {
			handle.abort();
		}
	}
}
