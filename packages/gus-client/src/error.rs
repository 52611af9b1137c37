use time::OffsetDateTime;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	/// The cancellation token was invalidated before the request resolved.
	/// Callers treat this as a no-op, never as a user-visible failure.
	#[error("Search request was cancelled.")]
	Cancelled,
	/// The remote signalled quota exhaustion; retry no earlier than `reset_at`.
	#[error("{message}")]
	RateLimited { message: String, reset_at: OffsetDateTime, remaining: u32 },
	#[error("User search request failed with status {status}.")]
	Status { status: u16 },
}

impl Error {
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}
