use time::OffsetDateTime;

/// Timestamp lockout armed by rate-limited responses.
///
/// Once armed, the gate blocks every dispatch attempt until a caller-supplied
/// `now` reaches the reset time; the first poll at or past the reset clears
/// the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitGate {
	reset_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
	/// No window is active.
	Open,
	/// A window was active and `now` has passed it; the gate is now open.
	Cleared,
	/// The window is still active.
	Blocked { reset_at: OffsetDateTime },
}

impl RateLimitGate {
	pub fn arm(&mut self, reset_at: OffsetDateTime) {
		self.reset_at = Some(reset_at);
	}

	pub fn is_armed(&self) -> bool {
		self.reset_at.is_some()
	}

	pub fn reset_at(&self) -> Option<OffsetDateTime> {
		self.reset_at
	}

	pub fn poll(&mut self, now: OffsetDateTime) -> GateStatus {
		match self.reset_at {
			None => GateStatus::Open,
			Some(reset_at) if now >= reset_at => {
				self.reset_at = None;

				GateStatus::Cleared
			},
			Some(reset_at) => GateStatus::Blocked { reset_at },
		}
	}
}
