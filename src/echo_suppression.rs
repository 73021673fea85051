use std::time::{Duration, Instant};

pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(500);

/// Tracks whether a locally observed playback event was caused by applying a
/// remote fact. After a remote fact has been applied, the next local event
/// within the suppression window is treated as an echo and must not be
/// relayed back.
///
/// One suppressor belongs to one connection; it is not shared.
#[derive(Clone, Debug)]
pub struct EchoSuppressor {
	window: Duration,
	armed_until: Option<Instant>,
}

impl Default for EchoSuppressor {
	fn default() -> Self {
		Self::new(DEFAULT_SUPPRESSION_WINDOW)
	}
}

impl EchoSuppressor {
	pub fn new(window: Duration) -> Self {
		Self { window, armed_until: None }
	}

	/// Arm the suppressor because a remote fact is about to be applied.
	pub fn expect_echo(&mut self) {
		self.expect_echo_at(Instant::now());
	}

	/// Check a local event. Returns `true` if it is the echo of a remote
	/// fact. Consumes the armed window either way, so only the first local
	/// event after arming can be suppressed.
	pub fn is_echo(&mut self) -> bool {
		self.is_echo_at(Instant::now())
	}

	fn expect_echo_at(&mut self, now: Instant) {
		self.armed_until = Some(now + self.window);
	}

	fn is_echo_at(&mut self, now: Instant) -> bool {
		match self.armed_until.take() {
			Some(armed_until) => now < armed_until,
			None => false,
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn local_events_should_not_be_suppressed_without_a_remote_fact() {
		let mut suppressor = EchoSuppressor::default();
		assert!(!suppressor.is_echo());
	}

	#[test]
	fn the_first_local_event_within_the_window_should_be_an_echo() {
		let mut suppressor = EchoSuppressor::default();
		let now = Instant::now();

		suppressor.expect_echo_at(now);

		assert!(suppressor.is_echo_at(now + Duration::from_millis(499)));
	}

	#[test]
	fn local_events_after_the_window_should_not_be_echoes() {
		let mut suppressor = EchoSuppressor::default();
		let now = Instant::now();

		suppressor.expect_echo_at(now);

		assert!(!suppressor.is_echo_at(now + Duration::from_millis(500)));
	}

	#[test]
	fn only_the_first_local_event_should_be_suppressed() {
		let mut suppressor = EchoSuppressor::default();
		let now = Instant::now();

		suppressor.expect_echo_at(now);

		assert!(suppressor.is_echo_at(now + Duration::from_millis(1)));
		assert!(!suppressor.is_echo_at(now + Duration::from_millis(2)));
	}

	#[test]
	fn rearming_should_reset_the_window() {
		let mut suppressor = EchoSuppressor::new(Duration::from_millis(100));
		let now = Instant::now();

		suppressor.expect_echo_at(now);
		suppressor.expect_echo_at(now + Duration::from_millis(90));

		assert!(suppressor.is_echo_at(now + Duration::from_millis(150)));
	}
}
