use crate::resource::ResourceId;
use chrono::{DateTime, Utc};

/// The single shared playback state every viewer is kept in sync with.
/// Mutated only through [`apply`]; viewers never touch it directly.
///
/// Invariant: without a resource the state is at rest, i.e. paused at
/// position zero.
///
/// [`apply`]: PlaybackState::apply
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
	pub is_playing: bool,
	pub current_time: f64,
	pub resource: Option<ResourceId>,
	pub last_update: DateTime<Utc>,
}

/// A state transition derived from an accepted viewer command.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
	PlayedAt(f64),
	PausedAt(f64),
	SeekedTo(f64),
	ResourceReplaced(ResourceId),
	ResourceRemoved,
}

impl PlaybackState {
	pub fn at_rest(now: DateTime<Utc>) -> Self {
		Self {
			is_playing: false,
			current_time: 0.0,
			resource: None,
			last_update: now,
		}
	}

	/// The single mutation point. Positions are clamped to zero and a fresh
	/// resource always starts paused at the beginning, so a new upload can
	/// never inherit a stale position. Durations are a player-local concern
	/// and are not validated here.
	pub fn apply(&mut self, change: StateChange, now: DateTime<Utc>) {
		use StateChange::*;
		match change {
			PlayedAt(position) => {
				self.is_playing = true;
				self.current_time = position.max(0.0);
			}
			PausedAt(position) => {
				self.is_playing = false;
				self.current_time = position.max(0.0);
			}
			SeekedTo(position) => self.current_time = position.max(0.0),
			ResourceReplaced(resource) => {
				self.resource = Some(resource);
				self.is_playing = false;
				self.current_time = 0.0;
			}
			ResourceRemoved => {
				self.resource = None;
				self.is_playing = false;
				self.current_time = 0.0;
			}
		}
		self.last_update = now;
	}
}
