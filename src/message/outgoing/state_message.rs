use crate::resource::ResourceId;
use crate::room::playback_state::PlaybackState;
use serde::{Deserialize, Serialize};

/// Full copy of the current playback state, sent to a newly connected viewer
/// as its very first message. There is no replay of historical facts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StateMessage {
	pub is_playing: bool,
	pub current_time: f64,
	pub resource: Option<ResourceId>,
	pub last_update_in_milliseconds: i64,
}

impl From<&PlaybackState> for StateMessage {
	fn from(state: &PlaybackState) -> Self {
		Self {
			is_playing: state.is_playing,
			current_time: state.current_time,
			resource: state.resource.clone(),
			last_update_in_milliseconds: state.last_update.timestamp_millis(),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::message::outgoing::OutgoingMessage;
	use chrono::{TimeZone, Utc};

	#[test]
	fn state_message_should_serialize_and_deserialize() {
		let state_message = OutgoingMessage::State(StateMessage {
			is_playing: true,
			current_time: 12.5,
			resource: Some(ResourceId::from("video_cafe.mkv")),
			last_update_in_milliseconds: 1_000,
		});
		let json = serde_json::to_string(&state_message).expect("Failed to serialize State message to JSON");
		assert_eq!(
			r#"{"type":"state","is_playing":true,"current_time":12.5,"resource":"video_cafe.mkv","last_update_in_milliseconds":1000}"#,
			json
		);

		let deserialized_state_message: OutgoingMessage =
			serde_json::from_str(&json).expect("Failed to deserialize State message from JSON");
		assert_eq!(state_message, deserialized_state_message);
	}

	#[test]
	fn state_message_without_a_resource_should_have_a_null_resource() {
		let state_message = OutgoingMessage::State(StateMessage {
			is_playing: false,
			current_time: 0.0,
			resource: None,
			last_update_in_milliseconds: 0,
		});
		let json = serde_json::to_string(&state_message).expect("Failed to serialize State message to JSON");
		assert_eq!(
			r#"{"type":"state","is_playing":false,"current_time":0.0,"resource":null,"last_update_in_milliseconds":0}"#,
			json
		);
	}

	#[test]
	fn state_message_should_copy_all_playback_state_fields() {
		let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
		let mut playback_state = PlaybackState::at_rest(now);
		playback_state.is_playing = true;
		playback_state.current_time = 98.5;
		playback_state.resource = Some(ResourceId::from("video_feed.mkv"));

		let state_message = StateMessage::from(&playback_state);

		assert!(state_message.is_playing);
		assert_eq!(98.5, state_message.current_time);
		assert_eq!(Some(ResourceId::from("video_feed.mkv")), state_message.resource);
		assert_eq!(1_700_000_000_000, state_message.last_update_in_milliseconds);
	}
}
