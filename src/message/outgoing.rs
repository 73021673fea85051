use crate::message::outgoing::state_message::StateMessage;
use crate::message::{
	MessageError, WebSocketMessage, deserialize_message_from_str, serialize_message_to_websocket_message,
};
use crate::resource::ResourceId;
use serde::{Deserialize, Serialize};

pub mod state_message;

/// A message from the server to a viewer: either the join-time snapshot or a
/// fact derived from an accepted command.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "kebab-case")]
pub enum OutgoingMessage {
	State(StateMessage),
	Play(PlayBroadcast),
	Pause(PauseBroadcast),
	Seek(SeekBroadcast),
	ResourceAvailable(ResourceAvailableBroadcast),
	ResourceRemoved,
}

macro_rules! outgoing_from_struct {
	($enum_case: ident, $struct_type: ty) => {
		impl From<$struct_type> for OutgoingMessage {
			fn from(message: $struct_type) -> OutgoingMessage {
				OutgoingMessage::$enum_case(message)
			}
		}
	};
}

outgoing_from_struct!(State, StateMessage);

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlayBroadcast {
	pub current_time: f64,
}

outgoing_from_struct!(Play, PlayBroadcast);

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PauseBroadcast {
	pub current_time: f64,
}

outgoing_from_struct!(Pause, PauseBroadcast);

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SeekBroadcast {
	pub current_time: f64,
}

outgoing_from_struct!(Seek, SeekBroadcast);

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ResourceAvailableBroadcast {
	pub resource: ResourceId,
}

outgoing_from_struct!(ResourceAvailable, ResourceAvailableBroadcast);

impl From<&OutgoingMessage> for WebSocketMessage {
	fn from(message: &OutgoingMessage) -> Self {
		serialize_message_to_websocket_message(message)
	}
}

impl TryFrom<&WebSocketMessage> for OutgoingMessage {
	type Error = MessageError;

	fn try_from(websocket_message: &WebSocketMessage) -> Result<Self, Self::Error> {
		match websocket_message {
			WebSocketMessage::Text(json) => deserialize_message_from_str(json.as_str()),
			_ => Err(MessageError::WrongMessageType(websocket_message.clone())),
		}
	}
}
