use crate::message::{
	MessageError, WebSocketMessage, deserialize_message_from_str, serialize_message_to_websocket_message,
};
use serde::{Deserialize, Serialize};

/// A request from one viewer to change the shared playback state or the
/// active resource. Produced once, consumed once, never persisted.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "kebab-case")]
pub enum ClientRequest {
	Play(PlayRequest),
	Pause(PauseRequest),
	Seek(SeekRequest),
	DeleteResource,
}

macro_rules! client_request_from_struct {
	($enum_case: ident, $struct_type: ty) => {
		impl From<$struct_type> for ClientRequest {
			fn from(request: $struct_type) -> ClientRequest {
				ClientRequest::$enum_case(request)
			}
		}
	};
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlayRequest {
	pub current_time: f64,
}

client_request_from_struct!(Play, PlayRequest);

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PauseRequest {
	pub current_time: f64,
}

client_request_from_struct!(Pause, PauseRequest);

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SeekRequest {
	pub current_time: f64,
}

client_request_from_struct!(Seek, SeekRequest);

impl From<&ClientRequest> for WebSocketMessage {
	fn from(request: &ClientRequest) -> Self {
		serialize_message_to_websocket_message(request)
	}
}

impl TryFrom<&str> for ClientRequest {
	type Error = MessageError;

	fn try_from(json: &str) -> Result<Self, Self::Error> {
		deserialize_message_from_str(json)
	}
}

impl TryFrom<&WebSocketMessage> for ClientRequest {
	type Error = MessageError;

	fn try_from(websocket_message: &WebSocketMessage) -> Result<Self, Self::Error> {
		match websocket_message {
			WebSocketMessage::Text(json) => json.as_str().try_into(),
			_ => Err(MessageError::WrongMessageType(websocket_message.clone())),
		}
	}
}
