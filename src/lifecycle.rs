use crate::connection::receiver::MessageReceiver;
use crate::connection::sender::MessageSender;
use crate::message::client_request::{ClientRequest, PauseRequest, PlayRequest, SeekRequest};
use crate::message::outgoing::OutgoingMessage;
use crate::room::Room;
use crate::room::client::Client;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

/// Drives one websocket connection from join to disconnect. The connection
/// is finished as soon as either direction ends, the viewer is removed from
/// the room and the socket is closed.
pub async fn run_client(room: Room, message_sender: MessageSender, message_receiver: MessageReceiver) {
	let (client, queue_receiver) = room.join();
	let client_id = client.id();

	tokio::select! {
		() = handle_requests(&room, &client, message_receiver) => {},
		() = forward_queued_messages(queue_receiver, &message_sender) => {},
	};

	room.leave(client_id);
	message_sender.close().await;
}

async fn handle_requests(room: &Room, client: &Client, mut message_receiver: MessageReceiver) {
	while let Some(request) = message_receiver.receive().await {
		handle_request(room, client, request);
	}
}

fn handle_request(room: &Room, client: &Client, request: ClientRequest) {
	use ClientRequest::*;
	match request {
		Play(PlayRequest { current_time }) => {
			if let Some(position) = valid_position(client, current_time) {
				room.play(client.id(), position);
			}
		}
		Pause(PauseRequest { current_time }) => {
			if let Some(position) = valid_position(client, current_time) {
				room.pause(client.id(), position);
			}
		}
		Seek(SeekRequest { current_time }) => {
			if let Some(position) = valid_position(client, current_time) {
				room.seek(client.id(), position);
			}
		}
		DeleteResource => room.remove_resource(),
	}
}

/// NaN and infinite positions can't represent a playhead, drop them.
fn valid_position(client: &Client, current_time: f64) -> Option<f64> {
	if current_time.is_finite() {
		Some(current_time)
	} else {
		warn!("Dropping non-finite playback position {current_time} from {}.", client.id());
		None
	}
}

async fn forward_queued_messages(mut queue_receiver: UnboundedReceiver<OutgoingMessage>, message_sender: &MessageSender) {
	while let Some(message) = queue_receiver.recv().await {
		if message_sender.send_message(message).await.is_err() {
			break;
		}
	}
}
