use crate::message::outgoing::OutgoingMessage;
use crate::room::client_id::ClientId;
use tokio::sync::mpsc;

/// Handle for one connected viewer. Sessions are ephemeral and carry no
/// state of their own beyond the outbound message queue; all shared truth
/// lives in the room's playback state.
#[derive(Clone, Debug)]
pub struct Client {
	id: ClientId,
	queue: mpsc::UnboundedSender<OutgoingMessage>,
}

impl Client {
	pub fn new(id: ClientId, queue: mpsc::UnboundedSender<OutgoingMessage>) -> Self {
		Self { id, queue }
	}

	pub fn id(&self) -> ClientId {
		self.id
	}

	/// Enqueue a message for in-order delivery. Returns `false` once the
	/// connection's outbound pump is gone.
	pub fn enqueue(&self, message: OutgoingMessage) -> bool {
		self.queue.send(message).is_ok()
	}
}
