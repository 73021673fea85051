use crate::connection::sender::{MessageSender, MessageSenderTrait};
use crate::message::outgoing::OutgoingMessage;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Message sender for tests that records everything instead of sending it.
#[derive(Clone, Debug, Default)]
pub struct FakeMessageSender {
	inner: Arc<Mutex<FakeMessageSenderInner>>,
}

#[derive(Debug, Default)]
struct FakeMessageSenderInner {
	sent_messages: Vec<OutgoingMessage>,
	closed: bool,
}

impl FakeMessageSender {
	pub fn sent_messages(&self) -> Vec<OutgoingMessage> {
		self.inner.lock().sent_messages.clone()
	}

	pub fn was_closed(&self) -> bool {
		self.inner.lock().closed
	}
}

impl From<FakeMessageSender> for MessageSender {
	fn from(fake_message_sender: FakeMessageSender) -> Self {
		Arc::pin(fake_message_sender)
	}
}

#[async_trait]
impl MessageSenderTrait for FakeMessageSender {
	async fn send_message(&self, message: OutgoingMessage) -> Result<(), ()> {
		self.inner.lock().sent_messages.push(message);
		Ok(())
	}

	async fn close(&self) {
		self.inner.lock().closed = true;
	}
}
