use crate::message::WebSocketMessage;
use crate::message::outgoing::OutgoingMessage;
use crate::server::WebSocket;
use async_trait::async_trait;
use futures_util::stream::SplitSink;
use futures_util::{Sink, SinkExt};
use std::fmt::Debug;
use std::pin::Pin;
use std::sync::Arc;
use tracing::error;

pub type MessageSender = Pin<Arc<dyn MessageSenderTrait + Send + Sync>>;

#[async_trait]
pub trait MessageSenderTrait {
	async fn send_message(&self, message: OutgoingMessage) -> Result<(), ()>;
	async fn close(&self);
}

pub type WebSocketMessageSender = SinkMessageSender<SplitSink<WebSocket, WebSocketMessage>>;

pub struct SinkMessageSender<ResponseSink> {
	inner: tokio::sync::Mutex<SinkMessageSenderInner<ResponseSink>>,
}

struct SinkMessageSenderInner<ResponseSink> {
	response_sink: ResponseSink,
}

#[async_trait]
impl<ResponseSink, SinkError> MessageSenderTrait for SinkMessageSender<ResponseSink>
where
	ResponseSink: Sink<WebSocketMessage, Error = SinkError> + Send + Unpin + 'static,
	SinkError: Debug + 'static,
{
	async fn send_message(&self, message: OutgoingMessage) -> Result<(), ()> {
		let mut inner = self.inner.lock().await;

		let websocket_message = WebSocketMessage::from(&message);

		inner
			.response_sink
			.send(websocket_message)
			.await
			.map_err(|error| error!("Error while sending message: {error:?}"))
	}

	async fn close(&self) {
		let mut inner = self.inner.lock().await;
		let _ = inner.response_sink.send(WebSocketMessage::Close(None)).await;
	}
}

impl<ResponseSink, SinkError> SinkMessageSender<ResponseSink>
where
	ResponseSink: Sink<WebSocketMessage, Error = SinkError> + Unpin,
	SinkError: Debug + 'static,
{
	pub fn new(response_sink: ResponseSink) -> Self {
		let inner = SinkMessageSenderInner { response_sink };
		Self { inner: inner.into() }
	}
}

impl<ResponseSink, SinkError> From<SinkMessageSender<ResponseSink>> for MessageSender
where
	ResponseSink: Sink<WebSocketMessage, Error = SinkError> + Send + Unpin + 'static,
	SinkError: Debug + 'static,
{
	fn from(sink_message_sender: SinkMessageSender<ResponseSink>) -> Self {
		Arc::pin(sink_message_sender)
	}
}
