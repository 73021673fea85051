use crate::connection::sender::MessageSender;
use crate::message::client_request::ClientRequest;
use crate::message::{MessageError, WebSocketMessage};
use crate::server::WebSocket;
use crate::utils::infallible_stream::InfallibleStream;
use async_trait::async_trait;
use futures_util::stream::SplitStream;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use tracing::{debug, error};

pub type MessageReceiver = Pin<Box<dyn MessageReceiverTrait + Unpin + Send>>;
pub type WebSocketMessageReceiver = StreamMessageReceiver<InfallibleStream<SplitStream<WebSocket>>>;

#[async_trait]
pub trait MessageReceiverTrait {
	/// Receive a request from the client or None if the connection has been closed.
	async fn receive(&mut self) -> Option<ClientRequest>;
}

pub struct StreamMessageReceiver<RequestStream = InfallibleStream<SplitStream<WebSocket>>> {
	request_stream: RequestStream,
	message_sender: MessageSender,
}

#[async_trait]
impl<RequestStream> MessageReceiverTrait for StreamMessageReceiver<RequestStream>
where
	RequestStream: Stream<Item = WebSocketMessage> + Unpin + Send,
{
	async fn receive(&mut self) -> Option<ClientRequest> {
		loop {
			let websocket_message = self.request_stream.next().await?;

			if let WebSocketMessage::Close(_) = websocket_message {
				self.message_sender.close().await;
				return None;
			}

			// Malformed commands are dropped without a reply; the shared state
			// must not be affected by anything that doesn't parse.
			match ClientRequest::try_from(&websocket_message) {
				Ok(client_request) => return Some(client_request),
				Err(MessageError::DeserializationFailed { error, json }) => {
					error!("Failed to deserialize client request with error: {error}, message was: {json}");
				}
				Err(MessageError::WrongMessageType(message)) => {
					debug!("Ignoring non-text message: {message:?}");
				}
			}
		}
	}
}

impl<RequestStream> StreamMessageReceiver<RequestStream>
where
	RequestStream: Stream<Item = WebSocketMessage>,
{
	pub fn new(request_stream: RequestStream, message_sender: MessageSender) -> Self {
		Self {
			request_stream,
			message_sender,
		}
	}
}

impl<RequestStream> From<StreamMessageReceiver<RequestStream>> for MessageReceiver
where
	RequestStream: Stream<Item = WebSocketMessage> + Unpin + Send + 'static,
{
	fn from(stream_message_receiver: StreamMessageReceiver<RequestStream>) -> Self {
		Box::pin(stream_message_receiver)
	}
}
