use crate::connection::receiver::{MessageReceiver, WebSocketMessageReceiver};
use crate::connection::sender::{MessageSender, WebSocketMessageSender};
use crate::context::ApplicationContext;
use crate::lifecycle::run_client;
use crate::room::Room;
use crate::utils::infallible_stream::InfallibleStream;
use axum::Router;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::Response;
use axum::routing::{get, post};
use futures_util::StreamExt;
use tower_http::cors::CorsLayer;

mod media;
mod upload;

pub type WebSocket = axum::extract::ws::WebSocket;

pub async fn run_server(application_context: ApplicationContext) -> std::io::Result<()> {
	let address = application_context.configuration.address;
	let router = create_router(application_context);
	axum_server::bind(address).serve(router.into_make_service()).await
}

pub fn create_router(application_context: ApplicationContext) -> Router {
	let maximum_upload_size = application_context.configuration.maximum_upload_size_in_megabytes * 1024 * 1024;

	Router::new()
		.route("/ws", get(websocket_handler))
		.route("/api/upload", post(upload::upload_resource))
		.route("/uploads/{name}", get(media::serve_resource))
		.layer(DefaultBodyLimit::max(maximum_upload_size))
		.layer(CorsLayer::permissive())
		.with_state(application_context)
}

async fn websocket_handler(State(room): State<Room>, websocket_upgrade: WebSocketUpgrade) -> Response {
	websocket_upgrade.on_upgrade(move |websocket| {
		let (sink, stream) = websocket.split();

		let message_sender = MessageSender::from(WebSocketMessageSender::new(sink));
		let message_receiver =
			MessageReceiver::from(WebSocketMessageReceiver::new(InfallibleStream::from(stream), message_sender.clone()));

		run_client(room, message_sender, message_receiver)
	})
}
