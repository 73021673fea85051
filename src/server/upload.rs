use crate::room::Room;
use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, info};

const UPLOAD_FIELD_NAME: &str = "video";
const FALLBACK_FILE_NAME: &str = "upload";

/// Accepts a multipart upload, stores it under a fresh name and atomically
/// makes it the current resource. The confirmation is only broadcast once
/// both the bytes and the state swap have succeeded; a failed upload leaves
/// the previous resource untouched.
pub async fn upload_resource(State(room): State<Room>, mut multipart: Multipart) -> Response {
	loop {
		let field = match multipart.next_field().await {
			Ok(Some(field)) => field,
			Ok(None) => {
				return (
					StatusCode::BAD_REQUEST,
					format!("Missing multipart field '{UPLOAD_FIELD_NAME}'."),
				)
					.into_response();
			}
			Err(error) => {
				return (StatusCode::BAD_REQUEST, format!("Invalid multipart request: {error}")).into_response();
			}
		};

		if field.name() != Some(UPLOAD_FIELD_NAME) {
			continue;
		}

		let original_name = field.file_name().unwrap_or(FALLBACK_FILE_NAME).to_owned();
		let content = match field.bytes().await {
			Ok(content) => content,
			Err(error) => {
				return (StatusCode::BAD_REQUEST, format!("Failed to read upload: {error}")).into_response();
			}
		};

		let resource = match room.resources().save_upload(&original_name, &content).await {
			Ok(resource) => resource,
			Err(error) => {
				error!("Failed to store upload '{original_name}': {error}");
				return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to store upload.").into_response();
			}
		};

		info!("Stored upload '{original_name}' as '{resource}' ({} bytes).", content.len());
		room.replace_resource(resource.clone());

		return Json(json!({ "resource": resource })).into_response();
	}
}
