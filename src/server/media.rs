use crate::resource::ResourceId;
use crate::room::Room;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use http_range_header::parse_range_header;
use std::ops::RangeInclusive;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::error;

/// Serves the bytes of the current resource, with RFC 7233 single-range
/// support so browsers can seek. Only the current resource is reachable;
/// superseded names 404 even while their bytes still linger on disk.
pub async fn serve_resource(State(room): State<Room>, Path(name): Path<String>, request_headers: HeaderMap) -> Response {
	let resource = ResourceId::from(name.as_str());
	if room.resources().current() != Some(resource.clone()) {
		return StatusCode::NOT_FOUND.into_response();
	}

	let path = room.resources().path_of(&resource);
	let file_size = match tokio::fs::metadata(&path).await {
		Ok(metadata) => metadata.len(),
		Err(error) => {
			error!("Failed to stat resource '{resource}': {error}");
			return StatusCode::NOT_FOUND.into_response();
		}
	};

	let mut headers = HeaderMap::new();
	let content_type = mime_guess::from_path(&path).first_or_octet_stream();
	match HeaderValue::from_str(content_type.as_ref()) {
		Ok(value) => headers.insert(CONTENT_TYPE, value),
		Err(_) => headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
	};
	headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));

	if let Some(range_value) = request_headers.get(RANGE) {
		let Ok(range_value) = range_value.to_str() else {
			return range_not_satisfiable(file_size);
		};
		let Some(range) = satisfiable_range(range_value, file_size) else {
			return range_not_satisfiable(file_size);
		};
		return partial_content(&room, &resource, range, file_size, headers).await;
	}

	let file = match tokio::fs::File::open(&path).await {
		Ok(file) => file,
		Err(error) => {
			error!("Failed to open resource '{resource}': {error}");
			return StatusCode::INTERNAL_SERVER_ERROR.into_response();
		}
	};

	headers.insert(CONTENT_LENGTH, HeaderValue::from(file_size));
	(StatusCode::OK, headers, Body::from_stream(ReaderStream::new(file))).into_response()
}

/// Resolve a `Range` header against the file size. Multi-range requests are
/// answered with their first range only.
fn satisfiable_range(range_value: &str, file_size: u64) -> Option<RangeInclusive<u64>> {
	let parsed = parse_range_header(range_value).ok()?;
	let ranges = parsed.validate(file_size).ok()?;
	ranges.into_iter().next()
}

fn range_not_satisfiable(file_size: u64) -> Response {
	let mut headers = HeaderMap::new();
	if let Ok(value) = HeaderValue::from_str(&format!("bytes */{file_size}")) {
		headers.insert(CONTENT_RANGE, value);
	}
	(StatusCode::RANGE_NOT_SATISFIABLE, headers).into_response()
}

async fn partial_content(
	room: &Room,
	resource: &ResourceId,
	range: RangeInclusive<u64>,
	file_size: u64,
	mut headers: HeaderMap,
) -> Response {
	let (start, end) = (*range.start(), *range.end());
	let length = end - start + 1;

	let path = room.resources().path_of(resource);
	let mut file = match tokio::fs::File::open(&path).await {
		Ok(file) => file,
		Err(error) => {
			error!("Failed to open resource '{resource}': {error}");
			return StatusCode::INTERNAL_SERVER_ERROR.into_response();
		}
	};
	if let Err(error) = file.seek(std::io::SeekFrom::Start(start)).await {
		error!("Failed to seek in resource '{resource}': {error}");
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}

	match HeaderValue::from_str(&format!("bytes {start}-{end}/{file_size}")) {
		Ok(value) => headers.insert(CONTENT_RANGE, value),
		Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
	};
	headers.insert(CONTENT_LENGTH, HeaderValue::from(length));

	let body = Body::from_stream(ReaderStream::new(file.take(length)));
	(StatusCode::PARTIAL_CONTENT, headers, body).into_response()
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::resource::store::ResourceStore;
	use uuid::Uuid;

	const CONTENT: &[u8] = b"0123456789";

	async fn room_with_resource() -> (Room, ResourceId) {
		let directory = std::env::temp_dir().join(format!("vidsync-media-test-{}", Uuid::new_v4().simple()));
		std::fs::create_dir_all(&directory).expect("Failed to create temporary uploads directory");
		let room = Room::new(ResourceStore::new(directory));
		let resource = room
			.resources()
			.save_upload("movie.mp4", CONTENT)
			.await
			.expect("Failed to save upload");
		room.replace_resource(resource.clone());
		(room, resource)
	}

	async fn body_bytes(response: Response) -> Vec<u8> {
		axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.expect("Failed to collect response body")
			.to_vec()
	}

	fn range_headers(value: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(RANGE, HeaderValue::from_str(value).expect("Invalid test range header"));
		headers
	}

	#[tokio::test]
	async fn should_serve_the_whole_current_resource() {
		let (room, resource) = room_with_resource().await;

		let response = serve_resource(State(room), Path(resource.as_str().to_owned()), HeaderMap::new()).await;

		assert_eq!(StatusCode::OK, response.status());
		assert_eq!(
			Some("video/mp4"),
			response.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
		);
		assert_eq!(
			Some("bytes"),
			response.headers().get(ACCEPT_RANGES).and_then(|value| value.to_str().ok())
		);
		assert_eq!(CONTENT, body_bytes(response).await.as_slice());
	}

	#[tokio::test]
	async fn should_serve_a_partial_range() {
		let (room, resource) = room_with_resource().await;

		let response = serve_resource(State(room), Path(resource.as_str().to_owned()), range_headers("bytes=2-4")).await;

		assert_eq!(StatusCode::PARTIAL_CONTENT, response.status());
		assert_eq!(
			Some("bytes 2-4/10"),
			response.headers().get(CONTENT_RANGE).and_then(|value| value.to_str().ok())
		);
		assert_eq!(b"234".as_slice(), body_bytes(response).await.as_slice());
	}

	#[tokio::test]
	async fn should_resolve_suffix_ranges() {
		let (room, resource) = room_with_resource().await;

		let response = serve_resource(State(room), Path(resource.as_str().to_owned()), range_headers("bytes=-3")).await;

		assert_eq!(StatusCode::PARTIAL_CONTENT, response.status());
		assert_eq!(
			Some("bytes 7-9/10"),
			response.headers().get(CONTENT_RANGE).and_then(|value| value.to_str().ok())
		);
		assert_eq!(b"789".as_slice(), body_bytes(response).await.as_slice());
	}

	#[tokio::test]
	async fn unsatisfiable_ranges_should_get_a_416() {
		let (room, resource) = room_with_resource().await;

		let response =
			serve_resource(State(room), Path(resource.as_str().to_owned()), range_headers("bytes=100-200")).await;

		assert_eq!(StatusCode::RANGE_NOT_SATISFIABLE, response.status());
		assert_eq!(
			Some("bytes */10"),
			response.headers().get(CONTENT_RANGE).and_then(|value| value.to_str().ok())
		);
	}

	#[tokio::test]
	async fn resources_that_are_not_current_should_not_be_reachable() {
		let (room, _resource) = room_with_resource().await;

		let response = serve_resource(State(room), Path("video_other.mkv".to_owned()), HeaderMap::new()).await;

		assert_eq!(StatusCode::NOT_FOUND, response.status());
	}

	#[tokio::test]
	async fn superseded_resources_should_stop_being_reachable() {
		let (room, resource) = room_with_resource().await;
		let replacement = room
			.resources()
			.save_upload("other.mp4", b"other bytes")
			.await
			.expect("Failed to save upload");
		room.replace_resource(replacement);

		let response = serve_resource(State(room), Path(resource.as_str().to_owned()), HeaderMap::new()).await;

		assert_eq!(StatusCode::NOT_FOUND, response.status());
	}
}
