use crate::resource::ResourceId;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Tracks the single currently active media file and owns its bytes on disk.
/// Swapping and removal are atomic with respect to `current`; deletion of
/// superseded bytes is scheduled on a detached task and never blocks or
/// fails the caller.
#[derive(Clone)]
pub struct ResourceStore {
	inner: Arc<Inner>,
}

struct Inner {
	directory: PathBuf,
	current: Mutex<Option<ResourceId>>,
}

impl ResourceStore {
	pub fn new(directory: PathBuf) -> Self {
		Self {
			inner: Arc::new(Inner {
				directory,
				current: Mutex::new(None),
			}),
		}
	}

	/// Write uploaded bytes to disk under a freshly generated name. The new
	/// file only becomes current once it is passed to [`replace`].
	///
	/// [`replace`]: ResourceStore::replace
	pub async fn save_upload(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<ResourceId> {
		let resource = ResourceId::generate(original_name);
		tokio::fs::write(self.path_of(&resource), bytes).await?;
		Ok(resource)
	}

	/// Make `new` the current resource, returning the previous one. The
	/// previous file's deletion is attempted exactly once, in the background.
	pub fn replace(&self, new: ResourceId) -> Option<ResourceId> {
		let previous = self.inner.current.lock().replace(new);
		if let Some(previous) = previous.clone() {
			self.schedule_deletion(previous);
		}
		previous
	}

	/// Clear the current resource, scheduling deletion of its bytes. A no-op
	/// when nothing is current.
	pub fn remove(&self) -> Option<ResourceId> {
		let previous = self.inner.current.lock().take();
		if let Some(previous) = previous.clone() {
			self.schedule_deletion(previous);
		}
		previous
	}

	pub fn current(&self) -> Option<ResourceId> {
		self.inner.current.lock().clone()
	}

	pub fn path_of(&self, resource: &ResourceId) -> PathBuf {
		self.inner.directory.join(resource.as_str())
	}

	pub fn directory(&self) -> &Path {
		&self.inner.directory
	}

	fn schedule_deletion(&self, resource: ResourceId) {
		let path = self.path_of(&resource);
		tokio::spawn(async move {
			match tokio::fs::remove_file(&path).await {
				Ok(()) => info!("Deleted superseded resource '{resource}'."),
				Err(error) => warn!("Failed to delete resource '{resource}': {error}"),
			}
		});
	}
}
