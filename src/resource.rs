use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::Path;
use uuid::Uuid;

pub mod store;

/// Name of a media file inside the uploads directory. At most one resource
/// is current at any instant; see [`store::ResourceStore`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId {
	name: String,
}

impl ResourceId {
	/// Generate a fresh identifier, keeping the extension of the uploaded
	/// file so players can recognize the container format from the URL.
	pub fn generate(original_name: &str) -> Self {
		let extension = Path::new(original_name)
			.extension()
			.and_then(|extension| extension.to_str())
			.map(|extension| format!(".{extension}"))
			.unwrap_or_default();

		Self {
			name: format!("video_{}{extension}", Uuid::new_v4().simple()),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.name
	}
}

impl From<&str> for ResourceId {
	fn from(name: &str) -> Self {
		Self { name: name.to_string() }
	}
}

impl Display for ResourceId {
	fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
		write!(formatter, "{}", self.name)
	}
}
