use crate::configuration::Configuration;
use crate::resource::store::ResourceStore;
use crate::room::Room;
use axum::extract::FromRef;

#[derive(Clone, FromRef)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub room: Room,
}

impl ApplicationContext {
	pub async fn new(configuration: Configuration) -> anyhow::Result<ApplicationContext> {
		tokio::fs::create_dir_all(&configuration.uploads_directory).await?;
		let room = Room::new(ResourceStore::new(configuration.uploads_directory.clone()));

		Ok(Self { configuration, room })
	}
}
