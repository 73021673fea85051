use clap::Parser;
use vidsync_server::commandline::Commandline;
use vidsync_server::error::VidsyncError;

#[tokio::main]
async fn main() -> Result<(), VidsyncError> {
	Commandline::parse().run().await
}
