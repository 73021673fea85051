pub mod commandline;
pub mod configuration;
pub mod connection;
pub mod context;
pub mod echo_suppression;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod resource;
pub mod room;
pub mod server;
pub mod utils;
