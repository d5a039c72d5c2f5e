// essmaint-api: Async Rust client for the ESS remote management API

pub mod auth;
pub mod client;
pub mod command;
pub mod error;
pub mod models;
pub mod systems;
pub mod transport;

pub use auth::AccessToken;
pub use client::MaintClient;
pub use error::Error;
pub use models::{CommandSpec, SystemState};
