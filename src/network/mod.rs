pub mod client;
pub mod protocol;
pub mod server;

pub use client::NetworkClient;
pub use protocol::{MoveRequest, MoveResponse};
pub use server::{serve, start_server};
