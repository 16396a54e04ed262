//! axum server exposing the hub over WebSocket and HTTP.

mod config;
mod handler;
mod server;
mod signal;
pub mod state;

pub use config::{
    ConfigError, DEFAULT_PONG_WAIT, DEFAULT_WRITE_WAIT, HeartbeatConfig, ServerConfig,
};
pub use server::{Server, ServerError};
