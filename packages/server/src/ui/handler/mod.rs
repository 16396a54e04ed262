//! Request handlers.

mod http;
mod websocket;

pub use http::{debug_canvas, healthz};
pub use websocket::websocket_handler;
