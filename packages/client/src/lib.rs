//! Terminal participant for the Sumi canvas hub.
//!
//! Joins a canvas over WebSocket, prints every event the hub sends, and turns
//! typed commands into rectangles and text drops.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
