//! Utilities shared by the Sumi server and client binaries.

pub mod logger;
pub mod time;
