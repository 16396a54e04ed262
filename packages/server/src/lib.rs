//! Session hub for Sumi, a shared real-time canvas.
//!
//! Participants connect over WebSocket, receive an identity color, and place
//! non-overlapping rectangles and ephemeral text drops that every other
//! participant sees immediately.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
