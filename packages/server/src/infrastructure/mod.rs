//! Infrastructure 層: 通信フォーマットと配信

pub mod dto;
pub mod message_pusher;
