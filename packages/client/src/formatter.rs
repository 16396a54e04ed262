//! Event formatting for client display.

use sumi_server::infrastructure::dto::websocket::{DropDto, MessageType, RectDto, WsMessage};
use sumi_shared::time::millis_to_clock_time;

/// Names of the identity colors, by slot
const COLOR_NAMES: [&str; 7] = ["red", "orange", "yellow", "green", "blue", "indigo", "violet"];

/// Event formatter for client display
pub struct EventFormatter;

impl EventFormatter {
    /// Format any event received from the hub
    ///
    /// # Arguments
    ///
    /// * `message` - The decoded event
    /// * `me` - The current participant's id (to mark as "me")
    /// * `received_at` - Unix timestamp when the event arrived (milliseconds)
    pub fn format_event(message: &WsMessage, me: &str, received_at: i64) -> String {
        let time = millis_to_clock_time(received_at);
        match message.r#type {
            MessageType::Welcome => Self::format_welcome(message.color.unwrap_or_default()),
            MessageType::Presence => Self::format_presence(
                message.user_id.as_deref().unwrap_or("?"),
                message.color.unwrap_or_default(),
                me,
            ),
            MessageType::Rect => match &message.rect {
                Some(rect) => Self::format_rect(rect, &time),
                None => Self::format_raw_message("rect without payload"),
            },
            MessageType::Remove => {
                Self::format_remove(message.rect_id.as_deref().unwrap_or("?"), &time)
            }
            MessageType::Drop => match &message.drop {
                Some(drop) => Self::format_drop(drop, &time),
                None => Self::format_raw_message("drop without payload"),
            },
            MessageType::Error => {
                Self::format_error(message.message.as_deref().unwrap_or("unknown error"))
            }
            other => Self::format_raw_message(&format!("{:?}", other)),
        }
    }

    /// Format the greeting carrying the participant's own color
    pub fn format_welcome(color: i64) -> String {
        format!(
            "\n\n============================================================\n\
             Joined the canvas. Your color is {}.\n\
             Type 'help' for commands.\n\
             ============================================================\n",
            color_name(color)
        )
    }

    /// Format a presence notification
    pub fn format_presence(user_id: &str, color: i64, me: &str) -> String {
        let me_suffix = if user_id == me { " (me)" } else { "" };
        format!("\n+ {}{} is here ({})\n", user_id, me_suffix, color_name(color))
    }

    /// Format a placed or moved rectangle
    pub fn format_rect(rect: &RectDto, time: &str) -> String {
        let text = rect
            .text
            .as_deref()
            .map(|t| format!(" \"{}\"", t))
            .unwrap_or_default();
        format!(
            "\n[{}] @{} placed {} at ({}, {}) size {}x{} ({}){}\n",
            time,
            rect.owner,
            rect.id,
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            color_name(rect.color),
            text
        )
    }

    /// Format a removed rectangle
    pub fn format_remove(rect_id: &str, time: &str) -> String {
        format!("\n[{}] - {} removed\n", time, rect_id)
    }

    /// Format a text drop
    pub fn format_drop(drop: &DropDto, time: &str) -> String {
        format!(
            "\n[{}] @{} dropped \"{}\" at ({}, {})\n",
            time, drop.owner, drop.text, drop.x, drop.y
        )
    }

    /// Format an error sent by the hub
    pub fn format_error(message: &str) -> String {
        format!("\n! server: {}\n", message)
    }

    /// Format the command list
    pub fn format_help() -> String {
        "\nCommands:\n\
         \x20 rect <x> <y> <w> <h> [text]       place a new rectangle\n\
         \x20 move <id> <x> <y> <w> <h> [text]  move or resize your rectangle\n\
         \x20 drop <x> <y> <text>               drop text on the canvas\n\
         \x20 help                              show this list\n\
         \x20 quit                              leave the canvas\n"
            .to_string()
    }

    /// Format a raw message that couldn't be understood
    pub fn format_raw_message(text: &str) -> String {
        format!("\n? {}\n", text)
    }
}

fn color_name(color: i64) -> &'static str {
    usize::try_from(color)
        .ok()
        .and_then(|slot| COLOR_NAMES.get(slot))
        .copied()
        .unwrap_or("unknown color")
}
