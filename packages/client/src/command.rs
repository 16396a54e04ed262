//! Parsing of typed commands into outgoing messages.

use sumi_server::infrastructure::dto::websocket::{DropDto, RectDto, WsMessage};
use thiserror::Error;
use uuid::Uuid;

/// Font size used for drops sent from the terminal
pub const DROP_FONT_PX: f64 = 16.0;

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `rect <x> <y> <w> <h> [text…]`
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        text: Option<String>,
    },
    /// `move <id> <x> <y> <w> <h> [text…]`
    Move {
        id: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        text: Option<String>,
    },
    /// `drop <x> <y> <text…>`
    Drop { x: f64, y: f64, text: String },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

const RECT_USAGE: &str = "rect <x> <y> <w> <h> [text]";
const MOVE_USAGE: &str = "move <id> <x> <y> <w> <h> [text]";
const DROP_USAGE: &str = "drop <x> <y> <text>";

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Usage("help"));
        };
        let args: Vec<&str> = words.collect();

        match name {
            "rect" => {
                let (x, y, w, h) = parse_geometry(&args, RECT_USAGE)?;
                Ok(Command::Rect {
                    x,
                    y,
                    w,
                    h,
                    text: join_text(&args[4..]),
                })
            }
            "move" => {
                let Some((id, rest)) = args.split_first() else {
                    return Err(CommandError::Usage(MOVE_USAGE));
                };
                let (x, y, w, h) = parse_geometry(rest, MOVE_USAGE)?;
                Ok(Command::Move {
                    id: id.to_string(),
                    x,
                    y,
                    w,
                    h,
                    text: join_text(&rest[4..]),
                })
            }
            "drop" => {
                if args.len() < 3 {
                    return Err(CommandError::Usage(DROP_USAGE));
                }
                Ok(Command::Drop {
                    x: parse_number(args[0])?,
                    y: parse_number(args[1])?,
                    text: args[2..].join(" "),
                })
            }
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Build the message to send, if this command sends one.
    ///
    /// New rectangles and drops get a fresh uuid. `owner` and `color` are left
    /// for the server to stamp.
    pub fn into_message(self) -> Option<WsMessage> {
        match self {
            Command::Rect { x, y, w, h, text } => Some(rect_message(
                Uuid::new_v4().to_string(),
                x,
                y,
                w,
                h,
                text,
            )),
            Command::Move {
                id,
                x,
                y,
                w,
                h,
                text,
            } => Some(rect_message(id, x, y, w, h, text)),
            Command::Drop { x, y, text } => Some(WsMessage::text_drop(DropDto {
                id: Uuid::new_v4().to_string(),
                owner: String::new(),
                text,
                x,
                y,
                font_px: DROP_FONT_PX,
            })),
            Command::Help | Command::Quit => None,
        }
    }
}

fn rect_message(id: String, x: f64, y: f64, w: f64, h: f64, text: Option<String>) -> WsMessage {
    WsMessage::rect(RectDto {
        id,
        owner: String::new(),
        x,
        y,
        w,
        h,
        color: 0,
        text,
    })
}

fn parse_geometry(args: &[&str], usage: &'static str) -> Result<(f64, f64, f64, f64), CommandError> {
    if args.len() < 4 {
        return Err(CommandError::Usage(usage));
    }
    Ok((
        parse_number(args[0])?,
        parse_number(args[1])?,
        parse_number(args[2])?,
        parse_number(args[3])?,
    ))
}

fn parse_number(word: &str) -> Result<f64, CommandError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::NotANumber(word.to_string()))
}

fn join_text(words: &[&str]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
