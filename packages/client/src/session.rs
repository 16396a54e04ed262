//! WebSocket client session management.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use sumi_server::infrastructure::dto::websocket::{MessageType, WsMessage};
use sumi_shared::time::now_millis;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{command::Command, error::ClientError, formatter::EventFormatter};

use super::ui::redisplay_prompt;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Run one WebSocket client session
///
/// Connects, sends hello, then prints events and sends typed commands until
/// the user quits or the connection ends.
///
/// # Returns
///
/// * `Ok(())` - the user quit
/// * `Err(ClientError::CapacityRejected)` - the hub refused the participant
/// * `Err(ClientError::ConnectionError)` - the connection was lost
pub async fn run_client_session(
    url: &str,
    user_id: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to canvas server!");

    let (mut write, read) = ws_stream.split();
    send(&mut write, &WsMessage::hello(user_id)).await?;

    // Spawn a task to handle incoming events
    let mut read_task = tokio::spawn(read_loop(read, user_id.to_string()));

    loop {
        tokio::select! {
            read_result = &mut read_task => {
                return read_result.unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())));
            }
            line = input.recv() => {
                let Some(line) = line else {
                    // Input closed (Ctrl+C / Ctrl+D)
                    read_task.abort();
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                };

                match Command::parse(&line) {
                    Ok(Command::Quit) => {
                        read_task.abort();
                        let _ = write.send(Message::Close(None)).await;
                        return Ok(());
                    }
                    Ok(Command::Help) => print!("{}", EventFormatter::format_help()),
                    Ok(command) => {
                        if let Some(message) = command.into_message()
                            && let Err(e) = send(&mut write, &message).await
                        {
                            read_task.abort();
                            return Err(e);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
                redisplay_prompt(user_id);
            }
        }
    }
}

async fn send(
    write: &mut SplitSink<WsStream, Message>,
    message: &WsMessage,
) -> Result<(), ClientError> {
    let json = message.encode()?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Print every event until the connection ends.
async fn read_loop(mut read: SplitStream<WsStream>, user_id: String) -> Result<(), ClientError> {
    while let Some(frame) = read.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                tracing::info!("Server closed the connection");
                break;
            }
            Err(e) => {
                return Err(ClientError::ConnectionError(e.to_string()));
            }
            _ => continue,
        };

        let message = match WsMessage::decode(text.as_str()) {
            Ok(message) => message,
            Err(_) => {
                print!("{}", EventFormatter::format_raw_message(text.as_str()));
                redisplay_prompt(&user_id);
                continue;
            }
        };

        print!(
            "{}",
            EventFormatter::format_event(&message, &user_id, now_millis())
        );
        redisplay_prompt(&user_id);

        // The hub only sends error when it refuses the participant
        if message.r#type == MessageType::Error {
            return Err(ClientError::CapacityRejected(
                message.message.unwrap_or_default(),
            ));
        }
    }

    Err(ClientError::ConnectionError("Connection lost".to_string()))
}
