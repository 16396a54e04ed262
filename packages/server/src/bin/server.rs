//! Sumi canvas hub server.
//!
//! Participants connect to `/ws`, receive an identity color and share
//! rectangles and text drops in real time.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sumi-server
//! cargo run --bin sumi-server -- --host 127.0.0.1 --port 3000
//! PORT=3000 STATIC_DIR=./public cargo run --bin sumi-server
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use sumi_server::{
    domain::Session,
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::{
        DEFAULT_PONG_WAIT, DEFAULT_WRITE_WAIT, HeartbeatConfig, Server, ServerConfig,
    },
    usecase::CanvasHub,
};
use sumi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sumi-server")]
#[command(about = "Session hub for a shared real-time canvas", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Directory served for paths without a dedicated route
    #[arg(long, env = "STATIC_DIR", default_value = "./web/static")]
    static_dir: PathBuf,

    /// Deadline for a single frame write, in milliseconds
    #[arg(long, env = "WRITE_WAIT_MS", default_value_t = DEFAULT_WRITE_WAIT.as_millis() as u64)]
    write_wait_ms: u64,

    /// Read inactivity timeout, in milliseconds
    #[arg(long, env = "PONG_WAIT_MS", default_value_t = DEFAULT_PONG_WAIT.as_millis() as u64)]
    pong_wait_ms: u64,

    /// Interval between heartbeat Pings, in milliseconds [default: 80% of pong wait]
    #[arg(long, env = "PING_PERIOD_MS")]
    ping_period_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let heartbeat =
        match HeartbeatConfig::from_millis(args.write_wait_ms, args.pong_wait_ms, args.ping_period_ms)
        {
            Ok(heartbeat) => heartbeat,
            Err(e) => {
                tracing::error!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
        };
    let config = ServerConfig {
        static_dir: args.static_dir,
        heartbeat,
    };

    // Initialize dependencies in order:
    // 1. Session (shared state block)
    // 2. MessagePusher
    // 3. CanvasHub (the single lock around both)
    // 4. Server (use cases + router)
    let session = Session::default();
    let message_pusher = Box::new(WebSocketMessagePusher::new());
    let hub = Arc::new(CanvasHub::new(session, message_pusher));
    tracing::info!(
        "Heartbeat: write wait {:?}, pong wait {:?}, ping period {:?}",
        heartbeat.write_wait(),
        heartbeat.pong_wait(),
        heartbeat.ping_period()
    );

    let server = Server::new(hub, &config);
    if let Err(e) = server.run(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
