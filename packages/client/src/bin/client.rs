//! Terminal participant for the Sumi canvas.
//!
//! Joins the canvas as `--user-id`, prints every event the hub sends and turns
//! typed commands into rectangles and text drops.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! Exits with status 1 when every identity color is taken.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sumi-client -- --user-id alice
//! cargo run --bin sumi-client -- -u bob --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use sumi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sumi-client")]
#[command(about = "Terminal participant for a shared real-time canvas", long_about = None)]
struct Args {
    /// Participant id shown to other participants
    #[arg(short = 'u', long)]
    user_id: String,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = sumi_client::run_client(args.url, args.user_id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
