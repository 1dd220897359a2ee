// crates/chat-client/src/main.rs

mod app;
mod config;
mod network;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::RoomView;
use crate::config::{device_fingerprint, generate_user_id, normalize_room, ClientConfig};
use crate::network::RelayConnection;

#[derive(Parser)]
#[clap(name = "chat-client")]
#[clap(about = "Terminal client for the room relay")]
struct Cli {
    /// Server base URL
    #[clap(short, long)]
    server: Option<String>,

    /// Room code to join (case-insensitive)
    #[clap(short, long)]
    room: Option<String>,

    /// User ID to post as; generated when omitted
    #[clap(short, long)]
    user_id: Option<String>,

    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(room) = cli.room {
        config.room = Some(room);
    }
    if let Some(user_id) = cli.user_id {
        config.user_id = Some(user_id);
    }

    let room = normalize_room(config.room.as_deref().context("no room given (use --room)")?)?;
    let user_id = config.user_id.clone().unwrap_or_else(generate_user_id);

    let conn = RelayConnection::new(&config.server_url);
    let view = RoomView::new(&room, &user_id);

    app::run(conn, &config, view, &device_fingerprint()).await
}
