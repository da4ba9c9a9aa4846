mod api;
mod miniapp;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::defaults::DEFAULT_SERVER_PORT;
use common::{log, logger};
use server_config::{DEFAULT_PUBLIC_DIR, SHUTDOWN_GRACE_PERIOD, default_data_file};
use web_server::{WebServerSettings, run_web_server};

#[derive(Parser)]
#[command(name = "retro_snake_server")]
struct Args {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_SERVER_PORT)]
    port: u16,

    #[arg(long, default_value = DEFAULT_PUBLIC_DIR)]
    public_dir: PathBuf,

    #[arg(long, default_value_t = default_data_file())]
    data_file: String,

    /// Public URL used in the mini-app descriptor; derived from the Host header when unset.
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    log!("Starting Retro Snake server v{}", common::version::VERSION);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log!("Shutdown signal received");
        tokio::time::sleep(SHUTDOWN_GRACE_PERIOD).await;
    };

    let settings = WebServerSettings {
        port: args.port,
        public_dir: args.public_dir,
        data_file: PathBuf::from(args.data_file),
        base_url: args.base_url,
    };
    run_web_server(settings, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
