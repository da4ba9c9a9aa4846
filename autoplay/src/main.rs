mod broadcaster;
mod config;
mod runner;

use std::path::PathBuf;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::{log, logger};
use config::{CONFIG_FILE_NAME, get_config_manager};
use runner::{AutoplayRunner, ensure_identity};

#[derive(Parser)]
#[command(name = "retro_snake_autoplay")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Overrides `games` from the config file.
    #[arg(long)]
    games: Option<u32>,

    /// Overrides `server_url` from the config file.
    #[arg(long)]
    server_url: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Autoplay".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);
    let mut config = config_manager.get_config()?;

    if ensure_identity(&mut config, &mut SessionRng::from_random()) {
        match config_manager.set_config(&config) {
            Ok(()) => log!("Saved new player identity to {}", args.config.display()),
            Err(e) => log!("Failed to save player identity: {}", e),
        }
    }

    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(server_url) = args.server_url {
        config.server_url = Some(server_url);
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let mut runner = AutoplayRunner::new(config);
    let reports = runner.run().await;

    let total: u32 = reports.iter().map(|r| r.summary.final_score).sum();
    let new_high_scores = reports
        .iter()
        .filter(|r| r.session_end.as_ref().is_some_and(|s| s.is_new_high_score))
        .count();
    log!(
        "Played {} game(s) as {}: total score {}, {} new high score(s), best known {}",
        reports.len(),
        runner.identity(),
        total,
        new_high_scores,
        runner.best_known_high_score().await
    );

    Ok(())
}
