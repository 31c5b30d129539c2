#![warn(clippy::pedantic, rust_2018_idioms)]

use anyhow::{Context, Result};
use hockey_features::config::Config;
use hockey_features::database;
use hockey_features::features::FeatureRow;
use std::io::{self, BufWriter, Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!(?config, "starting");

    let seasons = database::load(&config.scores_dir)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for mut season in seasons {
        season
            .get_projections(config.window, config.location, config.result, config.scheme)
            .with_context(|| format!("projections for {}", season.season_id()))?;
        season
            .get_streaks(config.location, config.result)
            .with_context(|| format!("streaks for {}", season.season_id()))?;

        let games = season.all_games(&config.features)?;
        info!(season = season.season_id(), games = games.len(), "writing features");
        for game in games {
            serde_json::to_writer(&mut out, &FeatureRow::from_game(game)?)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
