//! Itineria CLI application
//!
//! `itin` manages trip itineraries, searches places and talks to the travel
//! assistant. See `itin --help` for the command list.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use itineria_core::{Config, params::ListItineraries};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        config,
        no_color,
        command,
    } = Args::parse();

    let config = Config::load(config.as_deref()).context("Failed to load configuration")?;
    let cli = Cli::new(config, database_file, TerminalRenderer::new(!no_color));

    info!("Itineria started");

    match command {
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Item { command }) => cli.handle_item_command(command).await,
        Some(Places { command }) => cli.handle_places_command(command).await,
        Some(Chat { prompt, model }) => cli.handle_chat(prompt, model).await,
        Some(Profile { command }) => cli.handle_profile_command(command).await,
        None => cli.list_trips(&ListItineraries::default()).await,
    }
}
