use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ItemCommands, PlacesCommands, ProfileCommands, TripCommands};

/// Command-line front-end for the Itineria trip planner
///
/// Itineria keeps trip itineraries and their planned destinations in a local
/// SQLite database, searches a places API for points of interest and photos,
/// and offers a chat assistant for travel questions. A small user profile is
/// stored next to the database.
#[derive(Parser)]
#[command(version, about, name = "itin")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/itineria/itineria.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the JSON configuration file. Defaults to
    /// $XDG_CONFIG_HOME/itineria/config.json when it exists
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Itineria CLI
///
/// - `trip`: itineraries (create, list, show, update, delete, photo)
/// - `item`: planner items within an itinerary
/// - `places`: text search, nearby search and photo download
/// - `chat`: ask the travel assistant
/// - `profile`: the stored user profile
#[derive(Subcommand)]
pub enum Commands {
    /// Manage itineraries
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage planner items within itineraries
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Search for places and fetch place photos
    #[command(alias = "p")]
    Places {
        #[command(subcommand)]
        command: PlacesCommands,
    },
    /// Ask the travel assistant; without a prompt, start a conversation on
    /// stdin
    #[command(alias = "c")]
    Chat {
        /// Question to ask. Words are joined with spaces
        prompt: Vec<String>,
        /// Model to use instead of the configured one
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}
