//! CLI command definitions for the `playlist` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a verb-noun
//! pattern (e.g., `playlist create song`, `playlist list songs`).

pub mod song;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use playlist_types::song::{MelodyId, SongId};

/// Manage your song catalog.
#[derive(Parser)]
#[command(name = "playlist", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter directives for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,playlist=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new resource.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List resources.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show a song by id, or the song owning a melody.
    Show {
        /// Song id to display.
        #[arg(required_unless_present = "melody", conflicts_with = "melody")]
        id: Option<SongId>,

        /// Look the song up by the id of its melody instead.
        #[arg(long)]
        melody: Option<MelodyId>,
    },

    /// Delete a resource.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a new song with its melody.
    Song(CreateSongArgs),
}

/// Flags for `create song`. Missing values are prompted for interactively.
#[derive(clap::Args)]
pub struct CreateSongArgs {
    /// Read the whole song as JSON from a file instead of flags.
    #[arg(long, conflicts_with_all = [
        "title", "description", "artist", "duration", "category",
        "pitch", "melody_duration", "melody_type",
    ])]
    pub file: Option<PathBuf>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Artist name.
    #[arg(long)]
    pub artist: Option<String>,

    /// Song duration, e.g. "03:56".
    #[arg(long)]
    pub duration: Option<String>,

    /// Category (pop, rock, jazz, classical, rap, electro).
    #[arg(long)]
    pub category: Option<String>,

    /// Melody pitch.
    #[arg(long)]
    pub pitch: Option<String>,

    /// Melody duration.
    #[arg(long)]
    pub melody_duration: Option<String>,

    /// Melody type (color, blends, direction).
    #[arg(long)]
    pub melody_type: Option<String>,
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List songs, optionally filtered.
    Songs {
        /// Only songs of this category.
        #[arg(long, conflicts_with_all = ["artist", "melody_type"])]
        category: Option<String>,

        /// Only songs by this artist.
        #[arg(long, conflicts_with = "melody_type")]
        artist: Option<String>,

        /// Only songs whose melody has this type.
        #[arg(long)]
        melody_type: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete a song and its melody permanently.
    Song {
        /// Song id to delete.
        id: SongId,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
