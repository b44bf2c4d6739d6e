mod auth;
mod logging;
mod matching;
mod spotify;
mod youtube_music;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};

use crate::matching::{MatchResult, NotFoundReason};

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    /// Increase diagnostic output (-v for info, -vv for debug), overridden by `RUST_LOG`
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Finds the YouTube Music song for a Spotify track
    Link {
        /// Spotify app client ID
        #[arg(short = 'I', long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
        client_id: String,

        /// Spotify app client secret
        #[arg(short = 'S', long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,

        /// Spotify track ID, `spotify:track:` URI, or open.spotify.com / api.spotify.com URL
        track: String,
    },

    /// Prints the canonical track ID for a Spotify track reference without connecting anywhere
    Normalize {
        /// Spotify track ID, `spotify:track:` URI, or open.spotify.com / api.spotify.com URL
        track: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // A missing .env file is fine, credentials may come from flags or the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Commands::Link {
            client_id,
            client_secret,
            track,
        } => {
            let credentials = auth::Credentials {
                client_id,
                client_secret,
            };
            let clients = auth::auth(&credentials).await?;
            match clients.get_song(&track).await? {
                MatchResult::Found(url) => println!("{url}"),
                MatchResult::NotFound(NotFoundReason::NoArtistMatch) => {
                    println!("No YouTube Music song found by the track's primary artist.");
                }
                MatchResult::NotFound(NotFoundReason::SearchFailed) => {
                    println!("No YouTube Music song found, the search failed.");
                }
            }
        }
        Commands::Normalize { track } => {
            let track_id =
                spotify::normalize_track_id(&track).context("invalid Spotify track ID")?;
            println!("{track_id}");
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }
    Ok(())
}
