use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tidalsync::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Without a subcommand a full sync run with the default file names is started.
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with the TIDAL API
    Auth(AuthOptions),

    /// Import both library CSV exports into the TIDAL account
    Sync(SyncOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Where to store the obtained OAuth token
    #[clap(long, default_value = config::DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Path of the TIDAL library export
    #[clap(long, default_value = config::DEFAULT_TIDAL_LIBRARY)]
    pub tidal_csv: PathBuf,

    /// Path of the Spotify library export
    #[clap(long, default_value = config::DEFAULT_SPOTIFY_LIBRARY)]
    pub spotify_csv: PathBuf,

    /// Where to write records that could not be placed
    #[clap(long, default_value = config::DEFAULT_NOT_FOUND_FILE)]
    pub not_found: PathBuf,

    /// Path of the stored OAuth token
    #[clap(long, default_value = config::DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            tidal_csv: config::DEFAULT_TIDAL_LIBRARY.into(),
            spotify_csv: config::DEFAULT_SPOTIFY_LIBRARY.into(),
            not_found: config::DEFAULT_NOT_FOUND_FILE.into(),
            token_file: config::DEFAULT_TOKEN_FILE.into(),
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Auth(opt)) => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result), &opt.token_file).await;
        }
        Some(Command::Sync(opt)) => {
            cli::sync(&opt.tidal_csv, &opt.spotify_csv, &opt.not_found, &opt.token_file).await
        }
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        None => {
            let opt = SyncOptions::default();
            cli::sync(&opt.tidal_csv, &opt.spotify_csv, &opt.not_found, &opt.token_file).await
        }
    }
}
