//! Command-line entry point for reelshelf.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, info};
use reelshelf::commands::{self, EditArgs};
use reelshelf::{LogOutput, init_logging};
use reelshelf_client::HttpMovieApi;
use reelshelf_config::{LayeredConfigOptions, ReelshelfConfig};
use reelshelf_core::id_source_for;
use reelshelf_protocol::{MovieApi, MovieId};
use reelshelf_tui::TuiConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line options.
#[derive(Parser)]
#[command(name = "reelshelf", version, about)]
struct Cli {
    /// Extra reelshelf.json5 layer applied last
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Service base URL, e.g. http://localhost:3000
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Print the collection
    List {
        /// Only show movies whose title or genre contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Print the HTML list fragment instead of text rows
        #[arg(long)]
        html: bool,
    },
    /// Add a movie
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: String,
        #[arg(long, default_value = "")]
        genre: String,
    },
    /// Replace fields of a movie; omitted fields keep their values
    Edit {
        id: MovieId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
    /// Delete a movie
    Rm {
        id: MovieId,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);
    let output = match (&cli.log_file, &command) {
        (Some(path), _) => LogOutput::File(path),
        (None, Command::Tui) => LogOutput::Quiet,
        (None, _) => LogOutput::Stderr,
    };
    init_logging(output)?;
    info!(
        "starting reelshelf (config_set={}, base_url_set={})",
        cli.config.is_some(),
        cli.base_url.is_some()
    );

    let config = load_config(cli.config, cli.base_url)?;
    let api = HttpMovieApi::from_config(&config).context("failed to create movie client")?;
    let ids = id_source_for(config.ids.strategy);

    match command {
        Command::Tui => {
            let tui_config = TuiConfig {
                endpoint: api.collection_url().to_string(),
                tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
            };
            let api: Arc<dyn MovieApi> = Arc::new(api);
            reelshelf_tui::run(api, ids, tui_config).await?;
        }
        Command::List { search, html } => {
            println!("{}", commands::list(&api, &search, html).await?);
        }
        Command::Add { title, year, genre } => {
            let created = commands::add(&api, ids.as_ref(), &title, &year, &genre).await?;
            println!("added {}\t{} ({})", created.id, created.title, created.year);
        }
        Command::Edit {
            id,
            title,
            year,
            genre,
        } => {
            let args = EditArgs { title, year, genre };
            let updated = commands::edit(&api, &id, args).await?;
            println!("updated {}\t{} ({})", updated.id, updated.title, updated.year);
        }
        Command::Rm { id, yes } => {
            commands::remove(&api, &id, yes).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

/// Load the layered config, apply CLI overrides and re-validate.
fn load_config(
    runtime_path: Option<PathBuf>,
    base_url: Option<String>,
) -> anyhow::Result<ReelshelfConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = runtime_path {
        options = options.with_runtime_path(path);
    }
    let layered = ReelshelfConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());

    let mut config = layered.config;
    if let Some(base_url) = base_url {
        config.api.base_url = base_url;
        config.validate().context("invalid --base-url")?;
    }
    Ok(config)
}
