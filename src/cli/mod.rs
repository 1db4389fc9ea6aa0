pub mod explore;
pub mod interrupt;

use crate::config::Config;
use crate::core::{rank_streams, spawn_extraction, CatalogClient, ExtractionOutcome, Pager};
use crate::extractors::default_engine;
use crate::player::{launch_player, open_in_browser};
use crate::utils::{render_catalog_details, render_grid, render_streams, GRID_COLUMNS};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(name = "movie-explorer")]
#[command(about = "Browse a movie catalog and play its HLS streams")]
#[command(version)]
pub struct Cli {
    /// TOML config file (defaults to $MOVIE_EXPLORER_CONFIG, then built-in values)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Print one catalog page
    Browse {
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Entries per page (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List the streams of a title, playable hosts first
    Streams {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Print the HLS manifest URL behind a landing page
    Extract {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Play a landing page's stream
    Play {
        #[arg(value_name = "URL")]
        url: String,

        /// Open the landing page in the browser instead
        #[arg(short, long)]
        browser: bool,
    },
    /// Interactive paged browser (default)
    Explore,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        debug!("Using config: {:?}", config);

        match self.command.clone().unwrap_or(Command::Explore) {
            Command::Browse { page, limit } => {
                let client = CatalogClient::new(config.clone())?;
                let pager = Pager::new(page);
                let limit = limit.unwrap_or(config.page_size);
                let entries = client.fetch_catalog(pager.page(), limit).await?;

                println!("{}", pager.label());
                if self.verbose {
                    print!("{}", render_catalog_details(&entries, &config.image_base));
                } else {
                    print!("{}", render_grid(&entries, GRID_COLUMNS));
                }
            }
            Command::Streams { id } => {
                let client = CatalogClient::new(config.clone())?;
                let detail = client.fetch_detail(&id).await?;
                let ranked = rank_streams(&detail.streams, &config.playable_hosts);

                println!("{}", detail.title);
                println!("AVAILABLE STREAMS");
                print!("{}", render_streams(&ranked));
                for (i, stream) in ranked.iter().enumerate() {
                    debug!("stream {}: {}", i + 1, stream.link.url);
                }
            }
            Command::Extract { url } => match extract_with_prompt(&config, &url).await? {
                ExtractionOutcome::Found(manifest) => println!("{}", manifest),
                ExtractionOutcome::NotFound => anyhow::bail!("Could not find video stream."),
                ExtractionOutcome::Dismissed => anyhow::bail!("Extraction cancelled"),
            },
            Command::Play { url, browser } => {
                if browser {
                    open_in_browser(&url)?;
                    return Ok(());
                }
                match extract_with_prompt(&config, &url).await? {
                    ExtractionOutcome::Found(manifest) => {
                        launch_player(&config.player_command, &manifest)?;
                    }
                    ExtractionOutcome::NotFound => anyhow::bail!("Could not find video stream."),
                    ExtractionOutcome::Dismissed => println!("Cancelled."),
                }
            }
            Command::Explore => {
                explore::run(config).await?;
            }
        }

        Ok(())
    }
}

/// Runs extraction in the background while a loading prompt is shown on
/// stderr. Ctrl-C dismisses the prompt.
pub async fn extract_with_prompt(config: &Config, landing_url: &str) -> Result<ExtractionOutcome> {
    let engine = Arc::new(default_engine(config)?);
    Ok(run_extraction(engine, landing_url).await)
}

pub(crate) async fn run_extraction(
    engine: Arc<crate::core::ExtractorEngine>,
    landing_url: &str,
) -> ExtractionOutcome {
    eprintln!("Extracting HLS Manifest... (Ctrl-C to cancel)");
    let mut rx = interrupt::interrupts().subscribe();
    let handle = spawn_extraction(engine, landing_url.to_string());
    handle
        .outcome_or_dismiss(async move { interrupt::interrupted(&mut rx).await })
        .await
}
