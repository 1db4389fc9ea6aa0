//! Interactive terminal front end: a paged catalog grid, a detail view with
//! the ranked stream list, and play/browser handoff.

use crate::cli::interrupt::{interrupted, interrupts};
use crate::cli::run_extraction;
use crate::config::Config;
use crate::core::{
    poster_url, rank_streams, CatalogClient, CatalogEntry, ExtractionOutcome, ExtractorEngine,
    MovieDetail, Pager, RankedStream,
};
use crate::extractors::default_engine;
use crate::player::{launch_player, open_in_browser, PlayerTarget};
use crate::utils::{render_grid, render_streams, GRID_COLUMNS};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Next,
    Prev,
    /// 1-based grid card or stream row.
    Select(usize),
    /// 1-based stream row, opened in the browser.
    Browser(usize),
    Back,
    Refresh,
    /// Blank line; does nothing.
    Empty,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "n" | "next" => Input::Next,
        "p" | "prev" => Input::Prev,
        "b" | "back" => Input::Back,
        "" => Input::Empty,
        "r" | "refresh" => Input::Refresh,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => {
            if let Ok(n) = line.parse::<usize>() {
                return Input::Select(n);
            }
            if let Some(n) = line.strip_prefix('b').and_then(|r| r.trim().parse::<usize>().ok()) {
                return Input::Browser(n);
            }
            Input::Unknown(line.clone())
        }
    }
}

enum View {
    Browse(Vec<CatalogEntry>),
    Detail {
        detail: MovieDetail,
        streams: Vec<RankedStream>,
    },
}

struct Explorer {
    client: CatalogClient,
    engine: Arc<ExtractorEngine>,
    config: Config,
    pager: Pager,
    view: View,
}

pub async fn run(config: Config) -> Result<()> {
    let mut explorer = Explorer {
        client: CatalogClient::new(config.clone())?,
        engine: Arc::new(default_engine(&config)?),
        config,
        pager: Pager::default(),
        view: View::Browse(Vec::new()),
    };
    explorer.show_browse().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        // Only listen while idle at the prompt, so an extraction in progress
        // gets the interrupt alone.
        let mut rx = interrupts().subscribe();
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = interrupted(&mut rx) => None,
        };
        drop(rx);
        let Some(line) = line else {
            break;
        };
        if !explorer.handle(parse_input(&line)).await {
            break;
        }
    }

    Ok(())
}

impl Explorer {
    /// Returns `false` when the user quits.
    async fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Quit => return false,
            Input::Empty => {}
            Input::Help => print_help(),
            Input::Unknown(text) => println!("Unknown command '{}'. Type h for help.", text),
            input => {
                if matches!(self.view, View::Detail { .. }) {
                    self.handle_detail(input).await
                } else {
                    self.handle_browse(input).await
                }
            }
        }
        true
    }

    async fn handle_browse(&mut self, input: Input) {
        match input {
            Input::Next => {
                self.pager.next();
                self.show_browse().await;
            }
            Input::Prev => {
                if self.pager.prev() {
                    self.show_browse().await;
                } else {
                    println!("Already on the first page.");
                }
            }
            Input::Refresh | Input::Back => self.show_browse().await,
            Input::Select(n) => {
                let id = match &self.view {
                    View::Browse(entries) => entries.get(n.wrapping_sub(1)).map(|e| e.id.clone()),
                    View::Detail { .. } => None,
                };
                match id {
                    Some(id) => self.show_detail(&id).await,
                    None => println!("No title numbered {} on this page.", n),
                }
            }
            _ => println!("Type a number to open a title, n/p to page."),
        }
    }

    async fn handle_detail(&mut self, input: Input) {
        match input {
            Input::Back => self.show_browse().await,
            Input::Select(n) => self.hand_off(n, PlayerTarget::App).await,
            Input::Browser(n) => self.hand_off(n, PlayerTarget::Browser).await,
            Input::Refresh => {
                if let View::Detail { detail, streams } = &self.view {
                    print_detail(&self.config, detail, streams);
                }
            }
            _ => println!("Type a stream number to play, b<N> for the browser, back to return."),
        }
    }

    async fn show_browse(&mut self) {
        println!("Loading trending...");
        match self
            .client
            .fetch_catalog(self.pager.page(), self.config.page_size)
            .await
        {
            Ok(entries) => {
                println!("\n{}", self.pager.label());
                if entries.is_empty() {
                    println!("(no titles)");
                }
                print!("{}", render_grid(&entries, GRID_COLUMNS));
                self.view = View::Browse(entries);
            }
            Err(e) => {
                warn!("Failed to load catalog page {}: {}", self.pager.page(), e);
                println!("Could not load {}: {}", self.pager.label(), e);
            }
        }
    }

    async fn show_detail(&mut self, id: &str) {
        match self.client.fetch_detail(id).await {
            Ok(detail) => {
                let streams = rank_streams(&detail.streams, &self.config.playable_hosts);
                print_detail(&self.config, &detail, &streams);
                self.view = View::Detail { detail, streams };
            }
            Err(e) => {
                warn!("Failed to load details for {}: {}", id, e);
                println!("Could not load details: {}", e);
            }
        }
    }

    async fn hand_off(&self, n: usize, target: PlayerTarget) {
        let View::Detail { streams, .. } = &self.view else {
            return;
        };
        let Some(stream) = streams.get(n.wrapping_sub(1)) else {
            println!("No stream numbered {}.", n);
            return;
        };

        match target {
            PlayerTarget::Browser => {
                if let Err(e) = open_in_browser(&stream.link.url) {
                    println!("Error: {}", e);
                }
            }
            PlayerTarget::App => {
                if !stream.playable {
                    println!("{} cannot be played in app; use b{}.", stream.host, n);
                    return;
                }
                match run_extraction(self.engine.clone(), &stream.link.url).await {
                    ExtractionOutcome::Found(manifest) => {
                        if let Err(e) = launch_player(&self.config.player_command, &manifest) {
                            println!("Player error: {}", e);
                        }
                    }
                    ExtractionOutcome::NotFound => println!("Error: Could not find video stream."),
                    ExtractionOutcome::Dismissed => println!("Cancelled."),
                }
            }
        }
    }
}

fn print_detail(config: &Config, detail: &MovieDetail, streams: &[RankedStream]) {
    println!("\n{}", detail.title);
    if let Some(path) = &detail.poster_path {
        println!("Poster: {}", poster_url(&config.image_base, path));
    }
    println!("AVAILABLE STREAMS");
    if streams.is_empty() {
        println!("(none)");
    }
    print!("{}", render_streams(streams));
}

fn print_help() {
    println!("Browse:  n next page, p previous page, <N> open title, r reload");
    println!("Detail:  <N> play stream in app, b<N> open in browser, back return");
    println!("Any:     h help, q quit");
}
