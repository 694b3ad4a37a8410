mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod widgets;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use labsite_core::config::Config;
use labsite_core::platform;
use labsite_core::site::SiteSource;
use labsite_core::store::MediaPage;
use labsite_core::{MediaController, SortMode};

use app::{App, PartialsJob};
use app_state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "labsite",
    version,
    about = "Browse a lab website's media page: filter, search, sort and page through it"
)]
struct Args {
    /// Media page to load (path or http(s) URL). Defaults to `site.source` from the config.
    source: Option<String>,

    /// Config file to use instead of the default one.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip loading the overlay partials.
    #[arg(long)]
    no_partials: bool,

    /// Print the resulting view as JSON and exit instead of starting the UI.
    #[arg(long)]
    print: bool,

    /// Chip to select (e.g. `news`, `youtube`).
    #[arg(long)]
    filter: Option<String>,

    /// Search text.
    #[arg(long)]
    query: Option<String>,

    /// Sort mode: date_desc, date_asc or title_asc.
    #[arg(long)]
    sort: Option<SortMode>,

    /// Page to open (1-based).
    #[arg(long)]
    page: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // ── Logging ──────────────────────────────────────────────────────────────
    // The UI owns the terminal, so logs go to a file; `--print` keeps stderr.
    let log_path = (!args.print).then(platform::log_path);
    if args.print {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
            .init();
    } else if let Some(log_path) = &log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "debug,hyper_util=warn,reqwest=warn,hyper=warn,html5ever=warn".to_string()
        });
        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_env_filter(log_filter.as_str())
            .with_ansi(false)
            .init();
        eprintln!("labsite log: {}", log_path.display());
    }

    tracing::info!("labsite starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };

    // ── Load the media page ──────────────────────────────────────────────────
    let raw_source = args.source.as_deref().unwrap_or(&config.site.source);
    let source = SiteSource::parse(raw_source)?;
    let client = config.http.client()?;
    let html = source
        .fetch(&client)
        .await
        .with_context(|| format!("failed to load media page {}", source))?;
    let page = MediaPage::parse(&html)?;
    tracing::info!(
        "[media] {} card(s), {} chip(s), search={}, sort options={}, pager={}",
        page.store.len(),
        page.controls.filters.len(),
        page.controls.search,
        page.controls.sort_modes.len(),
        page.controls.pagination
    );

    let mut media = MediaController::new(
        page.store,
        page.controls,
        config.media.controller_options(),
    );

    // ── Initial selection from the command line ──────────────────────────────
    if let Some(filter) = &args.filter {
        if !media.select_filter(filter) {
            tracing::warn!("no `{}` chip on this page, keeping `all`", filter);
        }
    }
    if let Some(query) = &args.query {
        if !media.search(query) {
            tracing::warn!("page has no search box, ignoring --query");
        }
    }
    if let Some(mode) = args.sort {
        if !media.sort(mode) {
            tracing::warn!("page does not offer sort `{}`", mode);
        }
    }
    if let Some(n) = args.page {
        if !media.goto_page(n) {
            tracing::warn!("page is not paginated, ignoring --page");
        }
    }

    if args.print {
        println!("{}", serde_json::to_string_pretty(&media.snapshot())?);
        return Ok(());
    }

    let partials = (config.site.load_partials && !args.no_partials).then(|| PartialsJob {
        client,
        page: source.clone(),
        files: config.site.partials.clone(),
    });

    let state = AppState::new(media, page.title, source.to_string());
    App::new(state, partials, log_path).run().await
}
