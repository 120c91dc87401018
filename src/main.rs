use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use watchdogs::app::{App, AppEvent};
use watchdogs::config::Config;
use watchdogs::directory::Directory;
use watchdogs::news::{Completion, FeedState, NewsClient, StalePolicy};
use watchdogs::theme::ThemeVariant;
use watchdogs::ui;

/// Get the config directory path (~/.config/watchdogs/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("watchdogs"))
}

#[derive(Parser, Debug)]
#[command(
    name = "watchdogs",
    version,
    about = "Track politicians, legislation and business headlines from the terminal"
)]
struct Args {
    /// Config file (default: ~/.config/watchdogs/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Roster file for politicians and legislation (overrides the config)
    #[arg(long, value_name = "FILE")]
    directory: Option<PathBuf>,

    /// Fetch headlines once, print them, and exit
    #[arg(long)]
    headlines: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stderr so log lines don't land in --headlines output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let settings = config.news.settings();
    if settings.api_key.is_none() {
        tracing::warn!("No news API key configured (set NEWS_API_KEY or [news].api_key)");
    }
    let news_client = NewsClient::new(&settings).context("Failed to create news client")?;
    let policy = config.news.stale_responses;

    if args.headlines {
        return print_headlines(&news_client, policy).await;
    }

    let directory = match args.directory.or(config.directory) {
        Some(path) => Directory::load(&path)
            .with_context(|| format!("Failed to load roster from {}", path.display()))?,
        None => Directory::builtin(),
    };

    let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
        ThemeVariant::Dark
    });

    let mut app = App::new(directory, news_client, policy, theme_variant);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}

/// One fetch through the same feed pipeline the TUI uses, printed as text.
async fn print_headlines(client: &NewsClient, policy: StalePolicy) -> Result<()> {
    let mut feed = FeedState::new(policy);
    let ticket = feed.begin();

    let outcome = client.fetch().await.map_err(|e| {
        eprintln!("Error: {}", e);
        e.kind()
    });

    if let Completion::Applied { count } = feed.complete(ticket, outcome) {
        tracing::debug!(count, "Printing headlines");
    }

    if feed.articles().is_empty() {
        println!("No articles");
        return Ok(());
    }

    for article in feed.articles() {
        println!("{}", watchdogs::util::single_line(&article.title));
        println!(
            "    {}",
            watchdogs::util::single_line(article.description_or_fallback())
        );
    }
    Ok(())
}
