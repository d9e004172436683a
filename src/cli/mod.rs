//! Command-line interface for claimlens.
//!
//! Provides commands for verifying claims, browsing analyzed news,
//! inspecting individual articles, and managing the local check history.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::api::{ApiConfig, FactCheckApi, HttpApiClient};
use crate::config;
use crate::history::{FileStorage, HistoryQuery, HistoryStore, SortOrder};
use crate::render;
use crate::views::{ArticleView, NewsFeed, Phase, Tab, VerifySession};

/// claimlens - fact-checking client for the terminal
#[derive(Parser, Debug)]
#[command(name = "claimlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a claim against the backend
    Verify {
        /// The claim text (reads from stdin if not provided)
        claim: Option<String>,

        /// Language hint (e.g. "en", "ne")
        #[arg(short, long)]
        lang: Option<String>,

        /// Read the claim from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// List recently analyzed news
    News {
        /// Maximum number of articles to fetch
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Which verdict bucket to show
        #[arg(short, long, value_enum, default_value = "latest")]
        tab: NewsTab,
    },

    /// Show the curated homepage buckets
    Home {
        /// Limit output to one bucket
        #[arg(short, long, value_enum)]
        tab: Option<NewsTab>,
    },

    /// Show one news item with its stored analysis
    Show {
        /// News item ID from a listing
        id: String,
    },

    /// Show the analysis of one article
    Article {
        /// Article ID from a news listing
        id: String,

        /// Original article URL (required by the backend)
        #[arg(short, long)]
        url: String,

        /// Article title, if known
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Manage verification history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Check backend availability
    Health,

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List past verifications
    List {
        /// Substring filter over claim text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum, default_value = "newest")]
        sort: HistorySort,

        /// Maximum number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Remove one entry by its ID
    Remove {
        /// Entry ID (shown by `history list`)
        id: i64,
    },

    /// Delete all history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// News bucket for the CLI (maps to Tab)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NewsTab {
    /// Everything fetched
    Latest,

    /// Verified or likely true
    VerifiedTrue,

    /// Debunked
    VerifiedFalse,
}

impl From<NewsTab> for Tab {
    fn from(t: NewsTab) -> Self {
        match t {
            NewsTab::Latest => Tab::Latest,
            NewsTab::VerifiedTrue => Tab::VerifiedTrue,
            NewsTab::VerifiedFalse => Tab::VerifiedFalse,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HistorySort {
    Newest,
    Oldest,
    Confidence,
}

impl From<HistorySort> for SortOrder {
    fn from(s: HistorySort) -> Self {
        match s {
            HistorySort::Newest => SortOrder::Newest,
            HistorySort::Oldest => SortOrder::Oldest,
            HistorySort::Confidence => SortOrder::Confidence,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Verify { claim, lang, stdin } => verify_claim(claim, lang, stdin).await,
            Commands::News { limit, tab } => show_news(limit, tab.into()).await,
            Commands::Home { tab } => show_homepage(tab).await,
            Commands::Show { id } => show_news_detail(&id).await,
            Commands::Article { id, url, title } => show_article(&id, &url, title).await,
            Commands::History { command } => execute_history(command),
            Commands::Health => check_health().await,
            Commands::Config => show_config(),
        }
    }
}

/// Build the HTTP client from resolved configuration
fn api_client() -> Result<HttpApiClient> {
    let cfg = config::config()?;
    let mut api_config = ApiConfig::new(&cfg.api_url).with_timeout(cfg.timeout);
    if let Some(lang) = &cfg.default_lang {
        api_config = api_config.with_default_lang(lang.as_str());
    }
    HttpApiClient::new(api_config).context("Failed to build HTTP client")
}

/// Open the history store backed by the configured state file
fn history_store() -> Result<HistoryStore> {
    let cfg = config::config()?;
    let storage = FileStorage::new(cfg.history_path());
    Ok(HistoryStore::open(Box::new(storage)))
}

/// Verify one claim and print the results panel
async fn verify_claim(claim: Option<String>, lang: Option<String>, use_stdin: bool) -> Result<()> {
    let claim = if let Some(text) = claim {
        text
    } else if use_stdin || atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        anyhow::bail!("No claim provided. Pass it as an argument or pipe to stdin");
    };

    let api = api_client()?;
    let mut history = history_store()?;

    let mut session = VerifySession::new();
    session.set_claim(claim.trim());
    session.submit(&api, &mut history, lang.as_deref()).await;

    if session.phase() == Phase::Idle {
        // Local validation failure, nothing was sent.
        anyhow::bail!("{}", session.error().unwrap_or("Nothing to verify"));
    }

    if let Some(result) = session.result() {
        println!("{}", render::verification_panel(session.claim(), result));
    }

    if session.phase() == Phase::Error {
        if let Some(error) = session.error() {
            eprintln!("[verification failed: {error}]");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Fetch and print the news listing for one tab
async fn show_news(limit: usize, tab: Tab) -> Result<()> {
    let api = api_client()?;

    let mut feed = NewsFeed::new(limit);
    feed.load(&api).await;

    if feed.is_fallback() {
        eprintln!(
            "[backend unreachable, showing sample data: {}]",
            feed.error().unwrap_or("unknown error")
        );
    }

    let articles = feed.tab(tab);
    if articles.is_empty() {
        println!("No articles in this bucket");
        return Ok(());
    }

    for article in articles {
        println!("{}", render::news_line(article));
        if let Some(snippet) = &article.snippet {
            println!("    {}", render::truncate_snippet(snippet));
        }
    }

    Ok(())
}

/// Print the curated homepage buckets
async fn show_homepage(tab: Option<NewsTab>) -> Result<()> {
    let api = api_client()?;
    let home = api.homepage_news().await?;

    let sections: Vec<(&str, &Vec<_>)> = match tab {
        None => vec![
            ("Recent", &home.recent),
            ("Verified True", &home.verified_true),
            ("Debunked", &home.verified_false),
        ],
        Some(NewsTab::Latest) => vec![("Recent", &home.recent)],
        Some(NewsTab::VerifiedTrue) => vec![("Verified True", &home.verified_true)],
        Some(NewsTab::VerifiedFalse) => vec![("Debunked", &home.verified_false)],
    };

    for (heading, articles) in sections {
        println!("{heading}:");
        if articles.is_empty() {
            println!("  (none)");
        }
        for article in articles {
            println!("  {}", render::news_line(article));
        }
        println!();
    }

    Ok(())
}

/// Fetch and print one stored news item
async fn show_news_detail(id: &str) -> Result<()> {
    let api = api_client()?;
    let detail = api.news_detail(id).await?;
    println!("{}", render::news_detail_panel(&detail));
    Ok(())
}

/// Fetch and print one article's analysis
async fn show_article(id: &str, url: &str, title: Option<String>) -> Result<()> {
    let api = api_client()?;

    let mut view = ArticleView::new();
    view.load(&api, id, Some(url), title.as_deref()).await;

    match view.article() {
        Some(detail) => {
            println!("{}", render::article_panel(detail));
            Ok(())
        }
        None => anyhow::bail!("{}", view.error().unwrap_or("Article unavailable")),
    }
}

/// Execute history subcommands
fn execute_history(command: HistoryCommands) -> Result<()> {
    let mut store = history_store()?;

    match command {
        HistoryCommands::List {
            search,
            sort,
            limit,
        } => {
            let mut query = HistoryQuery::default().with_sort(sort.into());
            if let Some(search) = search {
                query = query.with_search(search);
            }

            let entries = store.list(&query);
            if entries.is_empty() {
                println!("No matching history entries");
                return Ok(());
            }

            for entry in entries.iter().take(limit) {
                println!("{}", render::history_line(entry));
            }
            Ok(())
        }
        HistoryCommands::Remove { id } => match store.remove(id)? {
            Some(entry) => {
                println!("Removed: {}", entry.claim);
                Ok(())
            }
            None => anyhow::bail!("No history entry with id {id}"),
        },
        HistoryCommands::Clear { yes } => {
            if store.is_empty() {
                println!("History is already empty");
                return Ok(());
            }

            if !yes && !confirm("Delete all verification history?")? {
                println!("Aborted");
                return Ok(());
            }

            store.clear()?;
            println!("History cleared");
            Ok(())
        }
    }
}

/// Ask a yes/no question on the terminal
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Ping the backend health endpoint
async fn check_health() -> Result<()> {
    let cfg = config::config()?;
    let api = api_client()?;

    match api.health().await {
        Ok(body) => {
            println!("Backend reachable at {}", cfg.api_url);
            if let Some(status) = body.get("status").and_then(|s| s.as_str()) {
                println!("Status: {status}");
            }
            Ok(())
        }
        Err(e) => anyhow::bail!("Backend unreachable at {}: {e}", cfg.api_url),
    }
}

/// Print the resolved configuration
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("API URL:      {}", cfg.api_url);
    println!("Timeout:      {}s", cfg.timeout.as_secs());
    println!(
        "Default lang: {}",
        cfg.default_lang.as_deref().unwrap_or("(none)")
    );
    println!("Home:         {}", cfg.home.display());
    println!("History file: {}", cfg.history_path().display());
    match &cfg.config_file {
        Some(path) => println!("Config file:  {}", path.display()),
        None => println!("Config file:  (none found)"),
    }

    Ok(())
}
