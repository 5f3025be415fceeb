use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use match_crawler::application::{render_detail, render_summary};
use match_crawler::domain::constants::SUMMARY_PREVIEW_COUNT;
use match_crawler::infrastructure::{
    BrowserSession, CrawlerConfig, MatchCrawler, RenderedPage, init_logging_with_config,
    json_store, load_config, logging::log_system_info,
};
use match_crawler::{MatchDetail, MatchList};

#[derive(Parser)]
#[command(name = "match-crawler")]
#[command(about = "Crawl football match listings and stream links")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to config/crawler.* when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl the listing page and write the match list
    List {
        /// Output JSON file (overrides output.matches_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,

        /// Also keep the rendered listing HTML
        #[arg(long, value_name = "FILE")]
        save_html: Option<PathBuf>,
    },

    /// Collect stream sources from one match page
    Detail {
        #[arg(value_name = "URL")]
        url: String,

        /// Write the result as JSON instead of only printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        headed: bool,
    },

    /// Extract matches from a saved listing page without a browser
    ParseFile {
        #[arg(value_name = "HTML")]
        html: PathBuf,

        /// URL the page was rendered from, for resolving relative links
        #[arg(long)]
        base_url: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging_with_config(&config.logging)?;
    log_system_info();

    match cli.command {
        Command::List {
            output,
            headed,
            save_html,
        } => {
            let crawler = MatchCrawler::new(with_headed(config.clone(), headed))?;
            let page = render_list_page(crawler.clone()).await?;

            if let Some(path) = save_html {
                json_store::save_snapshot(&path, &page.html).await?;
            }

            let list = crawler.parse_list_snapshot(&page.html, &page.url)?;
            let output = output.unwrap_or(config.output.matches_path);
            finish_list(&list, &output).await?;
        }
        Command::Detail {
            url,
            output,
            headed,
        } => {
            let crawler = MatchCrawler::new(with_headed(config, headed))?;
            let detail = crawl_detail(crawler, url).await?;

            print!("{}", render_detail(&detail));
            if let Some(path) = output {
                json_store::save_detail(&path, &detail).await?;
            }
        }
        Command::ParseFile {
            html,
            base_url,
            output,
        } => {
            let crawler = MatchCrawler::new(config.clone())?;
            let page_url = base_url.unwrap_or_else(|| crawler.list_url().to_string());
            let content = json_store::load_snapshot(&html).await?;

            let list = crawler.parse_list_snapshot(&content, &page_url)?;
            let output = output.unwrap_or(config.output.matches_path);
            finish_list(&list, &output).await?;
        }
        Command::ShowConfig => {
            let rendered = serde_json::to_string_pretty(&config)
                .context("Failed to serialize configuration")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn with_headed(mut config: CrawlerConfig, headed: bool) -> CrawlerConfig {
    if headed {
        config.browser.headless = false;
    }
    config
}

/// Print the summary and write the list; an empty list leaves the file untouched
async fn finish_list(list: &MatchList, output: &Path) -> Result<()> {
    print!("{}", render_summary(list, SUMMARY_PREVIEW_COUNT));

    if list.is_empty() {
        warn!("No matches extracted, not writing {}", output.display());
        return Ok(());
    }

    json_store::save_matches(output, &list.records).await?;
    println!("\n✅ Saved {} matches to {}", list.len(), output.display());
    Ok(())
}

async fn render_list_page(crawler: MatchCrawler) -> Result<RenderedPage> {
    let page = tokio::task::spawn_blocking(move || {
        let session = BrowserSession::launch(crawler.browser_config())?;
        if let Some(version) = session.version() {
            info!("Browser: {}", version);
        }
        crawler.fetch_list_page(&session)
    })
    .await
    .context("Browser task panicked")??;
    Ok(page)
}

async fn crawl_detail(crawler: MatchCrawler, url: String) -> Result<MatchDetail> {
    let detail = tokio::task::spawn_blocking(move || {
        let session = BrowserSession::launch(crawler.browser_config())?;
        crawler.crawl_match_detail(&session, &url)
    })
    .await
    .context("Browser task panicked")??;
    Ok(detail)
}
