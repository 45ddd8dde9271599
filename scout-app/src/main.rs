use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use scout_common::observability::{LogConfig, LogFormat, init_logging};
use scout_config::{ScoutConfig, ScoutConfigLoader};
use scout_drivers::ScoutDriver;
use scout_harvest::Harvester;
use scout_http::HttpClient;
mod cli;

const DEFAULT_CONFIG_FILE: &str = "scout.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("Y Combinator Startup Scraper");
    println!("{}", "=".repeat(50));

    // 1) Load config (env wins over file, flags win over both)
    let loader = match &cli.config {
        Some(path) => ScoutConfigLoader::new().with_file(path),
        None => ScoutConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg: ScoutConfig = loader.with_env().load().context("loading configuration")?;
    cli.apply(&mut cfg);

    let log_path = init_logging(LogConfig {
        format: if cli.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;
    tracing::info!(target: "app", log = %log_path.display(), target_count = cfg.target, "yc-scout starting");

    let http = HttpClient::new()?;

    // 2) Browser session; without one the run is API-only
    let browser = match ScoutDriver::connect(&cfg.webdriver_url, cfg.headless).await {
        Ok(driver) => Some(driver),
        Err(e) => {
            tracing::warn!(
                target: "app",
                webdriver_url = %cfg.webdriver_url,
                error = %e,
                "browser session unavailable; continuing with API extraction only"
            );
            None
        }
    };

    let harvester = Harvester::new(cfg, http, browser)?;

    // 3) Run until done or interrupted
    tokio::select! {
        outcome = harvester.run() => {
            print!("{}", outcome.summary());
            match &outcome.output {
                Some(out) => {
                    println!("\nSuccessfully scraped {} YC startups!", out.rows);
                    println!("Files created:");
                    println!("   - {} (main data file)", out.primary.display());
                    println!("   - {} (Google Sheets format)", out.secondary.display());
                }
                None => println!("\nScraping failed. Check the logs above for errors."),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nScraping interrupted by user.");
        }
    }

    Ok(())
}
