use clap::Parser;
use scout_config::ScoutConfig;
use std::path::PathBuf;

/// Collect startup records from the YC directory into CSV.
#[derive(Parser, Debug, Default)]
#[command(name = "yc-scout", version)]
#[command(about = "Scrapes the YC startup directory with an API, browser and enrichment fallback chain")]
pub struct Cli {
    /// Config file (YAML, TOML or JSON). Defaults to ./scout.yaml when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of companies to collect
    #[arg(short, long)]
    pub target: Option<usize>,

    /// Run the browser without a window
    #[arg(long, overrides_with = "no_headless")]
    pub headless: bool,

    /// Show the browser window even if the config asks for headless
    #[arg(long, overrides_with = "headless")]
    pub no_headless: bool,

    /// Primary CSV path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Chromedriver endpoint
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Write log files as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Flags given on the command line win over every config source.
    pub fn apply(&self, cfg: &mut ScoutConfig) {
        if let Some(target) = self.target {
            cfg.target = target;
        }
        if self.headless {
            cfg.headless = true;
        } else if self.no_headless {
            cfg.headless = false;
        }
        if let Some(output) = &self.output {
            cfg.output = output.clone();
        }
        if let Some(url) = &self.webdriver_url {
            cfg.webdriver_url = url.clone();
        }
    }
}
