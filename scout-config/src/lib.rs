//! Loader for run configuration with file, inline YAML and environment overlays.
//!
//! Every field of [`ScoutConfig`] has a default, so an empty source set
//! yields the shipped behaviour: 500 companies, visible browser, local
//! Chromedriver. Sources are merged in the order they are attached, with the
//! `SCOUT_` environment overlay applied last. String values may reference
//! environment variables as `${VAR}`; expansion runs after merging.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Candidate data endpoints probed in order before falling back to the browser.
pub const DEFAULT_ENDPOINTS: [&str; 4] = [
    "https://api.ycombinator.com/v0.1/companies",
    "https://www.ycombinator.com/graphql",
    "https://api.ycombinator.com/graphql",
    "https://www.ycombinator.com/companies/companies.json",
];

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoutConfig {
    /// Number of records the run aims to collect.
    pub target: usize,
    /// Run the browser without a visible window.
    pub headless: bool,
    pub webdriver_url: String,
    /// Base URL used to resolve root-relative company links.
    pub site_url: String,
    pub listing_url: String,
    pub search_url: String,
    pub endpoints: Vec<String>,
    /// Primary CSV path; the secondary copy is derived from it.
    pub output: PathBuf,
    pub probe_timeout_secs: u64,
    pub api_timeout_secs: u64,
    pub pacing: Pacing,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            target: 500,
            headless: false,
            webdriver_url: "http://localhost:9515".into(),
            site_url: "https://www.ycombinator.com".into(),
            listing_url: "https://www.ycombinator.com/companies".into(),
            search_url: "https://www.google.com/search".into(),
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from("yc_startups.csv"),
            probe_timeout_secs: 10,
            api_timeout_secs: 30,
            pacing: Pacing::default(),
        }
    }
}

impl ScoutConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

/// Fixed pauses between browser actions, in milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Pacing {
    pub page_load_ms: u64,
    pub scroll_settle_ms: u64,
    pub load_more_settle_ms: u64,
    pub detail_settle_ms: u64,
    pub search_settle_ms: u64,
    /// Courtesy delay after each company page visit.
    pub courtesy_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_load_ms: 3000,
            scroll_settle_ms: 2000,
            load_more_settle_ms: 2000,
            detail_settle_ms: 1000,
            search_settle_ms: 1000,
            courtesy_ms: 500,
        }
    }
}

impl Pacing {
    /// No pauses at all; used by tests and dry runs.
    pub fn none() -> Self {
        Self {
            page_load_ms: 0,
            scroll_settle_ms: 0,
            load_more_settle_ms: 0,
            detail_settle_ms: 0,
            search_settle_ms: 0,
            courtesy_ms: 0,
        }
    }

    pub fn page_load(&self) -> Duration {
        Duration::from_millis(self.page_load_ms)
    }
    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
    pub fn load_more_settle(&self) -> Duration {
        Duration::from_millis(self.load_more_settle_ms)
    }
    pub fn detail_settle(&self) -> Duration {
        Duration::from_millis(self.detail_settle_ms)
    }
    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }
    pub fn courtesy(&self) -> Duration {
        Duration::from_millis(self.courtesy_ms)
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (files + env overrides).
pub struct ScoutConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ScoutConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoutConfigLoader {
    /// Start from defaults with no sources attached.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// let config = ScoutConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(config.target, 500);
    /// assert!(!config.headless);
    /// assert_eq!(config.endpoints.len(), 4);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file only if it exists.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// let cfg = ScoutConfigLoader::new()
    ///     .with_yaml_str("target: 25\nheadless: true\npacing:\n  courtesy_ms: 0\n")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.target, 25);
    /// assert!(cfg.headless);
    /// assert_eq!(cfg.pacing.courtesy_ms, 0);
    /// assert_eq!(cfg.pacing.scroll_settle_ms, 2000);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Apply `SCOUT_`-prefixed environment overrides, e.g. `SCOUT_TARGET=50`
    /// or `SCOUT_PACING__COURTESY_MS=0`.
    pub fn with_env(mut self) -> Self {
        self.builder = self.builder.add_source(
            Environment::with_prefix("SCOUT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// unsafe { std::env::set_var("SCOUT_DOC_OUT", "founders.csv"); }
    ///
    /// let config = ScoutConfigLoader::new()
    ///     .with_yaml_str("output: \"${SCOUT_DOC_OUT}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.output.to_str(), Some("founders.csv"));
    ///
    /// unsafe { std::env::remove_var("SCOUT_DOC_OUT"); }
    /// ```
    pub fn load(self) -> Result<ScoutConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        // An empty source set deserializes to null rather than an empty map.
        if v.is_null() {
            v = Value::Object(Default::default());
        }
        expand_env_in_value(&mut v);

        let typed: ScoutConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        if typed.target == 0 {
            return Err(ConfigError::Message("target must be at least 1".into()));
        }
        Ok(typed)
    }
}
