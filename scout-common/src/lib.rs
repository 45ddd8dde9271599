//! Common types and utilities shared across Scout crates.
//!
//! This crate defines the startup [`Record`], the shared error type, and the
//! observability helpers used throughout the Scout workspace. It is kept
//! lightweight so every crate can depend on it.
//!
//! # Overview
//!
//! - [`Record`]: one startup's extracted fields
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`ScoutError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use scout_common::Record;
//!
//! let record = Record::new("Acme Corp", "S21", "We build widgets for warehouses");
//! assert!(record.founders.is_empty());
//! assert_eq!(record.batch, "S21");
//! ```
pub mod observability;

/// Longest description kept on a [`Record`], in characters.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Most founders recorded for a single company.
pub const MAX_FOUNDERS: usize = 3;

/// Batch value used when no cohort code could be found.
pub const UNKNOWN_BATCH: &str = "Unknown";

/// One startup as extracted from the directory.
///
/// `founders` and `linkedin_urls` are both in discovery order but are not
/// positionally aligned: a profile URL is only appended when a lookup for
/// one of the founders succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub batch: String,
    pub description: String,
    pub founders: Vec<String>,
    pub linkedin_urls: Vec<String>,
    pub company_url: String,
}

impl Record {
    /// Build a record with no founder data and no company URL.
    ///
    /// The description is truncated to [`DESCRIPTION_LIMIT`] characters.
    pub fn new(name: impl Into<String>, batch: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.into(),
            batch: batch.into(),
            description: truncate_chars(description, DESCRIPTION_LIMIT),
            ..Default::default()
        }
    }

    /// Attach the company's detail page URL.
    pub fn with_company_url(mut self, url: impl Into<String>) -> Self {
        self.company_url = url.into();
        self
    }

    pub fn has_founders(&self) -> bool {
        !self.founders.is_empty()
    }

    pub fn has_linkedin(&self) -> bool {
        !self.linkedin_urls.is_empty()
    }

    /// True when the enrichment pass should visit this record.
    pub fn needs_enrichment(&self) -> bool {
        self.founders.is_empty() && !self.company_url.is_empty()
    }

    /// Add a founder name, ignoring exact repeats and anything past
    /// [`MAX_FOUNDERS`]. Returns whether the name was kept.
    pub fn push_founder(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.founders.len() >= MAX_FOUNDERS || self.founders.contains(&name) {
            return false;
        }
        self.founders.push(name);
        true
    }
}

/// Keep at most `limit` characters of `text`, respecting char boundaries.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Error types used across the Scout system.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    /// A network request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response was not JSON or did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The browser driver reported an error (navigation, script, element lookup).
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing the output files failed.
    #[error("Output error: {0}")]
    Output(String),
}

/// Convenient alias for results that use [`ScoutError`].
pub type Result<T> = std::result::Result<T, ScoutError>;
