//! Text heuristics applied to rendered pages.
//!
//! Everything here is a pure function over strings so it can be exercised
//! without a browser.
use regex::Regex;
use scout_common::{truncate_chars, DESCRIPTION_LIMIT, UNKNOWN_BATCH};
use std::sync::LazyLock;
use url::Url;

static BATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(W|S|F)\d{2,4}").expect("static batch pattern"));

static NAME_LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("static name pattern"));

/// Lines shorter than this are never used as a description.
const MIN_DESCRIPTION_CHARS: usize = 10;
/// Founder candidates must be shorter than this.
const MAX_FOUNDER_CHARS: usize = 50;
/// Only this much of the page body is scanned for fallback names.
const NAME_SCAN_CHARS: usize = 2000;
pub const FALLBACK_NAME_LIMIT: usize = 2;

/// Fields recovered from one listing card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFields {
    pub name: String,
    pub batch: String,
    pub description: String,
}

/// First batch code in `line`, upper-cased.
pub fn find_batch(line: &str) -> Option<String> {
    BATCH_RE.find(line).map(|m| m.as_str().to_uppercase())
}

/// Split element text into trimmed, non-empty lines.
pub fn visible_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parse the text lines of a listing card.
///
/// The first line is the name; the first line anywhere carrying a batch
/// code gives the batch; the first later line longer than ten characters
/// that carries no batch code is the description.
pub fn parse_listing_lines<S: AsRef<str>>(lines: &[S]) -> ListingFields {
    let name = lines
        .first()
        .map(|l| l.as_ref().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let batch = lines
        .iter()
        .find_map(|l| find_batch(l.as_ref()))
        .unwrap_or_else(|| UNKNOWN_BATCH.to_string());

    let description = lines
        .iter()
        .skip(1)
        .map(AsRef::as_ref)
        .find(|l| l.chars().count() > MIN_DESCRIPTION_CHARS && find_batch(l).is_none())
        .map(|l| truncate_chars(l, DESCRIPTION_LIMIT))
        .unwrap_or_default();

    ListingFields {
        name,
        batch,
        description,
    }
}

/// Parse the raw visible text of a listing card.
pub fn parse_listing_text(text: &str) -> ListingFields {
    parse_listing_lines(&visible_lines(text))
}

/// Resolve a card's link into a company detail URL on `site`.
///
/// Root-relative paths are joined onto the site; absolute links are kept
/// only when they point into the site's `/companies/` section.
pub fn resolve_company_url(site: &Url, href: &str) -> String {
    let href = href.trim();
    if href.starts_with('/') {
        return site.join(href).map(String::from).unwrap_or_default();
    }
    match Url::parse(href) {
        Ok(abs) if abs.host_str() == site.host_str() && abs.path().starts_with("/companies/") => {
            abs.into()
        }
        _ => String::new(),
    }
}

/// Whether text found near a founder marker looks like a person's name.
pub fn is_founder_candidate(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && text.split_whitespace().count() >= 2
        && text.chars().count() < MAX_FOUNDER_CHARS
}

/// Two-capitalised-word sequences in the start of `body`, in page order.
pub fn scan_name_like(body: &str, limit: usize) -> Vec<String> {
    let head = truncate_chars(body, NAME_SCAN_CHARS);
    NAME_LIKE_RE
        .find_iter(&head)
        .take(limit)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Normalise a profile link taken from a search results page.
///
/// Unwraps `/url?q=<target>&...` redirects and drops everything from the
/// first `&` onwards.
pub fn clean_profile_url(href: &str) -> String {
    let href = href.trim();
    let target = match href.find("/url?q=") {
        Some(idx) => &href[idx + "/url?q=".len()..],
        None => href,
    };
    let cut = target.split('&').next().unwrap_or(target);
    if cut.contains("%3A") || cut.contains("%2F") {
        url::form_urlencoded::parse(format!("u={cut}").as_bytes())
            .next()
            .map(|(_, v)| v.into_owned())
            .unwrap_or_else(|| cut.to_string())
    } else {
        cut.to_string()
    }
}
