//! Extraction from the rendered, infinitely scrolling company listing.
use crate::parse::{parse_listing_text, resolve_company_url};
use crate::pause;
use anyhow::Result;
use scout_common::Record;
use scout_config::Pacing;
use scout_drivers::{BrowserSession, By, PageElement};
use url::Url;

/// Card selectors, most specific first in practice.
pub const SELECTOR_STRATEGIES: [&str; 5] = [
    "a[href*='/companies/']",
    "div[class*='company']",
    "div[class*='Company']",
    "._company_lx2j5_1",
    "._companyContainer_1ogg8_1",
];

/// A strategy must match more than this many elements to count as the listing.
pub const MIN_LISTING_MATCHES: usize = 10;

/// Consecutive scrolls without growth before the listing is considered exhausted.
pub const MAX_STALLED_SCROLLS: usize = 20;

pub const LOAD_MORE_XPATH: &str =
    "//button[contains(text(), 'Load More') or contains(text(), 'Show More')]";

const PROGRESS_EVERY: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingReport {
    pub scrolls: usize,
    pub added: usize,
    /// The loop ended on the stall cap rather than by reaching the target.
    pub stalled: bool,
}

pub struct ListingExtractor<'a> {
    listing_url: &'a str,
    site: &'a Url,
    target: usize,
    pacing: &'a Pacing,
}

impl<'a> ListingExtractor<'a> {
    pub fn new(listing_url: &'a str, site: &'a Url, target: usize, pacing: &'a Pacing) -> Self {
        Self {
            listing_url,
            site,
            target,
            pacing,
        }
    }

    /// Scroll the listing until `records` reaches the target or the page
    /// stops growing, appending newly rendered companies along the way.
    pub async fn run<B: BrowserSession>(
        &self,
        browser: &mut B,
        records: &mut Vec<Record>,
    ) -> Result<ListingReport> {
        tracing::info!(
            target: "harvest.listing",
            url = %self.listing_url,
            have = records.len(),
            target_count = self.target,
            "listing.start"
        );
        let before = records.len();

        browser.goto(self.listing_url).await?;
        pause(self.pacing.page_load()).await;

        let mut report = ListingReport::default();
        let mut last_height = browser.scroll_height().await?;
        let mut stalls = 0usize;

        while records.len() < self.target && stalls < MAX_STALLED_SCROLLS {
            browser.scroll_to_bottom().await?;
            pause(self.pacing.scroll_settle()).await;
            report.scrolls += 1;

            self.extract_visible(browser, records).await;

            let height = browser.scroll_height().await?;
            if height == last_height {
                stalls += 1;
                tracing::info!(
                    target: "harvest.listing",
                    attempt = stalls,
                    max = MAX_STALLED_SCROLLS,
                    "no new content loaded"
                );
                self.click_load_more(browser).await;
            } else {
                stalls = 0;
                last_height = height;
            }

            tracing::info!(target: "harvest.listing", count = records.len(), "listing.progress");
        }

        report.added = records.len() - before;
        report.stalled = stalls >= MAX_STALLED_SCROLLS;
        tracing::info!(
            target: "harvest.listing",
            added = report.added,
            scrolls = report.scrolls,
            stalled = report.stalled,
            "listing.done"
        );
        Ok(report)
    }

    /// Parse cards that appeared since the last pass.
    ///
    /// Cards are matched positionally: the first `records.len()` matches are
    /// assumed to be already collected.
    pub async fn extract_visible<B: BrowserSession>(&self, browser: &B, records: &mut Vec<Record>) {
        let Some(elements) = find_listing_elements(browser).await else {
            return;
        };

        for element in elements.iter().skip(records.len()) {
            if records.len() >= self.target {
                break;
            }
            match self.parse_element(element).await {
                Ok(record) => {
                    records.push(record);
                    if records.len() % PROGRESS_EVERY == 0 {
                        tracing::info!(target: "harvest.listing", count = records.len(), "listing.records");
                    }
                }
                Err(e) => {
                    tracing::debug!(target: "harvest.listing", error = %e, "listing.element.skipped");
                }
            }
        }
    }

    async fn parse_element<E: PageElement>(&self, element: &E) -> Result<Record> {
        let text = element.text().await?;
        let fields = parse_listing_text(&text);

        let company_url = match element.attr("href").await {
            Ok(Some(href)) => resolve_company_url(self.site, &href),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::debug!(target: "harvest.listing", error = %e, "listing.element.href_unreadable");
                String::new()
            }
        };

        Ok(Record::new(fields.name, fields.batch, &fields.description).with_company_url(company_url))
    }

    async fn click_load_more<B: BrowserSession>(&self, browser: &B) {
        let button = match browser.find(&By::xpath(LOAD_MORE_XPATH)).await {
            Ok(button) => button,
            Err(_) => return,
        };
        match button.click().await {
            Ok(()) => {
                tracing::debug!(target: "harvest.listing", "listing.load_more.clicked");
                pause(self.pacing.load_more_settle()).await;
            }
            Err(e) => {
                tracing::debug!(target: "harvest.listing", error = %e, "listing.load_more.failed");
            }
        }
    }
}

/// Elements of the first selector strategy that matches a real listing.
async fn find_listing_elements<B: BrowserSession>(browser: &B) -> Option<Vec<B::Element>> {
    for selector in SELECTOR_STRATEGIES {
        match browser.find_all(&By::css(selector)).await {
            Ok(elements) if elements.len() > MIN_LISTING_MATCHES => {
                tracing::info!(
                    target: "harvest.listing",
                    count = elements.len(),
                    %selector,
                    "listing.selector.matched"
                );
                return Some(elements);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(target: "harvest.listing", %selector, error = %e, "listing.selector.failed");
            }
        }
    }
    None
}
