use crate::parse::clean_profile_url;
use crate::pause;
use scout_drivers::{BrowserSession, By, PageElement};
use std::time::Duration;
use url::Url;

pub const PROFILE_LINK_SELECTOR: &str = "a[href*='linkedin.com/in/']";

/// Looks up a founder's professional profile through a web search page.
pub struct ProfileLookup<'a> {
    search_url: &'a str,
    settle: Duration,
}

impl<'a> ProfileLookup<'a> {
    pub fn new(search_url: &'a str, settle: Duration) -> Self {
        Self { search_url, settle }
    }

    /// Search page URL for `"<founder> <company> LinkedIn"`.
    pub fn search_link(&self, founder: &str, company: &str) -> Option<String> {
        let mut url = Url::parse(self.search_url).ok()?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{founder} {company} LinkedIn"));
        Some(url.into())
    }

    /// First profile link on the results page, or `None` on any failure.
    pub async fn find<B: BrowserSession>(
        &self,
        browser: &mut B,
        founder: &str,
        company: &str,
    ) -> Option<String> {
        let Some(link) = self.search_link(founder, company) else {
            tracing::debug!(target: "harvest.profile", search_url = %self.search_url, "profile.search_url.invalid");
            return None;
        };

        if let Err(e) = browser.goto(&link).await {
            tracing::debug!(target: "harvest.profile", %founder, error = %e, "profile.search.failed");
            return None;
        }
        pause(self.settle).await;

        let links = browser
            .find_all(&By::css(PROFILE_LINK_SELECTOR))
            .await
            .ok()?;
        let href = links.first()?.attr("href").await.ok()??;
        let cleaned = clean_profile_url(&href);
        if cleaned.is_empty() {
            return None;
        }
        tracing::debug!(target: "harvest.profile", %founder, url = %cleaned, "profile.found");
        Some(cleaned)
    }
}
