use crate::scout_browser::{
    page::{locator, ScoutElement},
    session::{BrowserSession, By},
    stealth::{build_chrome_options, StealthScripts},
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use serde_json::Value;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct ScoutDriver {
    pub client: Client,
    closed: bool,
}

impl ScoutDriver {
    /// Create a new session on a running WebDriver service such as
    /// Chromedriver at `http://localhost:9515`.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let mut caps = Capabilities::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            build_chrome_options(headless),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await
            .map_err(|e| anyhow!("webdriver session at {webdriver_url} failed: {e}"))?;

        tracing::info!(target: "browser.driver", %webdriver_url, headless, "browser.session.started");

        Ok(Self {
            client,
            closed: false,
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(anyhow!("browser session already closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ScoutDriver {
    type Element = ScoutElement;

    async fn goto(&mut self, url: &str) -> Result<()> {
        self.ensure_open()?;
        self.client.goto(url).await?;
        // Some pages reject script execution before they settle; navigation still counts.
        if let Err(e) = self
            .client
            .execute(StealthScripts::get_core_evasions(), vec![])
            .await
        {
            tracing::debug!(target: "browser.driver", %url, error=%e, "browser.evasions.failed");
        }
        Ok(())
    }

    async fn execute(&self, script: &str) -> Result<Value> {
        self.ensure_open()?;
        Ok(self.client.execute(script, vec![]).await?)
    }

    async fn find_all(&self, by: &By) -> Result<Vec<ScoutElement>> {
        self.ensure_open()?;
        let elements = self.client.find_all(locator(by)).await?;
        Ok(elements.into_iter().map(ScoutElement::new).collect())
    }

    async fn find(&self, by: &By) -> Result<ScoutElement> {
        self.ensure_open()?;
        let element = self.client.find(locator(by)).await?;
        Ok(ScoutElement::new(element))
    }

    async fn quit(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.client.clone().close().await?;
        tracing::info!(target: "browser.driver", "browser.session.closed");
        Ok(())
    }
}
