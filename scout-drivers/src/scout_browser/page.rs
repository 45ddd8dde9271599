use crate::scout_browser::session::{By, PageElement};
use anyhow::Result;
use async_trait::async_trait;
use fantoccini::{elements::Element, Locator};

pub(crate) fn locator(by: &By) -> Locator<'_> {
    match by {
        By::Css(s) => Locator::Css(s),
        By::XPath(s) => Locator::XPath(s),
    }
}

/// Wrapper for WebDriver elements returned by [`crate::ScoutDriver`].
#[derive(Clone)]
pub struct ScoutElement {
    pub element: Element,
}

impl ScoutElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

#[async_trait]
impl PageElement for ScoutElement {
    async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        self.element.attr(name).await.map_err(anyhow::Error::from)
    }

    async fn click(&self) -> Result<()> {
        self.element.click().await.map_err(anyhow::Error::from)
    }
}
