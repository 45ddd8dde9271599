use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// How to locate elements on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    Css(String),
    XPath(String),
}

impl By {
    pub fn css(selector: impl Into<String>) -> Self {
        By::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        By::XPath(expr.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            By::Css(s) | By::XPath(s) => s,
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            By::Css(s) => write!(f, "css:{s}"),
            By::XPath(s) => write!(f, "xpath:{s}"),
        }
    }
}

/// A located DOM element.
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Visible text of the element.
    async fn text(&self) -> Result<String>;

    /// Raw attribute value, `None` when absent.
    async fn attr(&self, name: &str) -> Result<Option<String>>;

    async fn click(&self) -> Result<()>;
}

/// One browser session, driven sequentially by a single owner.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Element: PageElement;

    /// Navigate to `url` and wait for the document to load.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Run `script` in the page and return its JSON result.
    async fn execute(&self, script: &str) -> Result<Value>;

    /// All elements matching `by`; an empty list is not an error.
    async fn find_all(&self, by: &By) -> Result<Vec<Self::Element>>;

    /// First element matching `by`; fails when there is none.
    async fn find(&self, by: &By) -> Result<Self::Element>;

    /// End the session. Further calls fail.
    async fn quit(&mut self) -> Result<()>;

    /// Current `document.body.scrollHeight`.
    async fn scroll_height(&self) -> Result<u64> {
        let v = self.execute("return document.body.scrollHeight").await?;
        Ok(v.as_f64().map(|h| h.max(0.0) as u64).unwrap_or_default())
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.execute("window.scrollTo(0, document.body.scrollHeight);")
            .await?;
        Ok(())
    }

    /// Visible text of `<body>`.
    async fn body_text(&self) -> Result<String> {
        self.find(&By::css("body")).await?.text().await
    }
}
