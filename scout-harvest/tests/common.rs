#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use scout_common::observability::{init_logging, LogConfig};
use scout_drivers::{BrowserSession, By, PageElement};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "yc-scout-tests",
            log_dir: Some(std::env::temp_dir().join("yc-scout-tests")),
            emit_stderr: true,
            default_filter: "debug",
            ..LogConfig::default()
        };
        init_logging(config).unwrap_or_default()
    });
}

// =========================
// Captured events
// =========================

/// Events recorded on the current thread.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<CapturedEvent>>>);

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
    /// Remaining fields as `name=value`, space separated.
    pub fields: String,
}

impl EventLog {
    pub fn find(&self, level: Level, message: &str) -> Option<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.level == level && e.message == message)
            .cloned()
    }

    pub fn has(&self, level: Level, message: &str) -> bool {
        self.find(level, message).is_some()
    }

    pub fn has_message(&self, message: &str) -> bool {
        self.0.lock().unwrap().iter().any(|e| e.message == message)
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: String,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            if !self.fields.is_empty() {
                self.fields.push(' ');
            }
            self.fields.push_str(&format!("{}={value:?}", field.name()));
        }
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.0.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

/// Record every event emitted on this thread until the guard drops.
/// Pair with the default current-thread `#[tokio::test]` runtime.
pub fn capture_events() -> (EventLog, tracing::subscriber::DefaultGuard) {
    let log = EventLog::default();
    let guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));
    (log, guard)
}

// =========================
// Fake elements
// =========================

#[derive(Clone, Default)]
pub struct FakeElement {
    text: Option<String>,
    href: Option<String>,
    clicks: Arc<AtomicUsize>,
}

impl FakeElement {
    pub fn labelled(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn link(text: &str, href: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            href: Some(href.to_string()),
            ..Default::default()
        }
    }

    /// An element whose text cannot be read (e.g. it went stale).
    pub fn broken() -> Self {
        Self::default()
    }

    pub fn button(clicks: Arc<AtomicUsize>) -> Self {
        Self {
            text: Some("Load More".into()),
            clicks,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn text(&self) -> Result<String> {
        self.text.clone().ok_or_else(|| anyhow!("stale element reference"))
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(match name {
            "href" => self.href.clone(),
            _ => None,
        })
    }

    async fn click(&self) -> Result<()> {
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =========================
// Fake pages and browser
// =========================

#[derive(Clone, Default)]
pub struct FakePage {
    /// Height after 0, 1, 2... scrolls; the last value repeats.
    pub heights: Vec<u64>,
    pub elements: HashMap<String, Vec<FakeElement>>,
    pub body: String,
}

impl FakePage {
    pub fn with(mut self, selector: &str, elements: Vec<FakeElement>) -> Self {
        self.elements.insert(selector.to_string(), elements);
        self
    }

    pub fn heights(mut self, heights: &[u64]) -> Self {
        self.heights = heights.to_vec();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }
}

/// Company cards `"<name>\n<batch>\n<description>"` linking to `/companies/<slug>`.
pub fn cards(count: usize) -> Vec<FakeElement> {
    (1..=count)
        .map(|i| {
            FakeElement::link(
                &format!("Startup {i}\nS21\nBuilding useful thing number {i}"),
                &format!("/companies/startup-{i}"),
            )
        })
        .collect()
}

/// Scripted browser: pages are matched by exact URL first, then by the
/// longest registered prefix.
#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    failing: HashSet<String>,
    current: Option<String>,
    pub visits: Vec<String>,
    scrolls: AtomicUsize,
    pub quit_flag: Arc<AtomicBool>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }

    fn current_page(&self) -> Option<&FakePage> {
        let url = self.current.as_deref()?;
        self.pages.get(url).or_else(|| {
            self.pages
                .iter()
                .filter(|(k, _)| url.starts_with(k.as_str()))
                .max_by_key(|(k, _)| k.len())
                .map(|(_, p)| p)
        })
    }
}

#[async_trait]
impl BrowserSession for FakeBrowser {
    type Element = FakeElement;

    async fn goto(&mut self, url: &str) -> Result<()> {
        if self.quit_flag.load(Ordering::SeqCst) {
            return Err(anyhow!("session closed"));
        }
        self.visits.push(url.to_string());
        if self.failing.contains(url) {
            return Err(anyhow!("navigation to {url} timed out"));
        }
        self.current = Some(url.to_string());
        self.scrolls.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn execute(&self, script: &str) -> Result<Value> {
        if script.contains("scrollTo") {
            self.scrolls.fetch_add(1, Ordering::SeqCst);
            return Ok(Value::Null);
        }
        if script.contains("scrollHeight") {
            let heights = self
                .current_page()
                .map(|p| p.heights.clone())
                .unwrap_or_default();
            let idx = self.scrolls().min(heights.len().saturating_sub(1));
            return Ok(json!(heights.get(idx).copied().unwrap_or(0)));
        }
        Ok(Value::Null)
    }

    async fn find_all(&self, by: &By) -> Result<Vec<FakeElement>> {
        Ok(self
            .current_page()
            .and_then(|p| p.elements.get(by.as_str()).cloned())
            .unwrap_or_default())
    }

    async fn find(&self, by: &By) -> Result<FakeElement> {
        self.find_all(by)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no such element: {by}"))
    }

    async fn quit(&mut self) -> Result<()> {
        self.quit_flag.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn body_text(&self) -> Result<String> {
        Ok(self.current_page().map(|p| p.body.clone()).unwrap_or_default())
    }
}
