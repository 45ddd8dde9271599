//! Driver layer for browser automation.
//!
//! This crate exposes the browser session abstraction used by the harvest
//! pipeline and its WebDriver-backed implementation.
//!
//! - [`scout_browser::session::BrowserSession`]: navigation, script execution and element lookup
//! - [`scout_browser::session::PageElement`]: text/attribute/click on a located element
//! - [`scout_browser::driver::ScoutDriver`]: fantoccini client wrapper (Chromedriver)
//! - [`scout_browser::stealth`]: Chrome launch arguments and page evasions
pub mod scout_browser;

pub use scout_browser::driver::ScoutDriver;
pub use scout_browser::session::{BrowserSession, By, PageElement};
