use serde_json::{json, Map, Value};

/// Chrome command-line arguments for a scraping session.
pub fn build_chrome_arguments(headless: bool) -> Vec<String> {
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
    ];
    if headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

/// The `goog:chromeOptions` capability object.
pub fn build_chrome_options(headless: bool) -> Value {
    let mut opts = Map::new();
    opts.insert("args".to_string(), json!(build_chrome_arguments(headless)));
    opts.insert("excludeSwitches".to_string(), json!(["enable-automation"]));
    opts.insert("useAutomationExtension".to_string(), json!(false));
    Value::Object(opts)
}

/// JavaScript evasions applied after each navigation.
pub struct StealthScripts;

impl StealthScripts {
    pub fn get_core_evasions() -> &'static str {
        r#"
            Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
        "#
    }
}
