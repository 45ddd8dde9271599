use scout_config::ScoutConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
target: 120
headless: true
endpoints:
  - "https://api.example.org/companies"
output: "out/startups.csv"
pacing:
  scroll_settle_ms: 250
"#;
    let p = write_yaml(&tmp, "scout.yaml", file_yaml);

    let config = ScoutConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.target, 120);
    assert!(config.headless);
    assert_eq!(config.endpoints, vec!["https://api.example.org/companies"]);
    assert_eq!(config.output, PathBuf::from("out/startups.csv"));
    assert_eq!(config.pacing.scroll_settle_ms, 250);
    assert_eq!(config.pacing.page_load_ms, 3000);
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "scout.yaml", "target: 120\nheadless: false\n");

    temp_env::with_vars(
        [
            ("SCOUT_TARGET", Some("7")),
            ("SCOUT_HEADLESS", Some("true")),
            ("SCOUT_PACING__COURTESY_MS", Some("0")),
        ],
        || {
            let config = ScoutConfigLoader::new()
                .with_file(&p)
                .with_env()
                .load()
                .expect("load config");

            assert_eq!(config.target, 7);
            assert!(config.headless);
            assert_eq!(config.pacing.courtesy_ms, 0);
        },
    );
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = ScoutConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults");
    assert_eq!(config.target, 500);
    assert_eq!(config.listing_url, "https://www.ycombinator.com/companies");
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = ScoutConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}
