use clipsentry::config::Config;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("clipsentry.toml");
    std::fs::write(
        &path,
        r#"
[watch]
interval_ms = 500

[preview]
max_chars = 4096
max_files = 25

[logging]
level = "debug"
format = "compact"
"#,
    )
    .unwrap();

    let config = Config::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.watch.interval_ms, 500);
    assert_eq!(config.preview.max_chars, 4096);
    assert_eq!(config.preview.max_files, 25);
    assert_eq!(config.logging.format, "compact");

    let limits = config.preview_limits();
    assert_eq!(limits.max_chars, 4096);
    assert_eq!(limits.max_files, 25);
}

#[test]
fn test_load_missing_file_fails() {
    assert!(Config::load("/nonexistent/clipsentry.toml").is_err());
}

#[test]
fn test_load_rejects_invalid_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[preview]\nmax_chars = 0\n").unwrap();
    assert!(Config::load(path.to_str().unwrap()).is_err());
}

#[test]
fn test_load_rejects_malformed_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "[watch\ninterval_ms = ").unwrap();
    assert!(Config::load(path.to_str().unwrap()).is_err());
}
