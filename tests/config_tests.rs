use peekjson::config::Config;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.theme, "default-dark");
    assert_eq!(config.indent_size, 2);
    assert!(config.show_ruler);
    assert!(config.enable_mouse);
    assert_eq!(config.expand_limit, 1000);
    assert_eq!(config.live_update_threshold, 10_000);
}

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
theme = "nord"
indent_size = 4
show_ruler = false
enable_mouse = false
expand_limit = 50
live_update_threshold = 200
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.theme, "nord");
    assert_eq!(config.indent_size, 4);
    assert!(!config.show_ruler);
    assert!(!config.enable_mouse);
    assert_eq!(config.expand_limit, 50);
    assert_eq!(config.live_update_threshold, 200);
}

#[test]
fn test_partial_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "theme = \"dracula\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.theme, "dracula");
    assert_eq!(config.indent_size, 2);
    assert!(config.show_ruler);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "indent_size = 64\nexpand_limit = 0\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.indent_size, 16);
    assert_eq!(config.expand_limit, 1);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "theme = [unclosed").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Config::load_from(&temp_dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/peekjson/config.toml"));
    }
}
