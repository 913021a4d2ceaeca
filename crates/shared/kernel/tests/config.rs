use hrhub_kernel::config::load_config;
use hrhub_kernel::domain::config::ApiConfig;
use serial_test::serial;
use std::io::Write;

#[test]
#[serial]
fn file_values_override_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9090

[documentation]
undocumented_display_limit = 5

[documentation.health]
orphan_penalty = 20
"#
    )
    .unwrap();

    let config: ApiConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.documentation.undocumented_display_limit, 5);
    assert_eq!(config.documentation.health.orphan_penalty, 20);
    assert_eq!(config.documentation.health.orphan_penalty_cap, 50);
    assert_eq!(config.database.url, "mem://");
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let result: Result<ApiConfig, _> = load_config(Some("/nonexistent/hrhub.toml"));
    assert!(result.is_err());
}
