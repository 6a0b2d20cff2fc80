//! Configuration loading from files and the environment

use jeedom_mcp_rust::ServerConfig;
use serial_test::serial;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

const JEEDOM_VARS: [&str; 6] = [
    "JEEDOM_URL",
    "JEEDOM_API_KEY",
    "JEEDOM_TIMEOUT",
    "JEEDOM_REFRESH_INTERVAL",
    "JEEDOM_VERIFY_SSL",
    "JEEDOM_LOG_JSON",
];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    JEEDOM_VARS.iter().map(|name| (*name, None)).collect()
}

#[test]
#[serial]
fn test_env_provides_url_and_key() {
    let mut vars = cleared();
    vars.extend([
        ("JEEDOM_URL", Some("192.168.1.20")),
        ("JEEDOM_API_KEY", Some("abcdef")),
        ("JEEDOM_REFRESH_INTERVAL", Some("30s")),
    ]);

    with_vars(vars, || {
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.jeedom.url.as_str(), "http://192.168.1.20/");
        assert_eq!(config.jeedom.api_key.expose(), "abcdef");
        assert_eq!(config.sync.refresh_interval, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    });
}

#[test]
#[serial]
fn test_invalid_env_duration_is_rejected() {
    let mut vars = cleared();
    vars.push(("JEEDOM_TIMEOUT", Some("soon")));

    with_vars(vars, || {
        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("JEEDOM_TIMEOUT"));
    });
}

#[test]
#[serial]
fn test_file_is_overridden_by_env() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(
        file,
        r#"
[jeedom]
url = "https://jeedom.example.org/"
api_key = "from-file"
timeout = "3s"
verify_ssl = false

[sync]
refresh_interval = "10s"

[logging]
level = "debug"
json_format = true
"#
    )
    .unwrap();

    with_vars(cleared(), || {
        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.jeedom.url.as_str(), "https://jeedom.example.org/");
        assert_eq!(config.jeedom.api_key.expose(), "from-file");
        assert_eq!(config.jeedom.timeout, Duration::from_secs(3));
        assert!(!config.jeedom.verify_ssl);
        assert_eq!(config.sync.refresh_interval, Duration::from_secs(10));
        assert!(config.logging.json_format);
    });

    let mut vars = cleared();
    vars.push(("JEEDOM_API_KEY", Some("from-env")));
    with_vars(vars, || {
        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.jeedom.api_key.expose(), "from-env");
    });
}

#[test]
#[serial]
fn test_debug_output_never_shows_api_key() {
    let mut vars = cleared();
    vars.push(("JEEDOM_API_KEY", Some("very-secret-key")));

    with_vars(vars, || {
        let config = ServerConfig::from_env().unwrap();
        let dump = format!("{config:?}");
        assert!(!dump.contains("very-secret-key"));
    });
}
