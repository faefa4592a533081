use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// AppConfig
// =============================================================================

#[test]
fn app_config_defaults() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(
        cfg,
        AppConfig { database_url: None, port: DEFAULT_PORT, db_max_connections: DEFAULT_DB_MAX_CONNECTIONS, admin: None }
    );
}

#[test]
fn app_config_parses_overrides() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://u:p@db/fansite"),
        ("PORT", "8080"),
        ("DB_MAX_CONNECTIONS", " 12 "),
        ("ADMIN_USERNAME", "root"),
        ("ADMIN_PASSWORD", "toor"),
    ]))
    .unwrap();
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://u:p@db/fansite"));
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.db_max_connections, 12);
    assert_eq!(cfg.admin, Some(Credentials { username: "root".into(), password: "toor".into() }));
}

#[test]
fn app_config_blank_database_url_means_fixtures() {
    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
    assert!(cfg.database_url.is_none());
}

#[test]
fn app_config_rejects_bad_port() {
    let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
}

#[test]
fn app_config_rejects_half_admin() {
    let err = AppConfig::from_lookup(lookup(&[("ADMIN_USERNAME", "root")])).unwrap_err();
    assert!(matches!(err, ConfigError::Incomplete(..)));
}

// =============================================================================
// ClientConfig
// =============================================================================

#[test]
fn client_config_defaults_to_mock_gateway() {
    let cfg = ClientConfig::from_lookup(lookup(&[]));
    assert!(cfg.api_url.is_none());
    assert_eq!(cfg.session_path, PathBuf::from(DEFAULT_SESSION_PATH));
}

#[test]
fn client_config_trims_trailing_slash() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("FANSITE_API_URL", "http://localhost:3000/api/"),
        ("FANSITE_SESSION_PATH", "/tmp/session.json"),
    ]));
    assert_eq!(cfg.api_url.as_deref(), Some("http://localhost:3000/api"));
    assert_eq!(cfg.session_path, PathBuf::from("/tmp/session.json"));
}
