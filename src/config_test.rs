use std::collections::HashMap;

use secrecy::ExposeSecret;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.db.host, "localhost");
    assert_eq!(config.db.port, 3306);
    assert_eq!(config.db.user, "root");
    assert_eq!(config.db.password.expose_secret(), "");
    assert_eq!(config.db.name, "myapp");
    assert_eq!(config.db.max_connections, 5);
    assert_eq!(config.db.acquire_timeout, Duration::from_secs(3));
    assert_eq!(config.static_dir, PathBuf::from("./data"));
    assert_eq!(config.pkg_dir, PathBuf::from("./pkg"));
    assert_eq!(config.update_check_secs, None);
}

#[test]
fn explicit_values_override_defaults() {
    let config = config_from(&[
        ("PORT", "8080"),
        ("DB_HOST", "db.internal"),
        ("DB_USER", "shop"),
        ("DB_PASSWORD", "s3cret"),
        ("DB_NAME", "divine"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("UPDATE_CHECK_SECS", "30"),
        ("STATIC_DIR", "/srv/data"),
    ])
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.db.host, "db.internal");
    assert_eq!(config.db.user, "shop");
    assert_eq!(config.db.password.expose_secret(), "s3cret");
    assert_eq!(config.db.name, "divine");
    assert_eq!(config.db.max_connections, 12);
    assert_eq!(config.update_check_secs, Some(30));
    assert_eq!(config.static_dir, PathBuf::from("/srv/data"));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = config_from(&[("PORT", "  "), ("DB_NAME", "")]).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.db.name, "myapp");
}

#[test]
fn zero_update_interval_disables_the_check() {
    let config = config_from(&[("UPDATE_CHECK_SECS", "0")]).unwrap();
    assert_eq!(config.update_check_secs, None);
}

#[test]
fn unparsable_numbers_are_errors() {
    let err = config_from(&[("PORT", "eighty")]).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { name: "PORT", value: "eighty".into() });

    let err = config_from(&[("DB_MAX_CONNECTIONS", "-1")]).unwrap_err();
    assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
}

#[test]
fn password_is_redacted_in_debug_output() {
    let config = config_from(&[("DB_PASSWORD", "hunter2")]).unwrap();
    assert!(!format!("{config:?}").contains("hunter2"));
}
