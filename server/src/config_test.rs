use super::*;

fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.database_url, None);
    assert_eq!(cfg.content_dir, PathBuf::from(DEFAULT_CONTENT_DIR));
    assert_eq!(cfg.site_dir, PathBuf::from(DEFAULT_SITE_DIR));
}

#[test]
fn reads_every_variable() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://blog@localhost/blog"),
        ("CONTENT_DIR", "/srv/content"),
        ("SITE_DIR", "/srv/site"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database_url.as_deref(), Some("postgres://blog@localhost/blog"));
    assert_eq!(cfg.content_dir, PathBuf::from("/srv/content"));
    assert_eq!(cfg.site_dir, PathBuf::from("/srv/site"));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("DATABASE_URL", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.database_url, None);
}

#[test]
fn invalid_port_is_an_error() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".into() });
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}
