#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;

use platform_server::AppConfig;
use secrecy::ExposeSecret;

fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn yaml_file_overrides_defaults() {
    let file = yaml_file(
        r#"
server:
  bind: "0.0.0.0:9090"
database:
  url: "sqlite::memory:"
tenant_gate:
  platform_domain: "eat.example"
  dev_hosts: ["dev.local"]
  session:
    secret: "from-file"
revenue_ledger:
  signals:
    window_days: 14
"#,
    );

    let cfg = AppConfig::load(Some(file.path())).unwrap();
    assert_eq!(cfg.server.bind.port(), 9090);
    assert_eq!(cfg.database.url, "sqlite::memory:");
    assert_eq!(cfg.tenant_gate.platform_domain, "eat.example");
    assert_eq!(cfg.tenant_gate.dev_hosts, vec!["dev.local".to_owned()]);
    assert_eq!(cfg.tenant_gate.session.secret.expose_secret(), "from-file");
    assert_eq!(cfg.tenant_gate.session.cookie_name, "session");
    assert_eq!(cfg.revenue_ledger.signals.window_days, 14);
    assert_eq!(cfg.revenue_ledger.signals.inactivity_days, 14);
    assert_eq!(cfg.revenue_ledger.list_limit, 500);
}

#[test]
fn unknown_keys_are_rejected() {
    let file = yaml_file("tenant_gate:\n  platform_domian: \"typo.example\"\n");
    assert!(AppConfig::load(Some(file.path())).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load(Some(&dir.path().join("absent.yaml"))).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn secret_stays_out_of_debug_output() {
    let file = yaml_file("tenant_gate:\n  session:\n    secret: \"hunter2\"\n");
    let cfg = AppConfig::load(Some(file.path())).unwrap();
    assert!(!format!("{cfg:?}").contains("hunter2"));
}
