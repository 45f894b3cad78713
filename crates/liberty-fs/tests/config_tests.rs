use liberty_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct Params {
    server_name: String,
    #[serde(default)]
    bootstrap: BTreeMap<String, String>,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("params.toml");
    fs::write(
        &path,
        "server_name = \"defaultServer\"\n[bootstrap]\n\"default.http.port\" = \"9080\"\n",
    )
    .unwrap();

    let params: Params = ConfigStore::new().load(&NormalizedPath::new(&path)).unwrap();
    assert_eq!(params.server_name, "defaultServer");
    assert_eq!(params.bootstrap["default.http.port"], "9080");
}

#[test]
fn test_load_json_and_yaml_agree() {
    let temp = TempDir::new().unwrap();
    let json = temp.path().join("params.json");
    let yaml = temp.path().join("params.yml");
    fs::write(&json, r#"{"server_name": "s1", "bootstrap": {"a": "1"}}"#).unwrap();
    fs::write(&yaml, "server_name: s1\nbootstrap:\n  a: \"1\"\n").unwrap();

    let store = ConfigStore::new();
    let from_json: Params = store.load(&NormalizedPath::new(&json)).unwrap();
    let from_yaml: Params = store.load(&NormalizedPath::new(&yaml)).unwrap();
    assert_eq!(from_json, from_yaml);
}

#[test]
fn test_load_reports_parse_errors_with_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("params.toml");
    fs::write(&path, "server_name = ").unwrap();

    let err = ConfigStore::new()
        .load::<Params>(&NormalizedPath::new(&path))
        .unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "TOML"));
}

#[test]
fn test_load_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("params.ini");
    fs::write(&path, "server_name=s1").unwrap();

    let err = ConfigStore::new()
        .load::<Params>(&NormalizedPath::new(&path))
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}
