use liberty_fs::{NormalizedPath, ServerFile};
use rstest::rstest;
use tempfile::TempDir;

#[rstest]
#[case("wlp/usr/servers", "wlp/usr/servers")]
#[case("wlp\\usr\\servers", "wlp/usr/servers")]
#[case("wlp/usr\\servers", "wlp/usr/servers")]
fn test_normalizes_separators(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn test_join_with_nested_segment() {
    let server_dir = NormalizedPath::new("target/liberty/wlp/usr/servers/defaultServer");
    let dropin = server_dir.join(ServerFile::VariableDropin.as_str());
    assert_eq!(
        dropin.as_str(),
        "target/liberty/wlp/usr/servers/defaultServer/configDropins/overrides/liberty-plugin-variable-config.xml"
    );
}

#[test]
fn test_join_with_trailing_slash() {
    let base = NormalizedPath::new("servers/");
    assert_eq!(base.join("server.env").as_str(), "servers/server.env");
}

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("servers/defaultServer/jvm.options");
    assert_eq!(path.parent().unwrap().as_str(), "servers/defaultServer");
    assert_eq!(path.file_name(), Some("jvm.options"));
    assert_eq!(path.extension(), Some("options"));
}

#[test]
fn test_canonical_resolves_existing_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("server.xml");
    std::fs::write(&file, "<server/>").unwrap();

    let canonical = NormalizedPath::new(&file).canonical().unwrap();
    let expected = dunce_free_canonical(&file);
    assert_eq!(canonical, expected);
}

#[test]
fn test_canonical_fails_for_missing_file() {
    let path = NormalizedPath::new("/nonexistent/server.xml");
    assert!(path.canonical().is_err());
}

#[rstest]
#[case(ServerFile::ServerXml, "server.xml")]
#[case(ServerFile::JvmOptions, "jvm.options")]
#[case(ServerFile::BootstrapProperties, "bootstrap.properties")]
#[case(ServerFile::ServerEnv, "server.env")]
fn test_conventional_file_names(#[case] file: ServerFile, #[case] name: &str) {
    assert_eq!(file.as_str(), name);
    assert!(ServerFile::CONVENTIONAL.contains(&file));
}

fn dunce_free_canonical(path: &std::path::Path) -> String {
    let canonical = std::fs::canonicalize(path).unwrap();
    let text = canonical.to_string_lossy().into_owned();
    text.strip_prefix(r"\\?\").map(str::to_string).unwrap_or(text)
}
