//! End-to-end flows: parameters loaded from disk, a full configuration
//! pass followed by delegated goals, and repeated runs.

use liberty_core::{
    BuildDescriptor, ConfigNode, ConfigSourceResolver, DelegatedGoalRunner, Error,
    PropertySources, Provenance, ServerConfigParams,
};
use liberty_fs::{NormalizedPath, ServerFile};
use liberty_test_utils::{RecordingInvoker, TestServer};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

const POM: &str = r#"<project>
  <build>
    <plugins>
      <plugin>
        <groupId>io.openliberty.tools</groupId>
        <artifactId>liberty-maven-plugin</artifactId>
        <version>3.10</version>
        <configuration>
          <serverName>defaultServer</serverName>
          <features>
            <acceptLicense>true</acceptLicense>
          </features>
        </configuration>
      </plugin>
    </plugins>
  </build>
</project>"#;

fn full_layout(server: &TestServer) {
    server.write_config_file("server.xml", "<server description=\"app\"/>");
    server.write_config_file("server.env", "LOG_DIR=/var/log\n");
    server.write_config_file("jvm.options", "-Dfrom=dir\n");
    server.write_file("src/main/liberty/bootstrap.properties", "from=file\n");
}

fn sources() -> PropertySources {
    let build = BTreeMap::from([
        ("liberty.var.http.port".to_string(), "9080".to_string()),
        ("liberty.defaultVar.https.port".to_string(), "9443".to_string()),
        ("liberty.jvm.heap".to_string(), "-Xmx1g".to_string()),
        ("project.version".to_string(), "1.0".to_string()),
    ]);
    let system = BTreeMap::from([("liberty.env.WLP_LOGGING".to_string(), "json".to_string())]);
    PropertySources::new(build, system)
}

#[test]
fn params_loaded_from_toml_drive_a_pass() {
    let server = TestServer::new();
    full_layout(&server);
    let params_file = server.write_file(
        "liberty.toml",
        &format!(
            r#"serverDirectory = "{}"
configDirectory = "{}"
bootstrapPropertiesFile = "{}"
"#,
            NormalizedPath::new(server.server_dir()),
            NormalizedPath::new(server.config_dir()),
            NormalizedPath::new(server.root().join("src/main/liberty/bootstrap.properties")),
        ),
    );

    let params = ServerConfigParams::load(&NormalizedPath::new(params_file)).unwrap();
    let report = ConfigSourceResolver::new(params)
        .materialize(&sources())
        .unwrap();

    server.assert_server_file("server.xml", "<server description=\"app\"/>");
    server.assert_server_file("bootstrap.properties", "from=file\n");
    server.assert_server_file(
        "server.env",
        "# Generated by liberty-maven-plugin\nWLP_LOGGING=json\n",
    );
    server.assert_server_file(
        "jvm.options",
        "# Generated by liberty-maven-plugin\n-Xmx1g\n",
    );
    assert_eq!(
        report.provenance(ServerFile::BootstrapProperties),
        Some(&Provenance::File(
            server.canonical("src/main/liberty/bootstrap.properties")
        ))
    );
    assert_eq!(report.provenance(ServerFile::ServerEnv), Some(&Provenance::Inlined));
    assert_eq!(report.diagnostics.warnings().count(), 2);
}

#[test]
fn second_pass_is_byte_identical() {
    let server = TestServer::new();
    full_layout(&server);
    let resolver = ConfigSourceResolver::new(server.params());
    let files = [
        "server.xml",
        "server.env",
        "jvm.options",
        "configDropins/overrides/liberty-plugin-variable-config.xml",
    ];

    resolver.materialize(&sources()).unwrap();
    let first: Vec<String> = files.iter().map(|f| server.read_server_file(f)).collect();
    resolver.materialize(&sources()).unwrap();
    let second: Vec<String> = files.iter().map(|f| server.read_server_file(f)).collect();

    assert_eq!(first, second);
}

#[test]
fn configuration_pass_then_create_and_install_feature() {
    let server = TestServer::new();
    full_layout(&server);
    ConfigSourceResolver::new(server.params())
        .materialize(&sources())
        .unwrap();
    assert!(server.server_file_exists("server.xml"));

    let descriptor = BuildDescriptor::parse(POM).unwrap();
    let mut runner = DelegatedGoalRunner::new(&descriptor, RecordingInvoker::new());
    runner.run_create().unwrap();
    let features = ConfigNode::new("features")
        .with_child(ConfigNode::new("feature").with_value("restfulWS-3.1"));
    runner.run_install_feature(Some(features)).unwrap();

    let invoker = runner.into_invoker();
    assert_eq!(invoker.goals(), vec!["create", "install-feature"]);
    let install = &invoker.calls()[1];
    assert_eq!(install.plugin.to_string(), "io.openliberty.tools:liberty-maven-plugin:3.10");
    let features = install.configuration.child("features").unwrap();
    assert_eq!(features.child_value("feature"), Some("restfulWS-3.1"));
    assert_eq!(features.child_value("acceptLicense"), Some("true"));
}

#[test]
fn failed_goal_stops_the_sequence() {
    let descriptor = BuildDescriptor::parse(POM).unwrap();
    let invoker = RecordingInvoker::new().failing_on("create");
    let mut runner = DelegatedGoalRunner::new(&descriptor, invoker);

    let result = runner.run_create().and_then(|_| runner.run_deploy(true));

    assert!(matches!(result, Err(Error::GoalExecution { ref goal, .. }) if goal == "create"));
    assert_eq!(runner.invoker().goals(), vec!["create"]);
}

#[test]
fn rerun_after_failure_recovers() {
    let server = TestServer::new();
    server.write_file("wlp/usr/servers/defaultServer", "blocking file");
    let resolver = ConfigSourceResolver::new(server.params());

    assert!(resolver.materialize(&sources()).is_err());

    std::fs::remove_file(server.server_dir()).unwrap();
    resolver.materialize(&sources()).unwrap();
    assert!(server.server_file_exists("jvm.options"));
}
