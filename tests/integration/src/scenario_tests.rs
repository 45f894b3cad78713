//! Acceptance scenarios for a configuration pass and delegated deploy

use liberty_core::{
    BuildDescriptor, ConfigSourceResolver, DelegatedGoalRunner, DiagnosticKind, PropertySources,
    ServerConfigParams,
};
use liberty_test_utils::{RecordingInvoker, TestServer};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

const DROPIN: &str = "configDropins/overrides/liberty-plugin-variable-config.xml";

fn build_properties(pairs: &[(&str, &str)]) -> PropertySources {
    let build = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    PropertySources::new(build, BTreeMap::new())
}

#[test]
fn var_property_becomes_dropin_variable() {
    let server = TestServer::new();

    let report = ConfigSourceResolver::new(server.params())
        .materialize(&build_properties(&[("liberty.var.wlp.debug.remote", "true")]))
        .unwrap();

    let dropin = server.read_server_file(DROPIN);
    assert_eq!(dropin.matches("<variable ").count(), 1);
    assert!(dropin.contains(r#"<variable name="wlp.debug.remote" value="true"/>"#));
    assert!(report.variable_dropin.is_some());
}

#[test]
fn explicit_bootstrap_entry_wins_on_collision() {
    let server = TestServer::new();
    let params = ServerConfigParams {
        bootstrap_properties: Some(BTreeMap::from([("a".to_string(), Some("1".to_string()))])),
        ..server.params()
    };

    ConfigSourceResolver::new(params)
        .materialize(&build_properties(&[
            ("liberty.bootstrap.a", "2"),
            ("liberty.bootstrap.b", "3"),
        ]))
        .unwrap();

    server.assert_server_file(
        "bootstrap.properties",
        "# Generated by liberty-maven-plugin\na=1\nb=3\n",
    );
}

#[test]
fn concrete_variable_shadows_default_with_warning() {
    let server = TestServer::new();

    let report = ConfigSourceResolver::new(server.params())
        .materialize(&build_properties(&[
            ("liberty.var.x", "1"),
            ("liberty.defaultVar.x", "2"),
        ]))
        .unwrap();

    let dropin = server.read_server_file(DROPIN);
    assert!(dropin.contains(r#"<variable name="x" value="1"/>"#));
    assert!(!dropin.contains("defaultValue"));
    let collisions: Vec<_> = report
        .diagnostics
        .of_kind(DiagnosticKind::VariableCollision)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        collisions,
        vec![
            "The variable with name x and defaultValue 2 is skipped since a variable with that name already exists with a value."
        ]
    );
}

#[test]
fn deploy_flips_loose_application_with_warning() {
    let descriptor = BuildDescriptor::parse(
        r#"<project>
  <build>
    <plugins>
      <plugin>
        <groupId>io.openliberty.tools</groupId>
        <artifactId>liberty-maven-plugin</artifactId>
        <version>3.10</version>
        <configuration>
          <looseApplication>false</looseApplication>
        </configuration>
      </plugin>
    </plugins>
  </build>
</project>"#,
    )
    .unwrap();
    let mut runner = DelegatedGoalRunner::new(&descriptor, RecordingInvoker::new());

    let run = runner.run_deploy(true).unwrap();

    assert_eq!(run.configuration.child_value("looseApplication"), Some("true"));
    assert_eq!(
        run.diagnostics
            .of_kind(DiagnosticKind::LooseApplicationForced)
            .count(),
        1
    );
    let invoker = runner.into_invoker();
    assert_eq!(invoker.goals(), vec!["deploy"]);
    assert_eq!(
        invoker.calls()[0].configuration.child_value("looseApplication"),
        Some("true")
    );
}

#[test]
fn jvm_options_keep_classified_before_inline_without_dedup() {
    let server = TestServer::new();
    let params = ServerConfigParams {
        jvm_options: Some(vec!["-Xms256m".into(), "-Xmx512m".into()]),
        ..server.params()
    };

    ConfigSourceResolver::new(params)
        .materialize(&build_properties(&[("liberty.jvm.maxHeap", "-Xmx512m")]))
        .unwrap();

    server.assert_server_file(
        "jvm.options",
        "# Generated by liberty-maven-plugin\n-Xmx512m\n-Xms256m\n-Xmx512m\n",
    );
}
