//! Plugin declarations read from a `pom.xml` build descriptor

use liberty_fs::{NormalizedPath, io};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::node::ConfigNode;
use crate::{Error, Result};

/// Group id assumed for plugins declared without one.
pub const DEFAULT_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";

/// Identity of a build plugin
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
}

impl PluginCoordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// `groupId:artifactId`, the key plugins are looked up by.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        self.group_id == group_id && self.artifact_id == artifact_id
    }
}

impl std::fmt::Display for PluginCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, version),
            None => write!(f, "{}:{}", self.group_id, self.artifact_id),
        }
    }
}

/// One `<execution>` of a declared plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginExecution {
    pub id: Option<String>,
    pub goals: Vec<String>,
    pub configuration: Option<ConfigNode>,
}

/// A plugin as declared in the build descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDeclaration {
    pub coordinate: PluginCoordinate,
    pub configuration: Option<ConfigNode>,
    pub executions: Vec<PluginExecution>,
}

impl PluginDeclaration {
    pub fn new(coordinate: PluginCoordinate) -> Self {
        Self {
            coordinate,
            configuration: None,
            executions: Vec::new(),
        }
    }

    /// Effective configuration for `goal`.
    ///
    /// Starts from the plugin-level configuration and merges, as
    /// dominant, the configuration of every execution bound to the goal.
    pub fn goal_configuration(&self, goal: &str) -> ConfigNode {
        let mut config = self
            .configuration
            .clone()
            .unwrap_or_else(ConfigNode::configuration);
        for execution in &self.executions {
            if !execution.goals.iter().any(|g| g == goal) {
                continue;
            }
            if let Some(execution_config) = &execution.configuration {
                config = ConfigNode::merge(execution_config.clone(), &config);
            }
        }
        config.name = "configuration".to_string();
        config
    }

    /// Merge a managed declaration of the same plugin underneath this one.
    fn inherit(&mut self, managed: &PluginDeclaration) {
        if self.coordinate.version.is_none() {
            self.coordinate.version = managed.coordinate.version.clone();
        }
        self.configuration = match (self.configuration.take(), &managed.configuration) {
            (Some(own), Some(inherited)) => Some(ConfigNode::merge(own, inherited)),
            (own, inherited) => own.or_else(|| inherited.clone()),
        };
        for execution in &managed.executions {
            if !self.executions.iter().any(|e| e.id == execution.id) {
                self.executions.push(execution.clone());
            }
        }
    }
}

/// The plugins declared by the current build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDescriptor {
    plugins: Vec<PluginDeclaration>,
    managed: Vec<PluginDeclaration>,
}

impl BuildDescriptor {
    pub fn new(plugins: Vec<PluginDeclaration>) -> Self {
        Self {
            plugins,
            managed: Vec::new(),
        }
    }

    /// Load and parse a `pom.xml`.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        let descriptor = Self::parse(&content)?;
        tracing::debug!(path = %path, plugins = descriptor.plugins.len(), "Loaded build descriptor");
        Ok(descriptor)
    }

    /// Parse `project/build/plugins` and `project/build/pluginManagement/plugins`.
    pub fn parse(xml: &str) -> Result<Self> {
        let project = parse_tree(xml)?;
        let Some(build) = project.child("build") else {
            return Ok(Self::default());
        };

        let plugins = plugin_nodes(build.child("plugins"))?;
        let managed = plugin_nodes(
            build
                .child("pluginManagement")
                .and_then(|pm| pm.child("plugins")),
        )?;
        Ok(Self { plugins, managed })
    }

    /// Declared plugin with any managed configuration merged underneath.
    ///
    /// Only plugins listed under `build/plugins` count as declared.
    pub fn plugin(&self, group_id: &str, artifact_id: &str) -> Option<PluginDeclaration> {
        let declared = self
            .plugins
            .iter()
            .find(|p| p.coordinate.matches(group_id, artifact_id))?;
        let mut plugin = declared.clone();
        if let Some(managed) = self
            .managed
            .iter()
            .find(|p| p.coordinate.matches(group_id, artifact_id))
        {
            plugin.inherit(managed);
        }
        Some(plugin)
    }

    pub fn plugins(&self) -> &[PluginDeclaration] {
        &self.plugins
    }
}

fn plugin_nodes(plugins: Option<&ConfigNode>) -> Result<Vec<PluginDeclaration>> {
    let Some(plugins) = plugins else {
        return Ok(Vec::new());
    };
    plugins.children_named("plugin").map(declaration).collect()
}

fn declaration(node: &ConfigNode) -> Result<PluginDeclaration> {
    let artifact_id = node
        .child_value("artifactId")
        .ok_or_else(|| Error::DescriptorParse {
            message: "plugin declared without an artifactId".into(),
        })?;
    let group_id = node.child_value("groupId").unwrap_or(DEFAULT_PLUGIN_GROUP_ID);

    let mut coordinate = PluginCoordinate::new(group_id, artifact_id);
    coordinate.version = node.child_value("version").map(str::to_string);

    let executions = node
        .child("executions")
        .map(|executions| {
            executions
                .children_named("execution")
                .map(|execution| PluginExecution {
                    id: execution.child_value("id").map(str::to_string),
                    goals: execution
                        .child("goals")
                        .map(|goals| {
                            goals
                                .children_named("goal")
                                .filter_map(|g| g.value.clone())
                                .collect()
                        })
                        .unwrap_or_default(),
                    configuration: execution.child("configuration").cloned(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(PluginDeclaration {
        coordinate,
        configuration: node.child("configuration").cloned(),
        executions,
    })
}

fn parse_error(error: impl std::fmt::Display) -> Error {
    Error::DescriptorParse {
        message: error.to_string(),
    }
}

fn element(start: &BytesStart<'_>) -> Result<ConfigNode> {
    let mut node = ConfigNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(parse_error)?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(parse_error)?.into_owned();
        node.attributes.push((name, value));
    }
    Ok(node)
}

fn attach(stack: &mut [ConfigNode], root: &mut Option<ConfigNode>, node: ConfigNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn append_text(stack: &mut [ConfigNode], text: &str) {
    if let Some(node) = stack.last_mut() {
        node.value.get_or_insert_with(String::new).push_str(text);
    }
}

/// Read an XML document into a node tree. Comments, declarations and
/// processing instructions are dropped.
fn parse_tree(xml: &str) -> Result<ConfigNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<ConfigNode> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(element(&start)?),
            Ok(Event::Empty(start)) => {
                let node = element(&start)?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(parse_error)?;
                append_text(&mut stack, &text);
            }
            Ok(Event::CData(data)) => {
                let bytes = data.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&bytes));
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::DescriptorParse {
                    message: format!("{e} at position {}", reader.buffer_position()),
                });
            }
        }
    }

    if !stack.is_empty() {
        return Err(Error::DescriptorParse {
            message: "unexpected end of document".into(),
        });
    }
    root.ok_or_else(|| Error::DescriptorParse {
        message: "document has no root element".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <build>
    <pluginManagement>
      <plugins>
        <plugin>
          <groupId>io.openliberty.tools</groupId>
          <artifactId>liberty-maven-plugin</artifactId>
          <version>3.10</version>
          <configuration>
            <serverName>managed</serverName>
            <stripVersion>true</stripVersion>
          </configuration>
        </plugin>
      </plugins>
    </pluginManagement>
    <plugins>
      <plugin>
        <artifactId>maven-war-plugin</artifactId>
      </plugin>
      <plugin>
        <groupId>io.openliberty.tools</groupId>
        <artifactId>liberty-maven-plugin</artifactId>
        <configuration>
          <serverName>guide &amp; demo</serverName>
          <!-- deploy in packaged form -->
          <looseApplication>false</looseApplication>
        </configuration>
        <executions>
          <execution>
            <id>deploy-app</id>
            <goals><goal>deploy</goal></goals>
            <configuration>
              <appsDirectory>apps</appsDirectory>
            </configuration>
          </execution>
        </executions>
      </plugin>
    </plugins>
  </build>
</project>"#;

    #[test]
    fn default_group_id_is_applied() {
        let descriptor = BuildDescriptor::parse(POM).unwrap();
        let war = descriptor
            .plugin(DEFAULT_PLUGIN_GROUP_ID, "maven-war-plugin")
            .unwrap();
        assert_eq!(war.coordinate.to_string(), "org.apache.maven.plugins:maven-war-plugin");
    }

    #[test]
    fn managed_configuration_is_inherited() {
        let descriptor = BuildDescriptor::parse(POM).unwrap();
        let liberty = descriptor
            .plugin("io.openliberty.tools", "liberty-maven-plugin")
            .unwrap();

        assert_eq!(liberty.coordinate.version.as_deref(), Some("3.10"));
        let config = liberty.configuration.unwrap();
        assert_eq!(config.child_value("serverName"), Some("guide & demo"));
        assert_eq!(config.child_value("stripVersion"), Some("true"));
    }

    #[test]
    fn execution_configuration_applies_to_bound_goal_only() {
        let descriptor = BuildDescriptor::parse(POM).unwrap();
        let liberty = descriptor
            .plugin("io.openliberty.tools", "liberty-maven-plugin")
            .unwrap();

        let deploy = liberty.goal_configuration("deploy");
        assert_eq!(deploy.child_value("appsDirectory"), Some("apps"));
        assert_eq!(deploy.child_value("looseApplication"), Some("false"));

        let create = liberty.goal_configuration("create");
        assert_eq!(create.child("appsDirectory"), None);
    }

    #[test]
    fn managed_only_plugin_is_not_declared() {
        let pom = r#"<project><build><pluginManagement><plugins>
            <plugin><artifactId>maven-surefire-plugin</artifactId></plugin>
        </plugins></pluginManagement></build></project>"#;
        let descriptor = BuildDescriptor::parse(pom).unwrap();
        assert!(descriptor
            .plugin(DEFAULT_PLUGIN_GROUP_ID, "maven-surefire-plugin")
            .is_none());
    }

    #[test]
    fn project_without_build_has_no_plugins() {
        let descriptor = BuildDescriptor::parse("<project><modelVersion>4.0.0</modelVersion></project>").unwrap();
        assert!(descriptor.plugins().is_empty());
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = BuildDescriptor::parse("<project><build></project>").unwrap_err();
        assert!(matches!(err, Error::DescriptorParse { .. }));
    }

    #[test]
    fn plugin_without_artifact_id_is_rejected() {
        let pom = "<project><build><plugins><plugin><groupId>g</groupId></plugin></plugins></build></project>";
        assert!(matches!(
            BuildDescriptor::parse(pom).unwrap_err(),
            Error::DescriptorParse { .. }
        ));
    }
}
