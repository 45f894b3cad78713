use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::Result;

const COMBINE_CHILDREN: &str = "combine.children";
const COMBINE_SELF: &str = "combine.self";

/// An element of a plugin `<configuration>` tree.
///
/// Values are kept as raw text; property references such as `${x}` are
/// not interpolated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    pub name: String,
    pub value: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// An empty `<configuration/>` element.
    pub fn configuration() -> Self {
        Self::new("configuration")
    }

    /// Builder: set the text value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut ConfigNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// All direct children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text value of the first child with the given name.
    pub fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.value.as_deref())
    }

    /// Structurally merge `recessive` into `dominant`.
    ///
    /// - the dominant value is kept unless it is empty
    /// - recessive attributes are added where the dominant lacks them
    /// - children are paired by name in document order and merged
    ///   recursively; recessive children with no same-named dominant
    ///   child are appended, surplus ones are dropped
    /// - `combine.self="override"` on the dominant stops the merge and
    ///   `combine.children="append"` appends every recessive child
    pub fn merge(mut dominant: ConfigNode, recessive: &ConfigNode) -> ConfigNode {
        dominant.merge_from(recessive);
        dominant
    }

    fn merge_from(&mut self, recessive: &ConfigNode) {
        if self.attribute(COMBINE_SELF) == Some("override") {
            return;
        }

        if self.value.as_deref().is_none_or(str::is_empty) {
            if let Some(value) = recessive.value.as_deref().filter(|v| !v.is_empty()) {
                self.value = Some(value.to_string());
            }
        }

        for (name, value) in &recessive.attributes {
            if self.attribute(name).is_none() {
                self.attributes.push((name.clone(), value.clone()));
            }
        }

        if self.attribute(COMBINE_CHILDREN) == Some("append") {
            self.children.extend(recessive.children.iter().cloned());
            return;
        }

        // Index of the next unmerged dominant child for each name
        let mut cursors: Vec<(String, usize)> = Vec::new();
        let mut appended = Vec::new();
        for recessive_child in &recessive.children {
            let name = recessive_child.name.as_str();
            if !self.children.iter().any(|c| c.name == name) {
                appended.push(recessive_child.clone());
                continue;
            }

            let skip = match cursors.iter_mut().find(|(n, _)| n == name) {
                Some((_, next)) => {
                    *next += 1;
                    *next - 1
                }
                None => {
                    cursors.push((name.to_string(), 1));
                    0
                }
            };
            if let Some(target) = self.children.iter_mut().filter(|c| c.name == name).nth(skip) {
                target.merge_from(recessive_child);
            }
        }
        self.children.extend(appended);
    }

    /// Render the tree as indented XML, used for debug logging.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.value.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(value) = &self.value {
            writer.write_event(Event::Text(BytesText::new(value)))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

impl std::fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_xml() {
            Ok(xml) => f.write_str(&xml),
            Err(_) => write!(f, "<{}/>", self.name),
        }
    }
}
