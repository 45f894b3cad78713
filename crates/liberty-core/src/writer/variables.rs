use std::collections::BTreeMap;

use liberty_fs::{GENERATED_HEADER, NormalizedPath, io};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::Result;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// One `<variable>` element of the dropin document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableEntry {
    pub name: String,
    pub value: String,
    /// Written as `defaultValue` instead of `value`
    pub is_default: bool,
}

/// Resolve concrete and default variables into dropin entries.
///
/// Concrete values come first. A default whose name already has a
/// concrete value is dropped with a warning: the runtime would never use
/// it.
pub fn variable_entries(
    var: &BTreeMap<String, String>,
    default_var: &BTreeMap<String, String>,
    diagnostics: &mut Diagnostics,
) -> Vec<VariableEntry> {
    let mut entries: Vec<VariableEntry> = var
        .iter()
        .map(|(name, value)| VariableEntry {
            name: name.clone(),
            value: value.clone(),
            is_default: false,
        })
        .collect();

    for (name, value) in default_var {
        if var.contains_key(name) {
            diagnostics.warn(
                DiagnosticKind::VariableCollision,
                format!(
                    "The variable with name {name} and defaultValue {value} is skipped since a variable with that name already exists with a value."
                ),
            );
            continue;
        }
        entries.push(VariableEntry {
            name: name.clone(),
            value: value.clone(),
            is_default: true,
        });
    }

    entries
}

/// Render the dropin document for the given entries.
pub fn render_variable_dropin(entries: &[VariableEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("server")))?;
    writer.write_event(Event::Comment(BytesText::new(GENERATED_HEADER)))?;

    for entry in entries {
        let mut element = BytesStart::new("variable");
        element.push_attribute(("name", entry.name.as_str()));
        let attribute = if entry.is_default { "defaultValue" } else { "value" };
        element.push_attribute((attribute, entry.value.as_str()));
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("server")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Resolve, render and write the variable dropin, replacing any existing file.
pub fn write_variable_dropin(
    path: &NormalizedPath,
    var: &BTreeMap<String, String>,
    default_var: &BTreeMap<String, String>,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let entries = variable_entries(var, default_var, diagnostics);
    let content = render_variable_dropin(&entries)?;
    io::write_text(path, &content)?;
    tracing::debug!(path = %path, variables = entries.len(), "Wrote variable dropin");
    Ok(())
}
