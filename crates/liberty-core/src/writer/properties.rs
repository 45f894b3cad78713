use liberty_fs::{GENERATED_HEADER, NormalizedPath, ServerFile, io};

use crate::Result;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::merge::PropertyEntries;

/// Render `key=value` lines under the generated header.
///
/// Backslashes in values become forward slashes so Windows paths survive
/// the runtime's properties parser. Keys without a value are written as
/// `key=` and reported.
pub fn render_properties(
    file: ServerFile,
    entries: &PropertyEntries,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut out = String::with_capacity(GENERATED_HEADER.len() + 1 + entries.len() * 32);
    out.push_str(GENERATED_HEADER);
    out.push('\n');

    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        match value {
            Some(value) => out.push_str(&value.replace('\\', "/")),
            None => diagnostics.warn(
                DiagnosticKind::NullValue,
                format!(
                    "The value of the {} property {key} is null. Verify if the needed POM properties are set correctly.",
                    property_label(file)
                ),
            ),
        }
        out.push('\n');
    }

    out
}

/// Render and write a properties artifact, replacing any existing file.
pub fn write_properties(
    path: &NormalizedPath,
    file: ServerFile,
    entries: &PropertyEntries,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let content = render_properties(file, entries, diagnostics);
    io::write_text(path, &content)?;
    tracing::debug!(path = %path, entries = entries.len(), "Wrote {}", file);
    Ok(())
}

fn property_label(file: ServerFile) -> &'static str {
    match file {
        ServerFile::BootstrapProperties => "bootstrap",
        other => other.as_str(),
    }
}
