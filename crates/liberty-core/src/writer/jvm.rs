use liberty_fs::{GENERATED_HEADER, NormalizedPath, io};

use crate::Result;

/// Render JVM options verbatim, one per line, under the generated header.
pub fn render_jvm_options(options: &[String]) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push('\n');
    for option in options {
        out.push_str(option);
        out.push('\n');
    }
    out
}

/// Render and write `jvm.options`, replacing any existing file.
pub fn write_jvm_options(path: &NormalizedPath, options: &[String]) -> Result<()> {
    io::write_text(path, &render_jvm_options(options))?;
    tracing::debug!(path = %path, options = options.len(), "Wrote jvm.options");
    Ok(())
}
