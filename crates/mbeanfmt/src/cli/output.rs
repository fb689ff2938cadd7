//! Output utilities

use anyhow::{Context, Result};
use mbeanfmt_render::{RenderContext, TypedRenderer};
use mbeanfmt_types::JmxValue;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("Error: {:#}", error)
}

/// Render a value to a file or stdout
pub fn write_rendered(
    renderer: &TypedRenderer,
    value: &JmxValue,
    context: &RenderContext,
    output_file: Option<&Path>,
) -> Result<()> {
    if let Some(path) = output_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        renderer
            .render_io(value, context, &mut writer)
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        log::info!("output written to {}", path.display());
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        renderer
            .render_io(value, context, &mut writer)
            .context("Failed to write to stdout")?;
        writer.flush().context("Failed to write to stdout")?;
    }
    Ok(())
}
