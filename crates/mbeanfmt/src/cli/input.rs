//! Value documents and render settings

use anyhow::{bail, Context, Result};
use mbeanfmt_render::{RenderContext, DATE_FORMAT};
use mbeanfmt_types::JmxValue;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Load a value document from a file, or from stdin for `None` and `-`
pub fn read_document(path: Option<&Path>) -> Result<JmxValue> {
    let content = match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read value document: {}", path.display()))?,
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read value document from stdin")?;
            buffer
        }
    };
    log::debug!("loaded {} bytes of value document", content.len());
    parse_document(&content)
}

/// Parse a JSON value document
pub fn parse_document(content: &str) -> Result<JmxValue> {
    serde_json::from_str(content).context("Invalid value document")
}

/// Parse a `name=value` setting
pub fn parse_setting(setting: &str) -> Result<(String, String)> {
    let Some((name, value)) = setting.split_once('=') else {
        bail!("Invalid setting format: '{}'. Expected 'name=value'", setting);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid setting format: '{}'. Name must not be empty", setting);
    }
    Ok((name.to_string(), value.to_string()))
}

/// Build the render context
///
/// `DATE_FORMAT` is taken from, in increasing precedence: the inherited
/// environment value, a `DATE_FORMAT=` setting, then the date option.
pub fn build_context(
    settings: &[String],
    date_format: Option<&str>,
    inherited_date_format: Option<&str>,
) -> Result<RenderContext> {
    let mut context = RenderContext::new();
    if let Some(pattern) = inherited_date_format {
        context.set(DATE_FORMAT, pattern);
    }
    for setting in settings {
        let (name, value) = parse_setting(setting)?;
        context.set(name, value);
    }
    if let Some(pattern) = date_format {
        context.set(DATE_FORMAT, pattern);
    }
    Ok(context)
}
