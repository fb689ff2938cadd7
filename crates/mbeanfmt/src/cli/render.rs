//! Render command implementation

use super::{input, output};
use anyhow::Result;
use mbeanfmt_render::TypedRenderer;
use std::path::PathBuf;

/// Configuration for the render command
pub struct RenderConfig {
    /// Value document, stdin when absent
    pub input: Option<PathBuf>,
    pub date_format: Option<String>,
    /// `DATE_FORMAT` from the process environment, lowest precedence
    pub inherited_date_format: Option<String>,
    /// Extra `name=value` context settings
    pub settings: Vec<String>,
    pub output_file: Option<PathBuf>,
}

/// Load a value document and render it
pub fn render(config: RenderConfig) -> Result<()> {
    let context = input::build_context(
        &config.settings,
        config.date_format.as_deref(),
        config.inherited_date_format.as_deref(),
    )?;
    let value = input::read_document(config.input.as_deref())?;

    let renderer = TypedRenderer::standard();
    log::debug!(
        "rendering {} value with {:?} renderer",
        value.kind_name(),
        renderer.resolve_value(&value)
    );
    output::write_rendered(&renderer, &value, &context, config.output_file.as_deref())
}
