//! Renderer variants and recursive value rendering
//!
//! Nested values (composite items, tabular rows, array elements) are
//! rendered by re-resolving a renderer on each element's own type key,
//! so heterogeneous containers format every element with its own rule.

use mbeanfmt_types::{class_names, CompositeData, JmxValue};
use std::fmt::Write;
use std::io;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::date_format::{DatePattern, DEFAULT_DATE_PATTERN};
use crate::error::{RenderError, RenderResult};
use crate::registry::Registry;
use crate::sink::IoSink;

/// Marker printed for values whose canonical string is empty
pub const EMPTY_STRING_MARKER: &str = "<empty string>";

/// Formatting strategy for one kind of value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Renderer {
    /// Canonical string form
    #[default]
    Default,
    /// Nothing at all
    Void,
    /// Date pattern from the context, or the ISO-like fallback
    Date,
    /// Header with the type name, then one item value per line
    Composite,
    /// Header with the tabular type, then one numbered row per line
    Tabular,
    /// One `index:i = value` line per element
    Array,
}

impl Renderer {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Void => "void",
            Self::Date => "date",
            Self::Composite => "composite",
            Self::Tabular => "tabular",
            Self::Array => "array",
        }
    }

    /// Append the text form of `value` to `sink`
    ///
    /// Nested elements are resolved through `registry`. Whatever was
    /// appended before a failure stays in the sink.
    pub fn render<W: Write + ?Sized>(
        &self,
        registry: &Registry,
        value: &JmxValue,
        context: &RenderContext,
        sink: &mut W,
    ) -> RenderResult<()> {
        match self {
            Self::Default => render_default(value, sink),
            Self::Void => Ok(()),
            Self::Date => render_date(value, context, sink),
            Self::Composite => match value {
                JmxValue::Composite(data) => render_composite(registry, data, context, sink),
                other => Err(self.mismatch(other)),
            },
            Self::Tabular => match value {
                JmxValue::Tabular(data) => {
                    writeln!(sink, "TabularData: of {}{{", data.tabular_type())?;
                    let row_renderer = registry.resolve(class_names::COMPOSITE_DATA_SUPPORT);
                    for (index, row) in data.rows().iter().enumerate() {
                        write!(sink, "[{}]: ", index)?;
                        if row_renderer == Self::Composite {
                            render_composite(registry, row, context, sink)?;
                        } else {
                            let row = JmxValue::Composite(row.clone());
                            row_renderer.render(registry, &row, context, sink)?;
                        }
                        sink.write_char('\n')?;
                    }
                    sink.write_str("}\n")?;
                    Ok(())
                }
                other => Err(self.mismatch(other)),
            },
            Self::Array => match value {
                JmxValue::Array(array) => {
                    sink.write_str("Array[\n")?;
                    for (index, element) in array.iter().enumerate() {
                        write!(sink, "index:{} = ", index)?;
                        render_value(registry, element, context, sink)?;
                        sink.write_char('\n')?;
                    }
                    sink.write_str("]\n")?;
                    Ok(())
                }
                other => Err(self.mismatch(other)),
            },
        }
    }

    fn mismatch(&self, value: &JmxValue) -> RenderError {
        RenderError::shape_mismatch(self.name(), value.kind_name())
    }
}

/// Resolve a renderer for `value` by its own type key and render it
///
/// Null has no type key and renders as `null` through the default renderer.
pub fn render_value<W: Write + ?Sized>(
    registry: &Registry,
    value: &JmxValue,
    context: &RenderContext,
    sink: &mut W,
) -> RenderResult<()> {
    let renderer = match value.type_key() {
        Some(type_key) => registry.resolve(type_key.as_str()),
        None => Renderer::Default,
    };
    renderer.render(registry, value, context, sink)
}

fn render_default<W: Write + ?Sized>(value: &JmxValue, sink: &mut W) -> RenderResult<()> {
    if value.is_null() {
        sink.write_str("null")?;
        return Ok(());
    }
    let text = value.to_string();
    if text.is_empty() {
        sink.write_str(EMPTY_STRING_MARKER)?;
    } else {
        sink.write_str(&text)?;
    }
    Ok(())
}

fn render_date<W: Write + ?Sized>(
    value: &JmxValue,
    context: &RenderContext,
    sink: &mut W,
) -> RenderResult<()> {
    match value {
        JmxValue::Null => sink.write_str("null")?,
        JmxValue::Date(date) => {
            let pattern = DatePattern::parse(context.date_format().unwrap_or(DEFAULT_DATE_PATTERN))?;
            sink.write_str(&pattern.format(date))?;
        }
        other => return Err(RenderError::shape_mismatch(Renderer::Date.name(), other.kind_name())),
    }
    Ok(())
}

fn render_composite<W: Write + ?Sized>(
    registry: &Registry,
    data: &CompositeData,
    context: &RenderContext,
    sink: &mut W,
) -> RenderResult<()> {
    writeln!(sink, "CompositeData:{}{{", data.composite_type().type_name())?;
    for value in data.values() {
        render_value(registry, value, context, sink)?;
        sink.write_char('\n')?;
    }
    sink.write_str("}\n")?;
    Ok(())
}

/// Renders values using a shared registry
#[derive(Debug, Clone)]
pub struct TypedRenderer {
    registry: Arc<Registry>,
}

impl TypedRenderer {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Create a renderer over [`Registry::standard`]
    pub fn standard() -> Self {
        Self::new(Arc::new(Registry::standard()))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Pick the renderer for a type key
    pub fn resolve(&self, type_key: &str) -> Renderer {
        self.registry.resolve(type_key)
    }

    /// Pick the renderer for a value, `Default` for null
    pub fn resolve_value(&self, value: &JmxValue) -> Renderer {
        value
            .type_key()
            .map_or(Renderer::Default, |key| self.resolve(key.as_str()))
    }

    /// Render `value` into `sink`
    pub fn render_value<W: Write + ?Sized>(
        &self,
        value: &JmxValue,
        context: &RenderContext,
        sink: &mut W,
    ) -> RenderResult<()> {
        render_value(&self.registry, value, context, sink)
    }

    /// Render `value` into a new string
    pub fn render_to_string(&self, value: &JmxValue, context: &RenderContext) -> RenderResult<String> {
        let mut out = String::new();
        self.render_value(value, context, &mut out)?;
        Ok(out)
    }

    /// Render `value` into an I/O writer
    ///
    /// A failing writer surfaces as [`RenderError::Io`] with the writer's
    /// own error.
    pub fn render_io<W: io::Write>(
        &self,
        value: &JmxValue,
        context: &RenderContext,
        writer: W,
    ) -> RenderResult<()> {
        let mut sink = IoSink::new(writer);
        match self.render_value(value, context, &mut sink) {
            Err(RenderError::Sink(err)) => Err(sink
                .take_error()
                .map_or(RenderError::Sink(err), RenderError::Io)),
            other => other,
        }
    }
}

impl Default for TypedRenderer {
    fn default() -> Self {
        Self::standard()
    }
}
