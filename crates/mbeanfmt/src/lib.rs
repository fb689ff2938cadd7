//! Text rendering of JMX management bean values
//!
//! This crate bundles the value model and the type-dispatched renderer:
//! - `types`: runtime values, open types and type keys
//! - `render`: renderer registry, render context and date patterns
//!
//! # Example
//!
//! ```
//! use mbeanfmt::{RenderContext, TypedRenderer};
//! use mbeanfmt::types::{CompositeData, CompositeType, JmxValue, OpenType, SimpleType};
//!
//! let point = CompositeType::builder("Point")
//!     .item("x", OpenType::simple(SimpleType::Integer))
//!     .item("y", OpenType::simple(SimpleType::Integer))
//!     .build()?;
//! let value = JmxValue::Composite(CompositeData::new(
//!     point,
//!     [("x", JmxValue::Integer(1)), ("y", JmxValue::Integer(2))],
//! )?);
//!
//! let text = TypedRenderer::standard().render_to_string(&value, &RenderContext::new())?;
//! assert_eq!(text, "CompositeData:Point{\n1\n2\n}\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all public APIs from internal crates
pub use mbeanfmt_render as render;
pub use mbeanfmt_types as types;

// Convenience re-exports
pub use mbeanfmt_render::{RenderContext, RenderError, RenderResult, Registry, Renderer, TypedRenderer};
pub use mbeanfmt_types::{JmxValue, TypeKey};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
