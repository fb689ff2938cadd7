//! Type-dispatched rendering of management bean values
//!
//! This crate turns a [`JmxValue`] into console text. A [`Registry`] maps
//! runtime type keys to [`Renderer`] variants:
//!
//! - **Default**: canonical string, `null`, or `<empty string>`
//! - **Void**: nothing
//! - **Date**: `DATE_FORMAT` setting or `yyyy-MM-dd'T'HH:mm:ss`
//! - **Composite**, **Tabular**, **Array**: headers plus one line per
//!   element, each element re-resolved by its own type key
//!
//! Keys starting with `[L` always resolve to the array renderer; keys
//! without an entry resolve to the default renderer.
//!
//! # Example
//!
//! ```
//! use mbeanfmt_render::{RenderContext, TypedRenderer};
//! use mbeanfmt_types::{JmxArray, JmxValue};
//!
//! let renderer = TypedRenderer::standard();
//! let value = JmxValue::Array(JmxArray::reference(
//!     "java.lang.Integer",
//!     vec![JmxValue::Integer(10), JmxValue::Integer(20)],
//! ));
//! let text = renderer.render_to_string(&value, &RenderContext::new()).unwrap();
//! assert_eq!(text, "Array[\nindex:0 = 10\nindex:1 = 20\n]\n");
//! ```

pub mod context;
pub mod date_format;
pub mod error;
pub mod registry;
pub mod renderer;
pub mod sink;

pub use context::{RenderContext, DATE_FORMAT};
pub use date_format::{DatePattern, DEFAULT_DATE_PATTERN};
pub use error::{RenderError, RenderResult};
pub use registry::Registry;
pub use renderer::{render_value, Renderer, TypedRenderer, EMPTY_STRING_MARKER};
pub use sink::IoSink;

pub use mbeanfmt_types::JmxValue;
