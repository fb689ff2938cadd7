//! Value model for management bean attributes
//!
//! This crate defines the runtime values a JMX console reads from
//! management beans:
//! - Scalars, dates, void and null (`JmxValue`)
//! - Open data containers: composite records, tabular record sets, arrays
//! - Open type descriptors with canonical string forms
//! - Type keys following the platform's class-naming convention

pub mod error;
pub mod open_type;
pub mod type_key;
pub mod value;

pub use error::{TypeError, TypeResult};
pub use open_type::{CompositeType, CompositeTypeBuilder, ItemType, OpenType, SimpleType, TabularType};
pub use type_key::{class_names, TypeKey, REFERENCE_ARRAY_PREFIX};
pub use value::{ArrayElement, CompositeData, JmxArray, JmxValue, TabularData};
