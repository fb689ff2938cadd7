//! Errors raised while building open types and open data

use thiserror::Error;

/// Result type for model construction
pub type TypeResult<T> = Result<T, TypeError>;

/// Errors that can occur while constructing types or values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Open type declared without a name
    #[error("Type name must not be blank")]
    BlankTypeName,

    /// Composite type declared without items
    #[error("Composite type {type_name} declares no items")]
    NoItems { type_name: String },

    /// Tabular type declared without index names
    #[error("Tabular type {type_name} declares no index names")]
    NoIndexNames { type_name: String },

    /// Index name that is not an item of the row type
    #[error("Index name '{index}' is not an item of the row type of {type_name}")]
    UnknownIndexName { type_name: String, index: String },

    /// Value supplied for an item the composite type does not declare
    #[error("Item '{item}' is not declared by composite type {type_name}")]
    UnknownItem { type_name: String, item: String },

    /// Declared item with no supplied value
    #[error("Missing value for item '{item}' of composite type {type_name}")]
    MissingItem { type_name: String, item: String },

    /// Item value that does not conform to its declared open type
    #[error("Item '{item}' of {type_name} expects {expected}, found {found}")]
    ItemTypeMismatch {
        type_name: String,
        item: String,
        expected: String,
        found: String,
    },

    /// Row whose composite type differs from the tabular row type
    #[error("Row type mismatch: expected {expected}, found {found}")]
    RowTypeMismatch { expected: String, found: String },

    /// Row whose index values are already present
    #[error("Duplicate index {index} in tabular data {type_name}")]
    DuplicateRowIndex { type_name: String, index: String },

    /// Array type with no dimensions
    #[error("Array type over {element} must have at least one dimension")]
    ZeroArrayDimension { element: String },

    /// Primitive array declared over a non-primitive element type
    #[error("{type_name} cannot be the element type of a primitive array")]
    NotPrimitive { type_name: String },

    /// Primitive array element that is null or of another kind
    #[error("Element {index} of primitive {expected} array has kind {found}")]
    PrimitiveElement {
        index: usize,
        expected: String,
        found: String,
    },
}

impl TypeError {
    /// Create an item type mismatch error
    pub fn item_type_mismatch(
        type_name: impl Into<String>,
        item: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ItemTypeMismatch {
            type_name: type_name.into(),
            item: item.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}
