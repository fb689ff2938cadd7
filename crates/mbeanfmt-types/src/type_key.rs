//! Runtime type names used to select renderers
//!
//! Type keys follow the management platform's class-naming convention:
//! `java.lang.Integer`, `javax.management.openmbean.CompositeDataSupport`,
//! `[Ljava.lang.String;` for reference arrays and `[I` for primitive arrays.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Prefix marking an array whose elements are references
pub const REFERENCE_ARRAY_PREFIX: &str = "[L";

/// Well-known class names
pub mod class_names {
    pub const VOID: &str = "void";
    pub const DATE: &str = "java.util.Date";
    pub const OBJECT: &str = "java.lang.Object";
    pub const OBJECT_NAME: &str = "javax.management.ObjectName";
    pub const COMPOSITE_DATA: &str = "javax.management.openmbean.CompositeData";
    pub const COMPOSITE_DATA_SUPPORT: &str = "javax.management.openmbean.CompositeDataSupport";
    pub const TABULAR_DATA: &str = "javax.management.openmbean.TabularData";
    pub const TABULAR_DATA_SUPPORT: &str = "javax.management.openmbean.TabularDataSupport";
}

/// Name of a value's runtime type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    /// Create a type key from a class name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this key names an array of references (`[L...;`)
    pub fn is_reference_array(&self) -> bool {
        self.0.starts_with(REFERENCE_ARRAY_PREFIX)
    }

    /// Check if this key names any array type
    pub fn is_array(&self) -> bool {
        self.0.starts_with('[')
    }

    /// Key of a one-dimensional array whose elements have this type
    ///
    /// `java.lang.String` becomes `[Ljava.lang.String;`, while an array key
    /// such as `[I` gains another dimension and becomes `[[I`.
    pub fn array_of(&self) -> Self {
        if self.is_array() {
            Self(format!("[{}", self.0))
        } else {
            Self(format!("{REFERENCE_ARRAY_PREFIX}{};", self.0))
        }
    }

    /// Key of a primitive array given the primitive's one-letter code
    pub fn primitive_array(code: char) -> Self {
        Self(format!("[{code}"))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_array_detection() {
        assert!(TypeKey::from("[Ljava.lang.String;").is_reference_array());
        assert!(!TypeKey::from("[I").is_reference_array());
        assert!(!TypeKey::from("[[Ljava.lang.String;").is_reference_array());
        assert!(!TypeKey::from("java.lang.String").is_reference_array());
    }

    #[test]
    fn test_array_of() {
        let string = TypeKey::from("java.lang.String");
        assert_eq!(string.array_of().as_str(), "[Ljava.lang.String;");
        assert_eq!(string.array_of().array_of().as_str(), "[[Ljava.lang.String;");
        assert_eq!(TypeKey::primitive_array('I').array_of().as_str(), "[[I");
    }
}
