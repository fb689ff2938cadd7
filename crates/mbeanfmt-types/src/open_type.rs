//! Open type descriptors
//!
//! Open types describe the shape of composite records, tabular record sets
//! and arrays. Each descriptor has a canonical string form which renderers
//! use as the type description in headers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TypeError, TypeResult};
use crate::type_key::{class_names, TypeKey};
use crate::value::JmxValue;

/// Scalar open types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimpleType {
    Void,
    Boolean,
    Character,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigDecimal,
    String,
    Date,
    ObjectName,
}

impl SimpleType {
    /// Fully qualified class name of the boxed type
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Void => "java.lang.Void",
            Self::Boolean => "java.lang.Boolean",
            Self::Character => "java.lang.Character",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Integer => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
            Self::BigDecimal => "java.math.BigDecimal",
            Self::String => "java.lang.String",
            Self::Date => class_names::DATE,
            Self::ObjectName => class_names::OBJECT_NAME,
        }
    }

    /// One-letter code used in primitive array type names
    pub const fn primitive_code(&self) -> Option<char> {
        match self {
            Self::Boolean => Some('Z'),
            Self::Character => Some('C'),
            Self::Byte => Some('B'),
            Self::Short => Some('S'),
            Self::Integer => Some('I'),
            Self::Long => Some('J'),
            Self::Float => Some('F'),
            Self::Double => Some('D'),
            _ => None,
        }
    }

    /// Check if this type has a primitive counterpart
    pub const fn is_primitive(&self) -> bool {
        self.primitive_code().is_some()
    }

    /// Check if this type is numeric
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::BigDecimal
        )
    }
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Descriptor of any open data shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", try_from = "OpenTypeRepr")]
pub enum OpenType {
    Simple {
        simple: SimpleType,
    },
    Composite {
        composite: Box<CompositeType>,
    },
    Tabular {
        tabular: Box<TabularType>,
    },
    /// `primitive` arrays hold unboxed scalars (`[J` rather than
    /// `[Ljava.lang.Long;`) and require a primitive simple element
    Array {
        dimension: u8,
        element: Box<OpenType>,
        primitive: bool,
    },
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum OpenTypeRepr {
    Simple {
        simple: SimpleType,
    },
    Composite {
        composite: Box<CompositeType>,
    },
    Tabular {
        tabular: Box<TabularType>,
    },
    Array {
        dimension: u8,
        element: Box<OpenType>,
        #[serde(default)]
        primitive: bool,
    },
}

impl TryFrom<OpenTypeRepr> for OpenType {
    type Error = TypeError;

    fn try_from(repr: OpenTypeRepr) -> TypeResult<Self> {
        match repr {
            OpenTypeRepr::Simple { simple } => Ok(Self::Simple { simple }),
            OpenTypeRepr::Composite { composite } => Ok(Self::Composite { composite }),
            OpenTypeRepr::Tabular { tabular } => Ok(Self::Tabular { tabular }),
            OpenTypeRepr::Array {
                dimension,
                element,
                primitive,
            } => Self::array(dimension, *element, primitive),
        }
    }
}

impl OpenType {
    /// Create a simple open type
    pub fn simple(simple: SimpleType) -> Self {
        Self::Simple { simple }
    }

    /// Create a composite open type
    pub fn composite(composite: CompositeType) -> Self {
        Self::Composite {
            composite: Box::new(composite),
        }
    }

    /// Create a tabular open type
    pub fn tabular(tabular: TabularType) -> Self {
        Self::Tabular {
            tabular: Box::new(tabular),
        }
    }

    /// Create a one-dimensional array of `element`
    ///
    /// Arrays of arrays collapse into a single descriptor with a larger
    /// dimension.
    pub fn array_of(element: OpenType) -> Self {
        match element {
            Self::Array {
                dimension,
                element,
                primitive,
            } => Self::Array {
                dimension: dimension.saturating_add(1),
                element,
                primitive,
            },
            other => Self::Array {
                dimension: 1,
                element: Box::new(other),
                primitive: false,
            },
        }
    }

    /// Create a one-dimensional primitive array, e.g. `[J` for `Long`
    pub fn primitive_array(simple: SimpleType) -> TypeResult<Self> {
        Self::array(1, Self::simple(simple), true)
    }

    /// Create an array type with `dimension` dimensions over `element`
    ///
    /// Fails for a zero dimension, and for a primitive array whose element
    /// has no primitive counterpart. Array elements are collapsed.
    pub fn array(dimension: u8, element: OpenType, primitive: bool) -> TypeResult<Self> {
        if dimension == 0 {
            return Err(TypeError::ZeroArrayDimension {
                element: element.to_string(),
            });
        }
        let (dimension, element, primitive) = match element {
            Self::Array {
                dimension: inner,
                element,
                primitive: inner_primitive,
            } => (
                dimension.saturating_add(inner),
                *element,
                primitive || inner_primitive,
            ),
            other => (dimension, other, primitive),
        };
        if primitive && !matches!(&element, Self::Simple { simple } if simple.is_primitive()) {
            return Err(TypeError::NotPrimitive {
                type_name: element.to_string(),
            });
        }
        Ok(Self::Array {
            dimension,
            element: Box::new(element),
            primitive,
        })
    }

    /// Runtime type key of values described by this open type
    pub fn type_key(&self) -> TypeKey {
        match self {
            Self::Simple { simple } => TypeKey::from(simple.class_name()),
            Self::Composite { .. } => TypeKey::from(class_names::COMPOSITE_DATA),
            Self::Tabular { .. } => TypeKey::from(class_names::TABULAR_DATA),
            Self::Array {
                dimension,
                element,
                primitive,
            } => {
                let code = match element.as_ref() {
                    Self::Simple { simple } if *primitive => simple.primitive_code(),
                    _ => None,
                };
                let mut key = match code {
                    Some(code) => TypeKey::primitive_array(code),
                    None => element.type_key().array_of(),
                };
                for _ in 1..*dimension {
                    key = key.array_of();
                }
                key
            }
        }
    }

    /// Check whether `value` conforms to this open type
    ///
    /// Null conforms to every open type.
    pub fn accepts(&self, value: &JmxValue) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            Self::Simple { simple } => value.simple_type() == Some(*simple),
            Self::Composite { composite } => value
                .as_composite()
                .is_some_and(|data| data.composite_type() == composite.as_ref()),
            Self::Tabular { tabular } => value
                .as_tabular()
                .is_some_and(|data| data.tabular_type() == tabular.as_ref()),
            Self::Array { .. } => value
                .as_array()
                .is_some_and(|array| array.type_key() == self.type_key()),
        }
    }
}

impl fmt::Display for OpenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { simple } => write!(f, "{}", simple),
            Self::Composite { composite } => write!(f, "{}", composite),
            Self::Tabular { tabular } => write!(f, "{}", tabular),
            Self::Array {
                dimension,
                element,
                primitive,
            } => write!(
                f,
                "ArrayType(name={},dimension={},elementType={},primitiveArray={})",
                self.type_key(),
                dimension,
                element,
                primitive
            ),
        }
    }
}

/// Declared item of a composite type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    #[serde(default)]
    pub description: String,
    pub open_type: OpenType,
}

/// Schema of a composite record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CompositeTypeRepr")]
pub struct CompositeType {
    type_name: String,
    description: String,
    items: IndexMap<String, ItemType>,
}

#[derive(Deserialize)]
struct CompositeTypeRepr {
    type_name: String,
    #[serde(default)]
    description: String,
    items: IndexMap<String, ItemType>,
}

impl TryFrom<CompositeTypeRepr> for CompositeType {
    type Error = TypeError;

    fn try_from(repr: CompositeTypeRepr) -> TypeResult<Self> {
        Self::new(repr.type_name, repr.description, repr.items)
    }
}

impl CompositeType {
    /// Create a composite type from its items, in declaration order
    pub fn new(
        type_name: impl Into<String>,
        description: impl Into<String>,
        items: impl IntoIterator<Item = (impl Into<String>, ItemType)>,
    ) -> TypeResult<Self> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            return Err(TypeError::BlankTypeName);
        }
        let items: IndexMap<String, ItemType> =
            items.into_iter().map(|(name, item)| (name.into(), item)).collect();
        if items.is_empty() {
            return Err(TypeError::NoItems { type_name });
        }
        Ok(Self {
            type_name,
            description: description.into(),
            items,
        })
    }

    /// Start building a composite type
    pub fn builder(type_name: impl Into<String>) -> CompositeTypeBuilder {
        CompositeTypeBuilder {
            type_name: type_name.into(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared items, in declaration order
    pub fn items(&self) -> impl Iterator<Item = (&String, &ItemType)> {
        self.items.iter()
    }

    /// Get an item declaration by name
    pub fn item(&self, name: &str) -> Option<&ItemType> {
        self.items.get(name)
    }

    pub fn contains_item(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Item names, in declaration order
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

impl fmt::Display for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeType(name={},items=(", self.type_name)?;
        for (i, (name, item)) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", name, item.open_type)?;
        }
        write!(f, "))")
    }
}

/// Builder for [`CompositeType`]
#[derive(Debug, Clone)]
pub struct CompositeTypeBuilder {
    type_name: String,
    description: String,
    items: Vec<(String, ItemType)>,
}

impl CompositeTypeBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare an item without a description
    pub fn item(self, name: impl Into<String>, open_type: OpenType) -> Self {
        self.described_item(name, "", open_type)
    }

    /// Declare an item with a description
    pub fn described_item(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        open_type: OpenType,
    ) -> Self {
        self.items.push((
            name.into(),
            ItemType {
                description: description.into(),
                open_type,
            },
        ));
        self
    }

    pub fn build(self) -> TypeResult<CompositeType> {
        CompositeType::new(self.type_name, self.description, self.items)
    }
}

/// Schema of a tabular record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TabularTypeRepr")]
pub struct TabularType {
    type_name: String,
    description: String,
    row_type: CompositeType,
    index_names: Vec<String>,
}

#[derive(Deserialize)]
struct TabularTypeRepr {
    type_name: String,
    #[serde(default)]
    description: String,
    row_type: CompositeType,
    index_names: Vec<String>,
}

impl TryFrom<TabularTypeRepr> for TabularType {
    type Error = TypeError;

    fn try_from(repr: TabularTypeRepr) -> TypeResult<Self> {
        Self::new(repr.type_name, repr.description, repr.row_type, repr.index_names)
    }
}

impl TabularType {
    /// Create a tabular type
    ///
    /// Every index name must be an item of `row_type`.
    pub fn new(
        type_name: impl Into<String>,
        description: impl Into<String>,
        row_type: CompositeType,
        index_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> TypeResult<Self> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            return Err(TypeError::BlankTypeName);
        }
        let index_names: Vec<String> = index_names.into_iter().map(Into::into).collect();
        if index_names.is_empty() {
            return Err(TypeError::NoIndexNames { type_name });
        }
        if let Some(unknown) = index_names.iter().find(|name| !row_type.contains_item(name)) {
            return Err(TypeError::UnknownIndexName {
                index: unknown.clone(),
                type_name,
            });
        }
        Ok(Self {
            type_name,
            description: description.into(),
            row_type,
            index_names,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn row_type(&self) -> &CompositeType {
        &self.row_type
    }

    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }
}

impl fmt::Display for TabularType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TabularType(name={},rowType={},indexNames=({}))",
            self.type_name,
            self.row_type.type_name(),
            self.index_names.join(",")
        )
    }
}
