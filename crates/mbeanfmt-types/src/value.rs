//! Runtime values read from management bean attributes
//!
//! This module defines the JmxValue enum and the open data containers
//! (composite records, tabular record sets and arrays) it can hold.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{TypeError, TypeResult};
use crate::open_type::{CompositeType, SimpleType, TabularType};
use crate::type_key::{class_names, TypeKey};

/// A value returned by a management bean attribute or operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum JmxValue {
    // === Absent values ===
    /// Null reference, which has no runtime type
    Null,
    /// Result of an operation returning nothing
    Void,

    // === Scalars ===
    Boolean(bool),
    Character(char),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigDecimal(Decimal),
    String(String),
    /// Canonical object name of another bean
    ObjectName(String),

    /// Point in time with the offset it was observed in
    Date(DateTime<FixedOffset>),

    // === Open data ===
    Composite(CompositeData),
    Tabular(TabularData),
    Array(JmxArray),
}

impl JmxValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Runtime type key of this value, `None` for null
    pub fn type_key(&self) -> Option<TypeKey> {
        match self {
            Self::Null => None,
            Self::Void => Some(TypeKey::from(class_names::VOID)),
            Self::Composite(_) => Some(TypeKey::from(class_names::COMPOSITE_DATA_SUPPORT)),
            Self::Tabular(_) => Some(TypeKey::from(class_names::TABULAR_DATA_SUPPORT)),
            Self::Array(array) => Some(array.type_key()),
            other => other
                .simple_type()
                .map(|simple| TypeKey::from(simple.class_name())),
        }
    }

    /// Simple open type of scalar, void and date values
    pub fn simple_type(&self) -> Option<SimpleType> {
        match self {
            Self::Void => Some(SimpleType::Void),
            Self::Boolean(_) => Some(SimpleType::Boolean),
            Self::Character(_) => Some(SimpleType::Character),
            Self::Byte(_) => Some(SimpleType::Byte),
            Self::Short(_) => Some(SimpleType::Short),
            Self::Integer(_) => Some(SimpleType::Integer),
            Self::Long(_) => Some(SimpleType::Long),
            Self::Float(_) => Some(SimpleType::Float),
            Self::Double(_) => Some(SimpleType::Double),
            Self::BigDecimal(_) => Some(SimpleType::BigDecimal),
            Self::String(_) => Some(SimpleType::String),
            Self::ObjectName(_) => Some(SimpleType::ObjectName),
            Self::Date(_) => Some(SimpleType::Date),
            Self::Null | Self::Composite(_) | Self::Tabular(_) | Self::Array(_) => None,
        }
    }

    /// Short name of the structural kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Void => "void",
            Self::Boolean(_) => "boolean",
            Self::Character(_) => "character",
            Self::Byte(_) => "byte",
            Self::Short(_) => "short",
            Self::Integer(_) => "integer",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::BigDecimal(_) => "big decimal",
            Self::String(_) => "string",
            Self::ObjectName(_) => "object name",
            Self::Date(_) => "date",
            Self::Composite(_) => "composite",
            Self::Tabular(_) => "tabular",
            Self::Array(_) => "array",
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeData> {
        match self {
            Self::Composite(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_tabular(&self) -> Option<&TabularData> {
        match self {
            Self::Tabular(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JmxArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create an object name value
    pub fn object_name(value: impl Into<String>) -> Self {
        Self::ObjectName(value.into())
    }
}

impl From<CompositeData> for JmxValue {
    fn from(data: CompositeData) -> Self {
        Self::Composite(data)
    }
}

impl From<TabularData> for JmxValue {
    fn from(data: TabularData) -> Self {
        Self::Tabular(data)
    }
}

impl From<JmxArray> for JmxValue {
    fn from(array: JmxArray) -> Self {
        Self::Array(array)
    }
}

impl From<DateTime<FixedOffset>> for JmxValue {
    fn from(date: DateTime<FixedOffset>) -> Self {
        Self::Date(date)
    }
}

/// Canonical string form of a value
impl fmt::Display for JmxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Void => Ok(()),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Character(c) => write!(f, "{}", c),
            Self::Byte(i) => write!(f, "{}", i),
            Self::Short(i) => write!(f, "{}", i),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Long(i) => write!(f, "{}", i),
            Self::Float(x) => write_floating(f, *x, f64::from(*x)),
            Self::Double(x) => write_floating(f, *x, *x),
            Self::BigDecimal(d) => write!(f, "{}", d),
            Self::String(s) | Self::ObjectName(s) => f.write_str(s),
            Self::Date(date) => write!(f, "{}", date.format("%a %b %d %H:%M:%S %:z %Y")),
            Self::Composite(data) => write!(f, "{}", data),
            Self::Tabular(data) => write!(f, "{}", data),
            Self::Array(array) => write!(f, "{}", array),
        }
    }
}

/// Write a floating point number the way the platform prints boxed floats:
/// a trailing `.0` for integral values and `E` notation outside `[1e-3, 1e7)`.
fn write_floating<F>(f: &mut fmt::Formatter<'_>, value: F, magnitude: f64) -> fmt::Result
where
    F: fmt::Display + fmt::LowerExp,
{
    if magnitude.is_nan() {
        return f.write_str("NaN");
    }
    if magnitude.is_infinite() {
        return f.write_str(if magnitude > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let abs = magnitude.abs();
    if abs == 0.0 || (1e-3..1e7).contains(&abs) {
        let plain = value.to_string();
        if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{}.0", plain)
        }
    } else {
        let scientific = format!("{:e}", value);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{}E{}", mantissa, exponent)
        } else {
            write!(f, "{}.0E{}", mantissa, exponent)
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    values: impl Iterator<Item = &'a JmxValue>,
) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

// ============================================================================
// Composite records
// ============================================================================

/// Composite record: one value per item of its composite type
///
/// Values are kept in the declaration order of the composite type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CompositeDataRepr")]
pub struct CompositeData {
    composite_type: CompositeType,
    values: IndexMap<String, JmxValue>,
}

#[derive(Deserialize)]
struct CompositeDataRepr {
    composite_type: CompositeType,
    values: IndexMap<String, JmxValue>,
}

impl TryFrom<CompositeDataRepr> for CompositeData {
    type Error = TypeError;

    fn try_from(repr: CompositeDataRepr) -> TypeResult<Self> {
        Self::new(repr.composite_type, repr.values)
    }
}

impl CompositeData {
    /// Create a composite record
    ///
    /// Every declared item needs a value (null is allowed), no undeclared
    /// item may be supplied, and each value must conform to its item's
    /// open type. Supplied order does not matter.
    pub fn new(
        composite_type: CompositeType,
        values: impl IntoIterator<Item = (impl Into<String>, JmxValue)>,
    ) -> TypeResult<Self> {
        let mut supplied: IndexMap<String, JmxValue> =
            values.into_iter().map(|(name, value)| (name.into(), value)).collect();

        if let Some(unknown) = supplied.keys().find(|name| !composite_type.contains_item(name)) {
            return Err(TypeError::UnknownItem {
                type_name: composite_type.type_name().to_string(),
                item: unknown.clone(),
            });
        }

        let mut ordered = IndexMap::with_capacity(supplied.len());
        for (name, item) in composite_type.items() {
            let value = supplied
                .shift_remove(name)
                .ok_or_else(|| TypeError::MissingItem {
                    type_name: composite_type.type_name().to_string(),
                    item: name.clone(),
                })?;
            if !item.open_type.accepts(&value) {
                return Err(TypeError::item_type_mismatch(
                    composite_type.type_name(),
                    name.as_str(),
                    item.open_type.to_string(),
                    value.kind_name(),
                ));
            }
            ordered.insert(name.clone(), value);
        }

        Ok(Self {
            composite_type,
            values: ordered,
        })
    }

    pub fn composite_type(&self) -> &CompositeType {
        &self.composite_type
    }

    /// Get the value of an item
    pub fn get(&self, name: &str) -> Option<&JmxValue> {
        self.values.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Values in declaration order
    pub fn values(&self) -> impl Iterator<Item = &JmxValue> {
        self.values.values()
    }

    /// Item names and values in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &JmxValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for CompositeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeData({}){{", self.composite_type.type_name())?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Tabular record sets
// ============================================================================

/// Tabular record set: rows of one composite type, unique by index items
///
/// Rows iterate in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TabularDataRepr")]
pub struct TabularData {
    tabular_type: TabularType,
    rows: Vec<CompositeData>,
    #[serde(skip)]
    index: HashMap<Vec<String>, usize>,
}

#[derive(Deserialize)]
struct TabularDataRepr {
    tabular_type: TabularType,
    #[serde(default)]
    rows: Vec<CompositeData>,
}

impl TryFrom<TabularDataRepr> for TabularData {
    type Error = TypeError;

    fn try_from(repr: TabularDataRepr) -> TypeResult<Self> {
        Self::with_rows(repr.tabular_type, repr.rows)
    }
}

impl TabularData {
    /// Create an empty record set
    pub fn new(tabular_type: TabularType) -> Self {
        Self {
            tabular_type,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a record set and add `rows` in order
    pub fn with_rows(
        tabular_type: TabularType,
        rows: impl IntoIterator<Item = CompositeData>,
    ) -> TypeResult<Self> {
        let mut data = Self::new(tabular_type);
        for row in rows {
            data.put(row)?;
        }
        Ok(data)
    }

    /// Add a row
    ///
    /// Fails if the row's composite type is not the row type, or another
    /// row already has the same index values.
    pub fn put(&mut self, row: CompositeData) -> TypeResult<()> {
        let row_type = self.tabular_type.row_type();
        if row.composite_type() != row_type {
            return Err(TypeError::RowTypeMismatch {
                expected: row_type.to_string(),
                found: row.composite_type().to_string(),
            });
        }

        let key = self.index_key(&row);
        if self.index.contains_key(&key) {
            let shown: Vec<String> = self
                .index_values(&row)
                .map(|value| value.map_or_else(String::new, ToString::to_string))
                .collect();
            return Err(TypeError::DuplicateRowIndex {
                type_name: self.tabular_type.type_name().to_string(),
                index: format!("[{}]", shown.join(", ")),
            });
        }
        self.index.insert(key, self.rows.len());
        self.rows.push(row);
        Ok(())
    }

    /// Find the row whose index items hold `index_values`, in index order
    pub fn get(&self, index_values: &[JmxValue]) -> Option<&CompositeData> {
        let key: Vec<String> = index_values.iter().map(index_part).collect();
        self.index.get(&key).map(|&position| &self.rows[position])
    }

    fn index_values<'a>(
        &'a self,
        row: &'a CompositeData,
    ) -> impl Iterator<Item = Option<&'a JmxValue>> + 'a {
        self.tabular_type
            .index_names()
            .iter()
            .map(move |name| row.get(name))
    }

    fn index_key(&self, row: &CompositeData) -> Vec<String> {
        self.index_values(row)
            .map(|value| value.map_or_else(String::new, index_part))
            .collect()
    }

    pub fn tabular_type(&self) -> &TabularType {
        &self.tabular_type
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[CompositeData] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl PartialEq for TabularData {
    fn eq(&self, other: &Self) -> bool {
        self.tabular_type == other.tabular_type && self.rows == other.rows
    }
}

impl fmt::Display for TabularData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TabularData({})[", self.tabular_type.type_name())?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", row)?;
        }
        write!(f, "]")
    }
}

/// Unambiguous encoding of an index value
///
/// Every part carries its kind and text is quoted, so values whose
/// canonical strings coincide (null and "null") get different keys.
fn index_part(value: &JmxValue) -> String {
    let mut out = String::new();
    write_index_part(value, &mut out);
    out
}

fn write_index_part(value: &JmxValue, out: &mut String) {
    match value {
        JmxValue::Null => out.push_str("null"),
        JmxValue::Character(c) => out.push_str(&format!("character:{:?}", c)),
        JmxValue::String(text) => out.push_str(&format!("string:{:?}", text)),
        JmxValue::ObjectName(name) => out.push_str(&format!("object name:{:?}", name)),
        JmxValue::Date(date) => out.push_str(&format!(
            "date:{}.{:09}",
            date.timestamp(),
            date.timestamp_subsec_nanos()
        )),
        JmxValue::Composite(data) => write_composite_part(data, out),
        JmxValue::Tabular(data) => {
            out.push_str(&format!("tabular:{:?}[", data.tabular_type().to_string()));
            for row in data.rows() {
                write_composite_part(row, out);
                out.push(';');
            }
            out.push(']');
        }
        JmxValue::Array(array) => {
            out.push_str(&format!("array:{}[", array.type_key()));
            for element in array.iter() {
                write_index_part(element, out);
                out.push(';');
            }
            out.push(']');
        }
        other => out.push_str(&format!("{}:{}", other.kind_name(), other)),
    }
}

fn write_composite_part(data: &CompositeData, out: &mut String) {
    out.push_str(&format!("composite:{:?}{{", data.composite_type().to_string()));
    for (name, value) in data.iter() {
        out.push_str(&format!("{:?}=", name));
        write_index_part(value, out);
        out.push(';');
    }
    out.push('}');
}

// ============================================================================
// Arrays
// ============================================================================

/// Declared element type of an array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "type", rename_all = "snake_case")]
pub enum ArrayElement {
    /// Unboxed scalars such as `int` or `double`
    Primitive(SimpleType),
    /// Objects of the named class (or any subclass)
    Reference(TypeKey),
}

impl ArrayElement {
    /// Type key of an array with this element type
    pub fn array_key(&self) -> TypeKey {
        match self {
            Self::Primitive(simple) => match simple.primitive_code() {
                Some(code) => TypeKey::primitive_array(code),
                None => TypeKey::from(simple.class_name()).array_of(),
            },
            Self::Reference(key) => key.array_of(),
        }
    }
}

/// Array of values with a declared element type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "JmxArrayRepr")]
pub struct JmxArray {
    element_type: ArrayElement,
    elements: Vec<JmxValue>,
}

#[derive(Deserialize)]
struct JmxArrayRepr {
    element_type: ArrayElement,
    #[serde(default)]
    elements: Vec<JmxValue>,
}

impl TryFrom<JmxArrayRepr> for JmxArray {
    type Error = TypeError;

    fn try_from(repr: JmxArrayRepr) -> TypeResult<Self> {
        Self::new(repr.element_type, repr.elements)
    }
}

impl JmxArray {
    /// Create an array
    ///
    /// Primitive arrays only hold non-null values of their element kind.
    /// Reference arrays hold anything, including nulls.
    pub fn new(element_type: ArrayElement, elements: Vec<JmxValue>) -> TypeResult<Self> {
        if let ArrayElement::Primitive(simple) = &element_type {
            if !simple.is_primitive() {
                return Err(TypeError::NotPrimitive {
                    type_name: simple.class_name().to_string(),
                });
            }
            if let Some((index, element)) = elements
                .iter()
                .enumerate()
                .find(|(_, element)| element.simple_type() != Some(*simple))
            {
                return Err(TypeError::PrimitiveElement {
                    index,
                    expected: simple.class_name().to_string(),
                    found: element.kind_name().to_string(),
                });
            }
        }
        Ok(Self {
            element_type,
            elements,
        })
    }

    /// Create an array of references to `element_type`
    pub fn reference(element_type: impl Into<TypeKey>, elements: Vec<JmxValue>) -> Self {
        Self {
            element_type: ArrayElement::Reference(element_type.into()),
            elements,
        }
    }

    /// Create a primitive array
    pub fn primitive(element_type: SimpleType, elements: Vec<JmxValue>) -> TypeResult<Self> {
        Self::new(ArrayElement::Primitive(element_type), elements)
    }

    pub fn element_type(&self) -> &ArrayElement {
        &self.element_type
    }

    /// Runtime type key, e.g. `[Ljava.lang.Integer;` or `[J`
    pub fn type_key(&self) -> TypeKey {
        self.element_type.array_key()
    }

    pub fn elements(&self) -> &[JmxValue] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&JmxValue> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JmxValue> {
        self.elements.iter()
    }
}

impl fmt::Display for JmxArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_joined(f, self.elements.iter())?;
        write!(f, "]")
    }
}
