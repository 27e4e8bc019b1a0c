//! The Value type - a tree-shaped data structure.
//!
//! `Value` is the payload moved through value accessors when no typed fast
//! path applies, and the payload of the direct-content bypass. It also serves
//! as the simplest value accessor: a `&mut Value` is both a [`ValueReader`]
//! and a [`ValueWriter`].

use std::collections::BTreeMap;

use crate::{
    DataReader, DataSource, DataWriter, Error, Keyed, Keys, ReferenceToken, ValueReader,
    ValueWriter,
};

/// A tree-shaped value that can be read from or written to a store.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering (important for comparison)
/// - Includes `Bytes` for binary data
/// - Uses `i64` for integers
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys (the object shape).
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is a map (object).
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Check if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Short name of the variant, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Take the entries out of a map value.
    pub fn into_map(self) -> Result<BTreeMap<String, Value>, Error> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(Error::TypeMismatch {
                expected: "map",
                found: other.kind(),
            }),
        }
    }
}

impl ValueReader for Value {
    fn read_value(&mut self) -> Result<Value, Error> {
        Ok(self.clone())
    }

    fn read_object(&mut self, target: &mut dyn DataWriter<String>) -> Result<(), Error> {
        match self {
            Value::Map(map) => {
                for (key, value) in map.iter_mut() {
                    target.on_write_value(key, value)?;
                }
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                expected: "map",
                found: other.kind(),
            }),
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl ValueWriter for Value {
    fn write_value(&mut self, value: Value) -> Result<(), Error> {
        *self = value;
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), Error> {
        *self = Value::Null;
        Ok(())
    }

    fn write_object(&mut self, source: &mut dyn DataReader<String>) -> Result<(), Error> {
        let mut entries = BTreeMap::new();
        source.on_read_all(&mut EntrySink::new(&mut entries))?;
        *self = Value::Map(entries);
        Ok(())
    }
}

/// Collects the entries of an object-protocol pass into a map.
struct EntrySink<'m> {
    entries: &'m mut BTreeMap<String, Value>,
    token: ReferenceToken,
}

impl<'m> EntrySink<'m> {
    fn new(entries: &'m mut BTreeMap<String, Value>) -> Self {
        Self {
            entries,
            token: ReferenceToken::next(),
        }
    }
}

impl DataSource for EntrySink<'_> {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.token
    }
}

impl Keyed<String> for EntrySink<'_> {
    fn keys(&self) -> Keys<'_, String> {
        Box::new(self.entries.keys().cloned().map(Ok))
    }
}

impl DataWriter<String> for EntrySink<'_> {
    fn value_mut(&mut self, key: &String) -> Result<&mut dyn ValueWriter, Error> {
        Ok(self.entries.entry(key.clone()).or_insert(Value::Null))
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<String>) -> Result<(), Error> {
        reader.on_read_all(self)
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}
