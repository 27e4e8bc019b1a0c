//! Conversions between Value and serde types.
//!
//! `Value` implements `Serialize` and `Deserialize` itself, so both
//! directions are ordinary serde round trips through `serde_json::Value`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use structrw_core::{Error, Value};

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value_to_json(value)).map_err(|e| Error::decode(e.to_string()))
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize + ?Sized>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::encode(e.to_string()))?;
    Value::deserialize(json).map_err(|e| Error::encode(e.to_string()))
}

/// Convert our Value to serde_json::Value.
///
/// Bytes become base64 text and non-finite floats become null, since JSON has
/// neither.
pub fn value_to_json(value: Value) -> serde_json::Value {
    // Map keys are always strings, the one thing serde_json can refuse.
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    // Every JSON shape has a Value counterpart.
    Value::deserialize(json).unwrap_or(Value::Null)
}
