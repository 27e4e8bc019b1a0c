//! Serde Integration for StructRW
//!
//! This layer moves Rust types in and out of value accessors. It adds:
//! - `ValueInterface<T>`: Read or write a `T`, preferring a typed fast path
//! - `StructuralRW<T>`: A serde type seen as a store keyed by field name
//! - `TypedReader` / `TypedWriter`: `read_as` / `write_as` on any keyed store
//! - Value <-> serde conversions
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use structrw_core::Value;
//! use structrw_serde::ValueInterface;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let interface = ValueInterface::<User>::new();
//! let mut slot = Value::Null;
//! let user = User { name: "Alice".to_string(), age: 30 };
//!
//! interface.write_value(&mut slot, Some(&user)).unwrap();
//! assert!(slot.is_map());
//! assert_eq!(interface.read_value(&mut slot).unwrap(), Some(user));
//! ```

mod convert;
mod interface;
mod structural;
mod typed;

pub use convert::{from_value, json_to_value, to_value, value_to_json};
pub use interface::ValueInterface;
pub use structural::StructuralRW;
pub use typed::{TypedReader, TypedWriter};

// Re-export core types for convenience
pub use structrw_core::{Error, Value};
