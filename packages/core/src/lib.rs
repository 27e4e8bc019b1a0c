//! Core StructRW: Keyed Data Access Layer
//!
//! This layer defines how keyed data is read and written, independent of any
//! concrete store:
//! - `DataReader` / `DataWriter`: Lookup, bulk passes and filtered passes over keys
//! - `ValueReader` / `ValueWriter`: Accessors for a single value
//! - `AsDataReader` / `AsDataWriter`: Present a store under a different key type
//! - `KeyBridge`: Run generic code against an adapter's key types
//! - `probe_reader` / `probe_writer`: Typed fast-path discovery
//!
//! Use this layer for:
//! - Exposing an ordinal-keyed store (rows, tuples) by name, or the reverse
//! - Writing store-agnostic copy and projection code
//! - Implementing new stores
//!
//! # Example
//!
//! ```rust
//! use structrw_core::{AsDataReader, DataReader, Error, Value};
//!
//! fn first_column(
//!     row: &mut dyn DataReader<usize>,
//! ) -> Result<Value, Error> {
//!     let mut by_text = AsDataReader::<_, usize, String>::new(row);
//!     let value = by_text.value(&"0".to_string())?.read_value()?;
//!     Ok(value)
//! }
//! ```

mod bridge;
pub mod convert;
mod error;
mod forward;
mod invoke;
mod probe;
mod token;
mod traits;
mod value;
mod value_serde;

#[cfg(any(test, feature = "test-utils"))]
pub mod conformance;

pub use bridge::{AsDataReader, AsDataWriter};
pub use convert::{convert, ConvertFrom, Key};
pub use error::{AccessSide, ContentOperation, Error};
pub use forward::{AsReadAllFilter, AsReadAllWriter};
pub use invoke::{GenericInvoker, KeyBridge, KeyTypeName};
pub use probe::{probe_reader, probe_writer, FastPath};
pub use token::ReferenceToken;
pub use traits::{
    DataReader, DataSource, DataWriter, DirectContent, Keyed, Keys, TypedValueReader,
    TypedValueWriter, ValueFilter, ValueReader, ValueWriter,
};
pub use value::Value;
