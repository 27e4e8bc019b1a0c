//! StructRW: keyed data readers and writers.
//!
//! Serialization code is written once against a `DataReader<K>` or
//! `DataWriter<K>`. The store behind it may be keyed by something else
//! entirely (column ordinals, field names, enum tags); the key-bridging
//! adapters convert at the boundary, and typed values take a fast path when
//! the store offers one.
//!
//! This crate re-exports the layered crates:
//! - [`core`]: traits, `Value`, key bridging, generic invocation
//! - [`serde`] (feature `serde`): typed value dispatch
//! - [`memory`] (feature `memory`): reference stores
//!
//! ```rust
//! # #[cfg(feature = "memory")]
//! # fn main() {
//! use structrw::core::{AsDataReader, DataReader, Value};
//! use structrw::memory::RowStore;
//!
//! let mut row = RowStore::with_cells(
//!     vec!["id".to_string(), "name".to_string()],
//!     vec![Value::from(7i64), Value::from("Ada")],
//! )
//! .unwrap();
//! let name_column = row.ordinal("name").unwrap().to_string();
//!
//! let mut by_text = AsDataReader::<_, usize, String>::new(&mut row);
//! let name = by_text.value(&name_column).unwrap().read_value().unwrap();
//! assert_eq!(name, Value::from("Ada"));
//! # }
//! # #[cfg(not(feature = "memory"))]
//! # fn main() {}
//! ```

pub use structrw_core as core;

#[cfg(feature = "serde")]
pub use structrw_serde as serde;

#[cfg(feature = "memory")]
pub use structrw_memory as memory;

pub use structrw_core::{DataReader, DataWriter, Error, Value, ValueReader, ValueWriter};
