//! In-memory reference stores for StructRW.
//!
//! - `MapStore`: values keyed by name, with a direct-content bypass
//! - `RowStore`: one result-set row, cells keyed by column ordinal
//! - `TypedCell<T>`: a single value slot with a typed fast path for `T`
//!
//! These are small and complete enough to back tests and examples; they make
//! no attempt at concurrency or persistence.

mod cell;
mod map;
mod row;

pub use cell::TypedCell;
pub use map::MapStore;
pub use row::RowStore;
