//! Typed fast-path probing.
//!
//! Before a value is moved through the generic object protocol, callers ask
//! the accessor whether it has a handler for exactly the concrete type at
//! hand. The answer is resolved per call and never cached.

use std::any::TypeId;

use crate::{TypedValueReader, TypedValueWriter, ValueReader, ValueWriter};

/// Outcome of a fast-path probe.
pub enum FastPath<'a, H: ?Sized + 'a> {
    /// The accessor handles the requested type directly.
    Specialized(&'a mut H),
    /// No specialized handler; use the generic object protocol.
    Generic,
}

impl<H: ?Sized> FastPath<'_, H> {
    pub fn is_specialized(&self) -> bool {
        matches!(self, FastPath::Specialized(_))
    }
}

/// Ask `reader` for a handler that produces exactly `T`.
pub fn probe_reader<T: 'static>(reader: &mut dyn ValueReader) -> FastPath<'_, dyn TypedValueReader> {
    match reader.typed_reader() {
        Some(handler) if handler.supports(TypeId::of::<T>()) => FastPath::Specialized(handler),
        _ => FastPath::Generic,
    }
}

/// Ask `writer` for a handler that consumes exactly `T`.
pub fn probe_writer<T: 'static>(writer: &mut dyn ValueWriter) -> FastPath<'_, dyn TypedValueWriter> {
    match writer.typed_writer() {
        Some(handler) if handler.supports(TypeId::of::<T>()) => FastPath::Specialized(handler),
        _ => FastPath::Generic,
    }
}
