//! Generic invocation over the key types of a bridging adapter.
//!
//! Code generic over `impl KeyBridge` never names an adapter's key types, yet
//! can still run an algorithm instantiated for each of them: it hands a
//! [`GenericInvoker`] to [`KeyBridge::invoke_inner`] or
//! [`KeyBridge::invoke_outer`], and the adapter calls back with the type
//! parameter bound. Everything is monomorphized; there is no type token to
//! hold on to, only code to run against the type.
//!
//! Because its methods are generic, `KeyBridge` is not object-safe. Take it
//! as `impl KeyBridge` or a `B: KeyBridge` parameter, never `dyn KeyBridge`.
//!
//! ```rust
//! use structrw_core::{GenericInvoker, Key};
//!
//! /// Reports the size of a key type.
//! struct KeySize;
//!
//! impl GenericInvoker for KeySize {
//!     type Output = usize;
//!
//!     fn invoke<T: Key>(self) -> usize {
//!         std::mem::size_of::<T>()
//!     }
//! }
//! ```

use crate::bridge::{AsDataReader, AsDataWriter};
use crate::convert::Key;
use crate::DataSource;

/// An operation generic over exactly one key type.
///
/// Constructed right before an invocation and consumed by it. Failures are
/// part of `Output` (typically a `Result`) and reach the caller untouched.
pub trait GenericInvoker {
    type Output;

    fn invoke<T: Key>(self) -> Self::Output;
}

/// Recovers the two key types of a bridging adapter, one at a time.
///
/// Not object-safe; see the module docs.
pub trait KeyBridge {
    /// The wrapped store, through its key-agnostic face.
    fn content(&self) -> &dyn DataSource;

    /// Run `invoker` with its type parameter bound to the inner key type.
    fn invoke_inner<I: GenericInvoker>(&self, invoker: I) -> I::Output;

    /// Run `invoker` with its type parameter bound to the outer key type.
    fn invoke_outer<I: GenericInvoker>(&self, invoker: I) -> I::Output;
}

impl<R, A, B> KeyBridge for AsDataReader<R, A, B>
where
    R: DataSource,
    A: Key,
    B: Key,
{
    fn content(&self) -> &dyn DataSource {
        self.inner()
    }

    fn invoke_inner<I: GenericInvoker>(&self, invoker: I) -> I::Output {
        invoker.invoke::<A>()
    }

    fn invoke_outer<I: GenericInvoker>(&self, invoker: I) -> I::Output {
        invoker.invoke::<B>()
    }
}

impl<W, A, B> KeyBridge for AsDataWriter<W, A, B>
where
    W: DataSource,
    A: Key,
    B: Key,
{
    fn content(&self) -> &dyn DataSource {
        self.inner()
    }

    fn invoke_inner<I: GenericInvoker>(&self, invoker: I) -> I::Output {
        invoker.invoke::<A>()
    }

    fn invoke_outer<I: GenericInvoker>(&self, invoker: I) -> I::Output {
        invoker.invoke::<B>()
    }
}

/// Reports the name of the type it is instantiated with.
pub struct KeyTypeName;

impl GenericInvoker for KeyTypeName {
    type Output = &'static str;

    fn invoke<T: Key>(self) -> &'static str {
        std::any::type_name::<T>()
    }
}
