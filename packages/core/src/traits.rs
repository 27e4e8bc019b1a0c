//! Core traits: keyed readers and writers, value accessors, capabilities.

use std::any::{Any, TypeId};

use crate::{Error, ReferenceToken, Value};

/// A lazy sequence of keys.
///
/// Each call to [`Keyed::keys`] starts a fresh pass, so a sequence is
/// restartable by asking for it again. Items are `Result` because keys may be
/// converted on the way out and a conversion can fail part-way through.
pub type Keys<'a, K> = Box<dyn Iterator<Item = Result<K, Error>> + 'a>;

/// The key-agnostic face of a reader or writer.
pub trait DataSource {
    /// Number of distinct keys reachable through enumeration.
    fn count(&self) -> usize;

    /// Identity of the underlying source.
    fn reference_token(&self) -> ReferenceToken;

    /// Capability query for the direct-content bypass.
    ///
    /// Returns `None` unless the store can hand out or replace its whole
    /// payload in one step.
    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        None
    }
}

/// Key enumeration, shared by readers and writers of the same key type.
pub trait Keyed<K>: DataSource {
    /// Enumerate the keys of this store.
    fn keys(&self) -> Keys<'_, K>;
}

/// Read values out of a store keyed by `K`.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn DataReader<K>`.
pub trait DataReader<K>: Keyed<K> {
    /// Look up the accessor for the value at `key`.
    ///
    /// Fails with [`Error::KeyNotFound`] if the store has no such key; it never
    /// falls back to a default value.
    fn value(&mut self, key: &K) -> Result<&mut dyn ValueReader, Error>;

    /// Copy the value at `key` into `writer`.
    fn on_read_value(&mut self, key: &K, writer: &mut dyn ValueWriter) -> Result<(), Error> {
        let value = self.value(key)?.read_value()?;
        writer.write_value(value)
    }

    /// Hand every entry, in enumeration order, to `writer`.
    fn on_read_all(&mut self, writer: &mut dyn DataWriter<K>) -> Result<(), Error>;

    /// Hand every entry accepted by `filter` to `writer`.
    ///
    /// The filter sees each key exactly once, before the value is read.
    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<K>,
        filter: &mut dyn ValueFilter<K>,
    ) -> Result<(), Error>;
}

/// Write values into a store keyed by `K`.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn DataWriter<K>`.
pub trait DataWriter<K>: Keyed<K> {
    /// Look up the sink for the value at `key`.
    fn value_mut(&mut self, key: &K) -> Result<&mut dyn ValueWriter, Error>;

    /// Prepare the store for a fresh round of writes.
    fn initialize(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Store the value produced by `reader` at `key`.
    fn on_write_value(&mut self, key: &K, reader: &mut dyn ValueReader) -> Result<(), Error> {
        let value = reader.read_value()?;
        self.value_mut(key)?.write_value(value)
    }

    /// Pull every entry out of `reader` into this store.
    fn on_write_all(&mut self, reader: &mut dyn DataReader<K>) -> Result<(), Error>;
}

/// Per-key inclusion decision during a filtered read-all pass.
pub trait ValueFilter<K> {
    fn include(&mut self, key: &K) -> Result<bool, Error>;
}

impl<K, F> ValueFilter<K> for F
where
    F: FnMut(&K) -> bool,
{
    fn include(&mut self, key: &K) -> Result<bool, Error> {
        Ok(self(key))
    }
}

/// Optional bypass: get or replace the whole underlying object at once.
pub trait DirectContent {
    fn get_content(&mut self) -> Result<Value, Error>;

    fn set_content(&mut self, content: Value) -> Result<(), Error>;
}

/// Source of a single value.
pub trait ValueReader {
    /// Produce the value as a `Value` tree.
    fn read_value(&mut self) -> Result<Value, Error>;

    /// Drive the generic object protocol: write each field into `target`.
    fn read_object(&mut self, target: &mut dyn DataWriter<String>) -> Result<(), Error>;

    /// Does this reader hold nothing?
    ///
    /// Counterpart of [`ValueWriter::write_null`]. A null reader has no
    /// fields to offer `read_object`.
    fn is_null(&self) -> bool {
        false
    }

    /// Capability query for a typed fast path.
    fn typed_reader(&mut self) -> Option<&mut dyn TypedValueReader> {
        None
    }
}

/// Sink for a single value.
pub trait ValueWriter {
    /// Store a `Value` tree.
    fn write_value(&mut self, value: Value) -> Result<(), Error>;

    /// The "write nothing" path.
    fn write_null(&mut self) -> Result<(), Error> {
        self.write_value(Value::Null)
    }

    /// Drive the generic object protocol: read each field out of `source`.
    fn write_object(&mut self, source: &mut dyn DataReader<String>) -> Result<(), Error>;

    /// Capability query for a typed fast path.
    fn typed_writer(&mut self) -> Option<&mut dyn TypedValueWriter> {
        None
    }
}

/// A reader specialized for exactly one concrete type.
pub trait TypedValueReader {
    /// Does this handler produce values of the type identified by `type_id`?
    fn supports(&self, type_id: TypeId) -> bool;

    /// Fill `slot`, an `Option<T>` for the supported `T`, with the value.
    fn read_typed(&mut self, slot: &mut dyn Any) -> Result<(), Error>;
}

/// A writer specialized for exactly one concrete type.
pub trait TypedValueWriter {
    /// Does this handler consume values of the type identified by `type_id`?
    fn supports(&self, type_id: TypeId) -> bool;

    /// Consume `value`, a `&T` for the supported `T`.
    fn write_typed(&mut self, value: &dyn Any) -> Result<(), Error>;
}

// Blanket implementations for references and boxes

impl<T: DataSource + ?Sized> DataSource for &mut T {
    fn count(&self) -> usize {
        (**self).count()
    }

    fn reference_token(&self) -> ReferenceToken {
        (**self).reference_token()
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        (**self).direct_content()
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn count(&self) -> usize {
        self.as_ref().count()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.as_ref().reference_token()
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        self.as_mut().direct_content()
    }
}

impl<K, T: Keyed<K> + ?Sized> Keyed<K> for &mut T {
    fn keys(&self) -> Keys<'_, K> {
        (**self).keys()
    }
}

impl<K, T: Keyed<K> + ?Sized> Keyed<K> for Box<T> {
    fn keys(&self) -> Keys<'_, K> {
        self.as_ref().keys()
    }
}

impl<K, T: DataReader<K> + ?Sized> DataReader<K> for &mut T {
    fn value(&mut self, key: &K) -> Result<&mut dyn ValueReader, Error> {
        (**self).value(key)
    }

    fn on_read_value(&mut self, key: &K, writer: &mut dyn ValueWriter) -> Result<(), Error> {
        (**self).on_read_value(key, writer)
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<K>) -> Result<(), Error> {
        (**self).on_read_all(writer)
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<K>,
        filter: &mut dyn ValueFilter<K>,
    ) -> Result<(), Error> {
        (**self).on_read_all_filtered(writer, filter)
    }
}

impl<K, T: DataReader<K> + ?Sized> DataReader<K> for Box<T> {
    fn value(&mut self, key: &K) -> Result<&mut dyn ValueReader, Error> {
        self.as_mut().value(key)
    }

    fn on_read_value(&mut self, key: &K, writer: &mut dyn ValueWriter) -> Result<(), Error> {
        self.as_mut().on_read_value(key, writer)
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<K>) -> Result<(), Error> {
        self.as_mut().on_read_all(writer)
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<K>,
        filter: &mut dyn ValueFilter<K>,
    ) -> Result<(), Error> {
        self.as_mut().on_read_all_filtered(writer, filter)
    }
}

impl<K, T: DataWriter<K> + ?Sized> DataWriter<K> for &mut T {
    fn value_mut(&mut self, key: &K) -> Result<&mut dyn ValueWriter, Error> {
        (**self).value_mut(key)
    }

    fn initialize(&mut self) -> Result<(), Error> {
        (**self).initialize()
    }

    fn on_write_value(&mut self, key: &K, reader: &mut dyn ValueReader) -> Result<(), Error> {
        (**self).on_write_value(key, reader)
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<K>) -> Result<(), Error> {
        (**self).on_write_all(reader)
    }
}

impl<K, T: DataWriter<K> + ?Sized> DataWriter<K> for Box<T> {
    fn value_mut(&mut self, key: &K) -> Result<&mut dyn ValueWriter, Error> {
        self.as_mut().value_mut(key)
    }

    fn initialize(&mut self) -> Result<(), Error> {
        self.as_mut().initialize()
    }

    fn on_write_value(&mut self, key: &K, reader: &mut dyn ValueReader) -> Result<(), Error> {
        self.as_mut().on_write_value(key, reader)
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<K>) -> Result<(), Error> {
        self.as_mut().on_write_all(reader)
    }
}
