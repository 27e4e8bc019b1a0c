//! Dual-path value dispatch.
//!
//! [`ValueInterface<T>`] moves a `T` in or out of a value accessor. It first
//! asks the accessor for a typed handler for exactly `T`; if there is one the
//! value crosses without ever becoming a `Value`. If not, it falls back to
//! the generic object protocol, with a [`StructuralRW<T>`] standing in for
//! the object on the other side.
//!
//! The choice is made on every call. Nothing about an accessor is remembered.

use std::any::type_name;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use structrw_core::{probe_reader, probe_writer, Error, FastPath, ValueReader, ValueWriter};

use crate::structural::StructuralRW;

/// Reads and writes values of type `T` through any value accessor.
///
/// Stateless; construct one wherever it is needed.
pub struct ValueInterface<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> ValueInterface<T> {
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for ValueInterface<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueInterface<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Produce a `T` from `reader`.
    ///
    /// `None` when the reader holds null: either its typed handler leaves the
    /// slot empty or [`ValueReader::is_null`] says so. A null reader is never
    /// handed a structural adapter.
    pub fn read_value(&self, reader: &mut dyn ValueReader) -> Result<Option<T>, Error> {
        if let FastPath::Specialized(handler) = probe_reader::<T>(reader) {
            log::trace!("reading {} through its typed reader", type_name::<T>());
            let mut slot: Option<T> = None;
            handler.read_typed(&mut slot)?;
            return Ok(slot);
        }

        if reader.is_null() {
            log::trace!("reading {} from a null reader", type_name::<T>());
            return Ok(None);
        }

        log::trace!("reading {} through the object protocol", type_name::<T>());
        let mut adapter = StructuralRW::<T>::new();
        reader.read_object(&mut adapter)?;
        adapter.into_content().map(Some)
    }

    /// Store `value` into `writer`.
    ///
    /// `None` is written with [`ValueWriter::write_null`] and nothing else:
    /// no probe and no structural adapter.
    pub fn write_value(
        &self,
        writer: &mut dyn ValueWriter,
        value: Option<&T>,
    ) -> Result<(), Error> {
        let value = match value {
            Some(value) => value,
            None => return writer.write_null(),
        };

        if let FastPath::Specialized(handler) = probe_writer::<T>(writer) {
            log::trace!("writing {} through its typed writer", type_name::<T>());
            return handler.write_typed(value);
        }

        log::trace!("writing {} through the object protocol", type_name::<T>());
        let mut adapter = StructuralRW::from_content(value)?;
        writer.write_object(&mut adapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::any::{Any, TypeId};
    use structrw_core::{DataReader, DataWriter, TypedValueReader, TypedValueWriter, Value};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Point {
        x: i64,
        y: i64,
    }

    /// A value slot that counts how it was reached.
    #[derive(Default)]
    struct Tally {
        content: Value,
        fast: Option<Point>,
        typed: bool,
        probes: usize,
        objects: usize,
        nulls: usize,
    }

    impl Tally {
        fn typed() -> Self {
            Self {
                typed: true,
                ..Self::default()
            }
        }
    }

    impl TypedValueReader for Tally {
        fn supports(&self, type_id: TypeId) -> bool {
            type_id == TypeId::of::<Point>()
        }

        fn read_typed(&mut self, slot: &mut dyn Any) -> Result<(), Error> {
            let slot = slot
                .downcast_mut::<Option<Point>>()
                .ok_or_else(|| Error::other("slot is not Option<Point>"))?;
            *slot = self.fast.clone();
            Ok(())
        }
    }

    impl TypedValueWriter for Tally {
        fn supports(&self, type_id: TypeId) -> bool {
            type_id == TypeId::of::<Point>()
        }

        fn write_typed(&mut self, value: &dyn Any) -> Result<(), Error> {
            self.fast = value.downcast_ref::<Point>().cloned();
            Ok(())
        }
    }

    impl ValueReader for Tally {
        fn read_value(&mut self) -> Result<Value, Error> {
            Ok(self.content.clone())
        }

        fn read_object(&mut self, target: &mut dyn DataWriter<String>) -> Result<(), Error> {
            self.objects += 1;
            self.content.read_object(target)
        }

        fn is_null(&self) -> bool {
            self.content.is_null()
        }

        fn typed_reader(&mut self) -> Option<&mut dyn TypedValueReader> {
            self.probes += 1;
            if self.typed {
                Some(self)
            } else {
                None
            }
        }
    }

    impl ValueWriter for Tally {
        fn write_value(&mut self, value: Value) -> Result<(), Error> {
            self.content = value;
            Ok(())
        }

        fn write_null(&mut self) -> Result<(), Error> {
            self.nulls += 1;
            self.content = Value::Null;
            self.fast = None;
            Ok(())
        }

        fn write_object(&mut self, source: &mut dyn DataReader<String>) -> Result<(), Error> {
            self.objects += 1;
            self.content.write_object(source)
        }

        fn typed_writer(&mut self) -> Option<&mut dyn TypedValueWriter> {
            self.probes += 1;
            if self.typed {
                Some(self)
            } else {
                None
            }
        }
    }

    #[test]
    fn null_write_skips_probe_and_adapter() {
        for mut slot in [Tally::default(), Tally::typed()] {
            ValueInterface::<Point>::new()
                .write_value(&mut slot, None)
                .unwrap();

            assert_eq!(slot.nulls, 1);
            assert_eq!(slot.probes, 0);
            assert_eq!(slot.objects, 0);
            assert!(slot.content.is_null());
        }
    }

    #[test]
    fn typed_write_uses_fast_path() {
        let mut slot = Tally::typed();
        let point = Point { x: 1, y: 2 };

        ValueInterface::new().write_value(&mut slot, Some(&point)).unwrap();

        assert_eq!(slot.fast, Some(point));
        assert_eq!(slot.probes, 1);
        assert_eq!(slot.objects, 0);
        assert!(slot.content.is_null());
    }

    #[test]
    fn untyped_write_falls_back_to_object_protocol() {
        let mut slot = Tally::default();
        let point = Point { x: 3, y: 4 };

        ValueInterface::new().write_value(&mut slot, Some(&point)).unwrap();

        assert_eq!(slot.probes, 1);
        assert_eq!(slot.objects, 1);
        assert_eq!(slot.fast, None);
        let fields = slot.content.as_map().unwrap();
        assert_eq!(fields.get("x"), Some(&Value::Integer(3)));
        assert_eq!(fields.get("y"), Some(&Value::Integer(4)));
    }

    #[test]
    fn round_trip_through_fast_path() {
        let interface = ValueInterface::<Point>::new();
        let point = Point { x: -5, y: 8 };
        let mut slot = Tally::typed();

        interface.write_value(&mut slot, Some(&point)).unwrap();
        let back = interface.read_value(&mut slot).unwrap();

        assert_eq!(back, Some(point));
        assert_eq!(slot.objects, 0);
        assert_eq!(slot.probes, 2);
    }

    #[test]
    fn round_trip_through_fallback() {
        let interface = ValueInterface::<Point>::new();
        let point = Point { x: 10, y: 20 };
        let mut slot = Tally::default();

        interface.write_value(&mut slot, Some(&point)).unwrap();
        let back = interface.read_value(&mut slot).unwrap();

        assert_eq!(back, Some(point));
        assert_eq!(slot.objects, 2);
        assert_eq!(slot.probes, 2);
    }

    #[test]
    fn empty_typed_slot_reads_as_none() {
        let mut slot = Tally::typed();
        let read = ValueInterface::<Point>::new().read_value(&mut slot).unwrap();
        assert_eq!(read, None);
        assert_eq!(slot.objects, 0);
    }

    #[test]
    fn null_round_trips_on_both_paths() {
        let interface = ValueInterface::<Point>::new();
        for mut slot in [Tally::default(), Tally::typed()] {
            interface
                .write_value(&mut slot, Some(&Point { x: 1, y: 1 }))
                .unwrap();
            interface.write_value(&mut slot, None).unwrap();

            assert_eq!(interface.read_value(&mut slot).unwrap(), None);
            assert_eq!(slot.nulls, 1);
        }
    }

    #[test]
    fn null_value_is_read_without_an_adapter() {
        let mut value = Value::from("stale");
        let interface = ValueInterface::<Point>::new();

        interface.write_value(&mut value, None).unwrap();

        assert_eq!(interface.read_value(&mut value).unwrap(), None);
    }

    #[test]
    fn fast_path_is_only_for_the_exact_type() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Other {
            x: i64,
            y: i64,
        }

        // Tally only specializes Point; Other goes through the object protocol.
        let mut slot = Tally::typed();
        ValueInterface::new()
            .write_value(&mut slot, Some(&Other { x: 1, y: 1 }))
            .unwrap();

        assert_eq!(slot.fast, None);
        assert_eq!(slot.objects, 1);
    }

    #[test]
    fn plain_value_reads_through_object_protocol() {
        let mut value = Value::Map(
            [
                ("x".to_string(), Value::Integer(0)),
                ("y".to_string(), Value::Integer(-1)),
            ]
            .into_iter()
            .collect(),
        );

        let point = ValueInterface::<Point>::new().read_value(&mut value).unwrap();
        assert_eq!(point, Some(Point { x: 0, y: -1 }));
    }

    #[test]
    fn scalar_reader_cannot_fill_an_object() {
        let mut value = Value::from("not a point");
        let err = ValueInterface::<Point>::new().read_value(&mut value).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { found: "string", .. }));
    }
}
