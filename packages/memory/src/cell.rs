//! A value slot with a typed fast path.

use std::any::{Any, TypeId};

use serde::de::DeserializeOwned;
use serde::Serialize;
use structrw_core::{
    DataReader, DataWriter, Error, TypedValueReader, TypedValueWriter, Value, ValueReader,
    ValueWriter,
};
use structrw_serde::{from_value, to_value, StructuralRW};

/// Holds at most one `T`.
///
/// Offers a typed handler for exactly `T`, so a
/// [`ValueInterface<T>`](structrw_serde::ValueInterface) moves the value in
/// and out without building a `Value`. Any other type falls back to the
/// object protocol over `T`'s fields.
///
/// The cell counts how often it was probed for a typed handler and how often
/// the object protocol was used instead.
pub struct TypedCell<T> {
    content: Option<T>,
    probes: usize,
    fallbacks: usize,
}

impl<T> TypedCell<T> {
    /// An empty cell.
    pub fn new() -> Self {
        Self {
            content: None,
            probes: 0,
            fallbacks: 0,
        }
    }

    /// A cell holding `content`.
    pub fn with(content: T) -> Self {
        Self {
            content: Some(content),
            ..Self::new()
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.content
    }

    /// Number of typed-handler probes seen.
    pub fn probes(&self) -> usize {
        self.probes
    }

    /// Number of transfers that went through the object protocol.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }
}

impl<T> Default for TypedCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> TypedValueReader for TypedCell<T> {
    fn supports(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<T>()
    }

    fn read_typed(&mut self, slot: &mut dyn Any) -> Result<(), Error> {
        let slot = slot.downcast_mut::<Option<T>>().ok_or_else(|| {
            Error::other(format!(
                "typed read slot is not Option<{}>",
                std::any::type_name::<T>()
            ))
        })?;
        *slot = self.content.clone();
        Ok(())
    }
}

impl<T: Clone + 'static> TypedValueWriter for TypedCell<T> {
    fn supports(&self, type_id: TypeId) -> bool {
        type_id == TypeId::of::<T>()
    }

    fn write_typed(&mut self, value: &dyn Any) -> Result<(), Error> {
        let value = value.downcast_ref::<T>().ok_or_else(|| {
            Error::other(format!(
                "typed write value is not {}",
                std::any::type_name::<T>()
            ))
        })?;
        self.content = Some(value.clone());
        Ok(())
    }
}

impl<T> ValueReader for TypedCell<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    fn read_value(&mut self) -> Result<Value, Error> {
        match &self.content {
            Some(content) => to_value(content),
            None => Ok(Value::Null),
        }
    }

    fn read_object(&mut self, target: &mut dyn DataWriter<String>) -> Result<(), Error> {
        self.fallbacks += 1;
        let content = self.content.as_ref().ok_or(Error::TypeMismatch {
            expected: "map",
            found: "null",
        })?;
        StructuralRW::from_content(content)?.on_read_all(target)
    }

    fn is_null(&self) -> bool {
        self.content.is_none()
    }

    fn typed_reader(&mut self) -> Option<&mut dyn TypedValueReader> {
        self.probes += 1;
        Some(self)
    }
}

impl<T> ValueWriter for TypedCell<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    fn write_value(&mut self, value: Value) -> Result<(), Error> {
        self.content = match value {
            Value::Null => None,
            value => Some(from_value(value)?),
        };
        Ok(())
    }

    fn write_null(&mut self) -> Result<(), Error> {
        self.content = None;
        Ok(())
    }

    fn write_object(&mut self, source: &mut dyn DataReader<String>) -> Result<(), Error> {
        self.fallbacks += 1;
        let mut fields = StructuralRW::<T>::new();
        fields.on_write_all(source)?;
        self.content = Some(fields.into_content()?);
        Ok(())
    }

    fn typed_writer(&mut self) -> Option<&mut dyn TypedValueWriter> {
        self.probes += 1;
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use structrw_core::{probe_reader, FastPath};
    use structrw_serde::ValueInterface;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Version {
        major: u32,
        minor: u32,
    }

    /// Same shape as `Version` but a distinct type.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Release {
        major: u32,
        minor: u32,
    }

    #[test]
    fn exact_type_takes_fast_path_both_ways() {
        let interface = ValueInterface::<Version>::new();
        let mut cell = TypedCell::<Version>::new();

        interface
            .write_value(&mut cell, Some(&Version { major: 1, minor: 2 }))
            .unwrap();
        let back = interface.read_value(&mut cell).unwrap();

        assert_eq!(back, Some(Version { major: 1, minor: 2 }));
        assert_eq!(cell.probes(), 2);
        assert_eq!(cell.fallbacks(), 0);
    }

    #[test]
    fn other_types_fall_back_to_fields() {
        let mut cell = TypedCell::with(Version { major: 3, minor: 4 });

        let release = ValueInterface::<Release>::new()
            .read_value(&mut cell)
            .unwrap();
        assert_eq!(release, Some(Release { major: 3, minor: 4 }));

        ValueInterface::new()
            .write_value(&mut cell, Some(&Release { major: 5, minor: 0 }))
            .unwrap();
        assert_eq!(cell.get(), Some(&Version { major: 5, minor: 0 }));

        assert_eq!(cell.probes(), 2);
        assert_eq!(cell.fallbacks(), 2);
    }

    #[test]
    fn empty_cell_reads_as_null() {
        let mut cell = TypedCell::<Version>::new();
        assert_eq!(cell.read_value().unwrap(), Value::Null);

        let mut slot: Option<Version> = Some(Version { major: 0, minor: 0 });
        if let FastPath::Specialized(handler) = probe_reader::<Version>(&mut cell) {
            handler.read_typed(&mut slot).unwrap();
        }
        assert_eq!(slot, None);
    }

    #[test]
    fn empty_cell_reads_as_none_on_both_paths() {
        let mut cell = TypedCell::<Version>::new();

        assert_eq!(ValueInterface::<Version>::new().read_value(&mut cell).unwrap(), None);
        assert_eq!(ValueInterface::<Release>::new().read_value(&mut cell).unwrap(), None);
        assert_eq!(cell.fallbacks(), 0);
    }

    #[test]
    fn empty_cell_has_no_fields() {
        let mut cell = TypedCell::<Version>::new();
        let mut fields = StructuralRW::<Release>::new();
        let err = cell.read_object(&mut fields).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { found: "null", .. }));
    }

    #[test]
    fn null_write_clears_the_cell() {
        let interface = ValueInterface::<Version>::new();
        let mut cell = TypedCell::with(Version { major: 1, minor: 0 });

        interface.write_value(&mut cell, None).unwrap();

        assert_eq!(cell.get(), None);
        assert_eq!(interface.read_value(&mut cell).unwrap(), None);
        assert_eq!(cell.probes(), 1);
    }

    #[test]
    fn whole_values_convert_through_serde() {
        let mut cell = TypedCell::<Version>::new();
        cell.write_value(Value::Map(
            [
                ("major".to_string(), Value::Integer(2)),
                ("minor".to_string(), Value::Integer(9)),
            ]
            .into_iter()
            .collect(),
        ))
        .unwrap();
        assert_eq!(cell.get(), Some(&Version { major: 2, minor: 9 }));

        cell.write_value(Value::Null).unwrap();
        assert_eq!(cell.into_inner(), None);
    }

    #[test]
    fn wrong_slot_type_is_reported() {
        let mut cell = TypedCell::with(Version { major: 1, minor: 0 });
        let mut slot: Option<Release> = None;
        assert!(cell.read_typed(&mut slot).is_err());
        assert!(cell.write_typed(&7u8).is_err());
    }
}
