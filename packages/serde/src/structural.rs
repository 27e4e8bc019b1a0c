//! Field-by-field view of a serde type.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use structrw_core::{
    DataReader, DataSource, DataWriter, DirectContent, Error, Keyed, Keys, ReferenceToken, Value,
    ValueFilter, ValueReader, ValueWriter,
};

use crate::convert::{from_value, to_value};

/// Exposes an object-shaped `T` as a store keyed by field name.
///
/// As a writer it is populated one field at a time and then turned into a `T`
/// with [`into_content`](Self::into_content). As a reader it is initialized
/// from an existing `T` and enumerates that value's fields in name order.
///
/// `T` must serialize as a map (a struct or a map type). Anything else is
/// rejected when the adapter is initialized.
pub struct StructuralRW<T> {
    fields: BTreeMap<String, Value>,
    token: ReferenceToken,
    content: PhantomData<fn() -> T>,
}

impl<T> StructuralRW<T> {
    /// An adapter with no fields, ready to be written.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            token: ReferenceToken::next(),
            content: PhantomData,
        }
    }

    /// The raw field values collected so far.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl<T> Default for StructuralRW<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> StructuralRW<T> {
    /// An adapter holding the fields of `content`.
    pub fn from_content(content: &T) -> Result<Self, Error> {
        let mut adapter = Self::new();
        adapter.initialize_from(content)?;
        Ok(adapter)
    }

    /// Replace the held fields with those of `content`.
    pub fn initialize_from(&mut self, content: &T) -> Result<(), Error> {
        self.fields = match to_value(content)? {
            Value::Map(fields) => fields,
            other => {
                return Err(Error::encode(format!(
                    "{} is a {}, not an object",
                    std::any::type_name::<T>(),
                    other.kind()
                )))
            }
        };
        Ok(())
    }
}

impl<T: DeserializeOwned> StructuralRW<T> {
    /// Build a `T` from the collected fields.
    pub fn into_content(self) -> Result<T, Error> {
        from_value(Value::Map(self.fields))
    }
}

impl<T> DataSource for StructuralRW<T> {
    fn count(&self) -> usize {
        self.fields.len()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.token
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        Some(self)
    }
}

impl<T> DirectContent for StructuralRW<T> {
    fn get_content(&mut self) -> Result<Value, Error> {
        Ok(Value::Map(self.fields.clone()))
    }

    fn set_content(&mut self, content: Value) -> Result<(), Error> {
        self.fields = content.into_map()?;
        Ok(())
    }
}

impl<T> Keyed<String> for StructuralRW<T> {
    fn keys(&self) -> Keys<'_, String> {
        Box::new(self.fields.keys().cloned().map(Ok))
    }
}

impl<T> DataReader<String> for StructuralRW<T> {
    fn value(&mut self, key: &String) -> Result<&mut dyn ValueReader, Error> {
        match self.fields.get_mut(key) {
            Some(field) => Ok(field),
            None => Err(Error::key_not_found(key)),
        }
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<String>) -> Result<(), Error> {
        for (name, field) in self.fields.iter_mut() {
            writer.on_write_value(name, field)?;
        }
        Ok(())
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<String>,
        filter: &mut dyn ValueFilter<String>,
    ) -> Result<(), Error> {
        for (name, field) in self.fields.iter_mut() {
            if filter.include(name)? {
                writer.on_write_value(name, field)?;
            }
        }
        Ok(())
    }
}

impl<T> DataWriter<String> for StructuralRW<T> {
    fn value_mut(&mut self, key: &String) -> Result<&mut dyn ValueWriter, Error> {
        Ok(self.fields.entry(key.clone()).or_insert(Value::Null))
    }

    fn initialize(&mut self) -> Result<(), Error> {
        self.fields.clear();
        Ok(())
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<String>) -> Result<(), Error> {
        reader.on_read_all(self)
    }
}
