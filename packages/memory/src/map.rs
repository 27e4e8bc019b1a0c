//! Name-keyed in-memory store.

use std::collections::BTreeMap;

use structrw_core::{
    DataReader, DataSource, DataWriter, DirectContent, Error, Keyed, Keys, ReferenceToken, Value,
    ValueFilter, ValueReader, ValueWriter,
};

/// An in-memory store of named values.
///
/// Keys enumerate in sorted order. Writing to an unknown key creates it.
/// The whole map can be fetched or replaced at once through
/// [`DirectContent`].
///
/// # Example
///
/// ```rust
/// use structrw_core::{DataReader, DataWriter, Value};
/// use structrw_memory::MapStore;
///
/// let mut store = MapStore::new();
/// store
///     .value_mut(&"name".to_string())
///     .unwrap()
///     .write_value(Value::from("Alice"))
///     .unwrap();
///
/// let value = store.value(&"name".to_string()).unwrap().read_value().unwrap();
/// assert_eq!(value, Value::from("Alice"));
/// ```
pub struct MapStore {
    entries: BTreeMap<String, Value>,
    token: ReferenceToken,
}

impl MapStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::with_entries(BTreeMap::new())
    }

    /// Create a store with initial entries.
    pub fn with_entries(entries: BTreeMap<String, Value>) -> Self {
        Self {
            entries,
            token: ReferenceToken::next(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl Default for MapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for MapStore {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.token
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        Some(self)
    }
}

impl DirectContent for MapStore {
    fn get_content(&mut self) -> Result<Value, Error> {
        Ok(Value::Map(self.entries.clone()))
    }

    fn set_content(&mut self, content: Value) -> Result<(), Error> {
        self.entries = content.into_map()?;
        log::debug!(
            "replaced content of {:?} ({} entries)",
            self.token,
            self.entries.len()
        );
        Ok(())
    }
}

impl Keyed<String> for MapStore {
    fn keys(&self) -> Keys<'_, String> {
        Box::new(self.entries.keys().cloned().map(Ok))
    }
}

impl DataReader<String> for MapStore {
    fn value(&mut self, key: &String) -> Result<&mut dyn ValueReader, Error> {
        match self.entries.get_mut(key) {
            Some(value) => Ok(value),
            None => Err(Error::key_not_found(key)),
        }
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<String>) -> Result<(), Error> {
        for (key, value) in self.entries.iter_mut() {
            writer.on_write_value(key, value)?;
        }
        Ok(())
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<String>,
        filter: &mut dyn ValueFilter<String>,
    ) -> Result<(), Error> {
        for (key, value) in self.entries.iter_mut() {
            if filter.include(key)? {
                writer.on_write_value(key, value)?;
            }
        }
        Ok(())
    }
}

impl DataWriter<String> for MapStore {
    fn value_mut(&mut self, key: &String) -> Result<&mut dyn ValueWriter, Error> {
        Ok(self.entries.entry(key.clone()).or_insert(Value::Null))
    }

    fn initialize(&mut self) -> Result<(), Error> {
        log::debug!("clearing {:?}", self.token);
        self.entries.clear();
        Ok(())
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<String>) -> Result<(), Error> {
        reader.on_read_all(self)
    }
}
