//! Shared checks for `DataReader` / `DataWriter` implementations.
//!
//! Store crates enable the `test-utils` feature and call these from their own
//! tests. Each check panics with a descriptive message on failure.

use crate::convert::Key;
use crate::{
    DataReader, DataSource, DataWriter, DirectContent, Error, Keyed, Keys, ReferenceToken, Value,
    ValueFilter, ValueReader, ValueWriter,
};

/// An ordered store of `(key, value)` pairs, keyed by any `K`.
///
/// Writing to a key that is not present appends it.
pub struct VecStore<K> {
    entries: Vec<(K, Value)>,
    token: ReferenceToken,
    direct: bool,
}

impl<K: Key> VecStore<K> {
    pub fn new(entries: Vec<(K, Value)>) -> Self {
        Self {
            entries,
            token: ReferenceToken::next(),
            direct: false,
        }
    }

    /// Enable the direct-content capability.
    ///
    /// The payload is the value array in key order. Setting it replaces the
    /// values only, so it must hold exactly one value per key.
    pub fn with_direct_content(mut self) -> Self {
        self.direct = true;
        self
    }

    pub fn get(&self, key: &K) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(K, Value)] {
        &self.entries
    }
}

impl<K: Key> DataSource for VecStore<K> {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.token
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        if !self.direct {
            return None;
        }
        Some(self)
    }
}

impl<K: Key> DirectContent for VecStore<K> {
    fn get_content(&mut self) -> Result<Value, Error> {
        Ok(Value::Array(
            self.entries.iter().map(|(_, v)| v.clone()).collect(),
        ))
    }

    fn set_content(&mut self, content: Value) -> Result<(), Error> {
        let values = match content {
            Value::Array(values) => values,
            other => {
                return Err(Error::TypeMismatch {
                    expected: "array",
                    found: other.kind(),
                })
            }
        };
        if values.len() != self.entries.len() {
            return Err(Error::other(format!(
                "{} values for {} keys",
                values.len(),
                self.entries.len()
            )));
        }
        for (entry, value) in self.entries.iter_mut().zip(values) {
            entry.1 = value;
        }
        Ok(())
    }
}

impl<K: Key> Keyed<K> for VecStore<K> {
    fn keys(&self) -> Keys<'_, K> {
        Box::new(self.entries.iter().map(|(k, _)| Ok(k.clone())))
    }
}

impl<K: Key> DataReader<K> for VecStore<K> {
    fn value(&mut self, key: &K) -> Result<&mut dyn ValueReader, Error> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, value)) => Ok(value),
            None => Err(Error::key_not_found(key)),
        }
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<K>) -> Result<(), Error> {
        for (key, value) in self.entries.iter_mut() {
            writer.on_write_value(key, value)?;
        }
        Ok(())
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<K>,
        filter: &mut dyn ValueFilter<K>,
    ) -> Result<(), Error> {
        for (key, value) in self.entries.iter_mut() {
            if filter.include(key)? {
                writer.on_write_value(key, value)?;
            }
        }
        Ok(())
    }
}

impl<K: Key> DataWriter<K> for VecStore<K> {
    fn value_mut(&mut self, key: &K) -> Result<&mut dyn ValueWriter, Error> {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.clone(), Value::Null));
                self.entries.len() - 1
            }
        };
        Ok(&mut self.entries[index].1)
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<K>) -> Result<(), Error> {
        reader.on_read_all(self)
    }
}

/// A writer that records every entry handed to it, in arrival order.
pub struct RecordingWriter<K> {
    pub entries: Vec<(K, Value)>,
    token: ReferenceToken,
}

impl<K: Key> RecordingWriter<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            token: ReferenceToken::next(),
        }
    }

    pub fn keys_seen(&self) -> Vec<K> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

impl<K: Key> Default for RecordingWriter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> DataSource for RecordingWriter<K> {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.token
    }
}

impl<K: Key> Keyed<K> for RecordingWriter<K> {
    fn keys(&self) -> Keys<'_, K> {
        Box::new(self.entries.iter().map(|(k, _)| Ok(k.clone())))
    }
}

impl<K: Key> DataWriter<K> for RecordingWriter<K> {
    fn value_mut(&mut self, key: &K) -> Result<&mut dyn ValueWriter, Error> {
        self.entries.push((key.clone(), Value::Null));
        let last = self.entries.len() - 1;
        Ok(&mut self.entries[last].1)
    }

    fn on_write_value(&mut self, key: &K, reader: &mut dyn ValueReader) -> Result<(), Error> {
        self.entries.push((key.clone(), reader.read_value()?));
        Ok(())
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<K>) -> Result<(), Error> {
        reader.on_read_all(self)
    }
}

fn collect_keys<K: Key>(reader: &impl Keyed<K>) -> Vec<K> {
    reader
        .keys()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("key enumeration failed: {}", e))
}

/// `count()` equals the number of distinct enumerated keys.
pub fn keys_match_count<K: Key>(reader: &impl Keyed<K>) {
    let keys = collect_keys(reader);
    assert_eq!(keys.len(), reader.count(), "count disagrees with keys");
    for (i, key) in keys.iter().enumerate() {
        assert!(
            !keys[i + 1..].contains(key),
            "key {:?} enumerated twice",
            key
        );
    }
}

/// Every enumerated key resolves through `value()`.
pub fn every_key_resolves<K: Key>(reader: &mut impl DataReader<K>) {
    for key in collect_keys(reader) {
        let value = reader.value(&key).and_then(|v| v.read_value());
        assert!(value.is_ok(), "key {:?} did not resolve: {:?}", key, value);
    }
}

/// A read-all pass visits each key once, in enumeration order, with the
/// value a lookup would give.
pub fn read_all_matches_keys<K: Key>(reader: &mut impl DataReader<K>) {
    let keys = collect_keys(reader);
    let mut writer = RecordingWriter::<K>::new();
    reader.on_read_all(&mut writer).unwrap();

    assert_eq!(writer.keys_seen(), keys, "read-all order differs from keys");
    for (key, seen) in writer.entries {
        let looked_up = reader.value(&key).and_then(|v| v.read_value()).unwrap();
        assert_eq!(seen, looked_up, "read-all value differs for {:?}", key);
    }
}

/// A filtered pass consults the filter once per key and writes only what
/// the filter accepts.
pub fn filter_sees_each_key_once<K: Key>(reader: &mut impl DataReader<K>) {
    let keys = collect_keys(reader);
    let mut consulted = Vec::new();
    let mut writer = RecordingWriter::<K>::new();
    {
        let mut first_only = |key: &K| {
            consulted.push(key.clone());
            consulted.len() == 1
        };
        reader
            .on_read_all_filtered(&mut writer, &mut first_only)
            .unwrap();
    }

    assert_eq!(consulted, keys, "filter was not consulted once per key");
    assert_eq!(writer.keys_seen(), keys.into_iter().take(1).collect::<Vec<_>>());
}

/// A value written through `value_mut()` reads back through `value()`.
pub fn write_then_read_back<K, S>(store: &mut S, key: K, value: Value)
where
    K: Key,
    S: DataReader<K> + DataWriter<K>,
{
    store
        .value_mut(&key)
        .and_then(|sink| sink.write_value(value.clone()))
        .unwrap_or_else(|e| panic!("write to {:?} failed: {}", key, e));
    let read = store.value(&key).and_then(|v| v.read_value()).unwrap();
    assert_eq!(read, value);
}
