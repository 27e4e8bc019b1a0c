//! Typed reader and writer extension traits.

use serde::de::DeserializeOwned;
use serde::Serialize;

use structrw_core::{DataReader, DataWriter, Error};

use crate::interface::ValueInterface;

/// Extension trait for typed reads.
///
/// This trait is automatically implemented for all `DataReader` implementations.
/// Each read goes through [`ValueInterface`], so accessors with a typed fast
/// path for `T` are used directly.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use structrw_core::{DataReader, Error};
/// use structrw_serde::TypedReader;
///
/// #[derive(Deserialize, serde::Serialize)]
/// struct Address {
///     city: String,
///     zip: String,
/// }
///
/// fn billing_address(customer: &mut dyn DataReader<String>) -> Result<Option<Address>, Error> {
///     customer.read_as(&"billing".to_string())
/// }
/// ```
pub trait TypedReader<K>: DataReader<K> {
    /// Read the value at `key` as a `T`; a null value reads as `None`.
    fn read_as<T>(&mut self, key: &K) -> Result<Option<T>, Error>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        ValueInterface::<T>::new().read_value(self.value(key)?)
    }
}

// Blanket implementation for all DataReaders
impl<K, R: DataReader<K> + ?Sized> TypedReader<K> for R {}

/// Extension trait for typed writes.
///
/// This trait is automatically implemented for all `DataWriter` implementations.
pub trait TypedWriter<K>: DataWriter<K> {
    /// Write `data` at `key`; `None` writes null.
    fn write_as<T>(&mut self, key: &K, data: Option<&T>) -> Result<(), Error>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        ValueInterface::<T>::new().write_value(self.value_mut(key)?, data)
    }
}

// Blanket implementation for all DataWriters
impl<K, W: DataWriter<K> + ?Sized> TypedWriter<K> for W {}
