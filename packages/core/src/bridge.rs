//! Key-bridging adapters.
//!
//! These adapters expose a store keyed by `A` as a store keyed by `B`. Every
//! key crossing the adapter goes through the conversion service; nothing is
//! cached, so the observed key space is exactly the image of the inner one.
//!
//! # Reader Bridge
//!
//! ```rust,ignore
//! let mut row = RowStore::new(columns, cells);          // keyed by usize
//! let mut by_text = AsDataReader::<_, usize, String>::new(&mut row);
//! let name = by_text.value(&"1".to_string())?.read_value()?;
//! ```
//!
//! # Writer Bridge
//!
//! ```rust,ignore
//! let mut row = RowStore::new(columns, cells);
//! let mut by_text = AsDataWriter::<_, usize, String>::new(&mut row);
//! by_text.value_mut(&"1".to_string())?.write_value(Value::from("Bob"))?;
//! ```

use std::marker::PhantomData;

use crate::convert::{convert, ConvertFrom, Key};
use crate::error::{AccessSide, ContentOperation};
use crate::forward::{AsReadAllFilter, AsReadAllWriter};
use crate::{
    DataReader, DataSource, DataWriter, DirectContent, Error, Keyed, Keys, ReferenceToken, Value,
    ValueFilter, ValueReader, ValueWriter,
};

/// Exposes a `DataReader<A>` as a `DataReader<B>`.
///
/// The inner store is usually a `&mut` borrow, so the adapter cannot outlive
/// it. The adapter holds nothing besides that reference.
pub struct AsDataReader<R, A, B> {
    inner: R,
    keys: PhantomData<fn(A) -> B>,
}

impl<R, A, B> AsDataReader<R, A, B> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            keys: PhantomData,
        }
    }

    /// Get a reference to the inner reader.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R, A, B> DataSource for AsDataReader<R, A, B>
where
    R: DataReader<A>,
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.inner.reference_token()
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        Some(self)
    }
}

impl<R, A, B> Keyed<B> for AsDataReader<R, A, B>
where
    R: DataReader<A>,
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn keys(&self) -> Keys<'_, B> {
        Box::new(
            self.inner
                .keys()
                .map(|key| key.and_then(|key| convert::<B, A>(&key))),
        )
    }
}

impl<R, A, B> DataReader<B> for AsDataReader<R, A, B>
where
    R: DataReader<A>,
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn value(&mut self, key: &B) -> Result<&mut dyn ValueReader, Error> {
        let key = convert::<A, B>(key)?;
        self.inner.value(&key)
    }

    fn on_read_value(&mut self, key: &B, writer: &mut dyn ValueWriter) -> Result<(), Error> {
        let key = convert::<A, B>(key)?;
        self.inner.on_read_value(&key, writer)
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<B>) -> Result<(), Error> {
        log::trace!(
            "bridged read-all over {:?} ({} keys)",
            self.inner.reference_token(),
            self.inner.count()
        );
        self.inner
            .on_read_all(&mut AsReadAllWriter::<A, B>::new(writer))
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<B>,
        filter: &mut dyn ValueFilter<B>,
    ) -> Result<(), Error> {
        log::trace!(
            "bridged filtered read-all over {:?}",
            self.inner.reference_token()
        );
        self.inner.on_read_all_filtered(
            &mut AsReadAllWriter::<A, B>::new(writer),
            &mut AsReadAllFilter::<A, B>::new(filter),
        )
    }
}

impl<R, A, B> DirectContent for AsDataReader<R, A, B>
where
    R: DataSource,
{
    fn get_content(&mut self) -> Result<Value, Error> {
        forward_get(&mut self.inner, AccessSide::Reader)
    }

    fn set_content(&mut self, content: Value) -> Result<(), Error> {
        forward_set(&mut self.inner, AccessSide::Reader, content)
    }
}

/// Exposes a `DataWriter<A>` as a `DataWriter<B>`.
pub struct AsDataWriter<W, A, B> {
    inner: W,
    keys: PhantomData<fn(A) -> B>,
}

impl<W, A, B> AsDataWriter<W, A, B> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            keys: PhantomData,
        }
    }

    /// Get a reference to the inner writer.
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the inner writer.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W, A, B> DataSource for AsDataWriter<W, A, B>
where
    W: DataWriter<A>,
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.inner.reference_token()
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        Some(self)
    }
}

impl<W, A, B> Keyed<B> for AsDataWriter<W, A, B>
where
    W: DataWriter<A>,
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn keys(&self) -> Keys<'_, B> {
        Box::new(
            self.inner
                .keys()
                .map(|key| key.and_then(|key| convert::<B, A>(&key))),
        )
    }
}

impl<W, A, B> DataWriter<B> for AsDataWriter<W, A, B>
where
    W: DataWriter<A>,
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn value_mut(&mut self, key: &B) -> Result<&mut dyn ValueWriter, Error> {
        let key = convert::<A, B>(key)?;
        self.inner.value_mut(&key)
    }

    fn initialize(&mut self) -> Result<(), Error> {
        self.inner.initialize()
    }

    fn on_write_value(&mut self, key: &B, reader: &mut dyn ValueReader) -> Result<(), Error> {
        let key = convert::<A, B>(key)?;
        self.inner.on_write_value(&key, reader)
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<B>) -> Result<(), Error> {
        log::trace!(
            "bridged write-all into {:?}",
            self.inner.reference_token()
        );
        self.inner
            .on_write_all(&mut AsDataReader::<_, B, A>::new(reader))
    }
}

impl<W, A, B> DirectContent for AsDataWriter<W, A, B>
where
    W: DataSource,
{
    fn get_content(&mut self) -> Result<Value, Error> {
        forward_get(&mut self.inner, AccessSide::Writer)
    }

    fn set_content(&mut self, content: Value) -> Result<(), Error> {
        forward_set(&mut self.inner, AccessSide::Writer, content)
    }
}

fn forward_get<S: DataSource + ?Sized>(inner: &mut S, side: AccessSide) -> Result<Value, Error> {
    match inner.direct_content() {
        Some(content) => content.get_content(),
        None => {
            log::debug!("direct content get rejected: inner data {} lacks it", side);
            Err(Error::unsupported(side, ContentOperation::Get))
        }
    }
}

fn forward_set<S: DataSource + ?Sized>(
    inner: &mut S,
    side: AccessSide,
    content: Value,
) -> Result<(), Error> {
    match inner.direct_content() {
        Some(target) => target.set_content(content),
        None => {
            log::debug!("direct content set rejected: inner data {} lacks it", side);
            Err(Error::unsupported(side, ContentOperation::Set))
        }
    }
}
