//! Bulk-iteration forwarders.
//!
//! A read-all pass is driven by the inner store, which only speaks its own key
//! type `A`. These forwarders sit between that pass and the caller's `B`-keyed
//! writer or filter, converting one key at a time as the pass emits it.

use crate::bridge::AsDataReader;
use crate::convert::{convert, ConvertFrom, Key};
use crate::{
    DataReader, DataSource, DataWriter, DirectContent, Error, Keyed, Keys, ReferenceToken,
    ValueFilter, ValueReader, ValueWriter,
};

/// Presents an outer `DataWriter<B>` to an inner pass as a `DataWriter<A>`.
///
/// Every key the inner pass emits is converted `A -> B` and handed, with its
/// value accessor, to the outer writer. A conversion failure aborts the pass;
/// entries written before it stay written.
pub struct AsReadAllWriter<'w, A, B> {
    outer: &'w mut dyn DataWriter<B>,
    marker: std::marker::PhantomData<fn(B) -> A>,
}

impl<'w, A, B> AsReadAllWriter<'w, A, B> {
    pub fn new(outer: &'w mut dyn DataWriter<B>) -> Self {
        Self {
            outer,
            marker: std::marker::PhantomData,
        }
    }
}

impl<A, B> DataSource for AsReadAllWriter<'_, A, B> {
    fn count(&self) -> usize {
        self.outer.count()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.outer.reference_token()
    }

    fn direct_content(&mut self) -> Option<&mut dyn DirectContent> {
        self.outer.direct_content()
    }
}

impl<A, B> Keyed<A> for AsReadAllWriter<'_, A, B>
where
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn keys(&self) -> Keys<'_, A> {
        Box::new(
            self.outer
                .keys()
                .map(|key| key.and_then(|key| convert::<A, B>(&key))),
        )
    }
}

impl<A, B> DataWriter<A> for AsReadAllWriter<'_, A, B>
where
    A: Key + ConvertFrom<B>,
    B: Key + ConvertFrom<A>,
{
    fn value_mut(&mut self, key: &A) -> Result<&mut dyn ValueWriter, Error> {
        let key = convert::<B, A>(key)?;
        self.outer.value_mut(&key)
    }

    fn initialize(&mut self) -> Result<(), Error> {
        self.outer.initialize()
    }

    fn on_write_value(&mut self, key: &A, reader: &mut dyn ValueReader) -> Result<(), Error> {
        let key = convert::<B, A>(key)?;
        self.outer.on_write_value(&key, reader)
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<A>) -> Result<(), Error> {
        self.outer
            .on_write_all(&mut AsDataReader::<_, A, B>::new(reader))
    }
}

/// Presents an outer `ValueFilter<B>` to an inner pass as a `ValueFilter<A>`.
///
/// The outer filter is consulted exactly once per inner key and its decision
/// is relayed unchanged.
pub struct AsReadAllFilter<'f, A, B> {
    outer: &'f mut dyn ValueFilter<B>,
    marker: std::marker::PhantomData<fn(A)>,
}

impl<'f, A, B> AsReadAllFilter<'f, A, B> {
    pub fn new(outer: &'f mut dyn ValueFilter<B>) -> Self {
        Self {
            outer,
            marker: std::marker::PhantomData,
        }
    }
}

impl<A, B> ValueFilter<A> for AsReadAllFilter<'_, A, B>
where
    B: ConvertFrom<A>,
{
    fn include(&mut self, key: &A) -> Result<bool, Error> {
        let key = convert::<B, A>(key)?;
        self.outer.include(&key)
    }
}
