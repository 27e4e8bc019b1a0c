//! Ordinal-keyed row store.

use structrw_core::{
    DataReader, DataSource, DataWriter, Error, Keyed, Keys, ReferenceToken, Value, ValueFilter,
    ValueReader, ValueWriter,
};

/// One row of a result set: fixed columns, one cell per column.
///
/// Keyed by column ordinal. The set of keys never changes after
/// construction, so writing to an ordinal past the last column fails with
/// [`Error::KeyNotFound`] just as reading does. There is no direct-content
/// bypass; to address cells by text, wrap the row in an
/// [`AsDataReader`](structrw_core::AsDataReader) keyed by `String`.
pub struct RowStore {
    columns: Vec<String>,
    cells: Vec<Value>,
    token: ReferenceToken,
}

impl RowStore {
    /// A row with every cell null.
    pub fn new(columns: Vec<String>) -> Self {
        let cells = vec![Value::Null; columns.len()];
        Self {
            columns,
            cells,
            token: ReferenceToken::next(),
        }
    }

    /// A row with the given cells, one per column.
    pub fn with_cells(columns: Vec<String>, cells: Vec<Value>) -> Result<Self, Error> {
        if columns.len() != cells.len() {
            return Err(Error::other(format!(
                "row has {} columns but {} cells",
                columns.len(),
                cells.len()
            )));
        }
        Ok(Self {
            columns,
            cells,
            token: ReferenceToken::next(),
        })
    }

    /// Name of the column at `ordinal`.
    pub fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(String::as_str)
    }

    /// Ordinal of the column called `name`.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }
}

impl DataSource for RowStore {
    fn count(&self) -> usize {
        self.cells.len()
    }

    fn reference_token(&self) -> ReferenceToken {
        self.token
    }
}

impl Keyed<usize> for RowStore {
    fn keys(&self) -> Keys<'_, usize> {
        Box::new((0..self.cells.len()).map(Ok))
    }
}

impl DataReader<usize> for RowStore {
    fn value(&mut self, key: &usize) -> Result<&mut dyn ValueReader, Error> {
        match self.cells.get_mut(*key) {
            Some(cell) => Ok(cell),
            None => Err(Error::key_not_found(key)),
        }
    }

    fn on_read_all(&mut self, writer: &mut dyn DataWriter<usize>) -> Result<(), Error> {
        for (ordinal, cell) in self.cells.iter_mut().enumerate() {
            writer.on_write_value(&ordinal, cell)?;
        }
        Ok(())
    }

    fn on_read_all_filtered(
        &mut self,
        writer: &mut dyn DataWriter<usize>,
        filter: &mut dyn ValueFilter<usize>,
    ) -> Result<(), Error> {
        for (ordinal, cell) in self.cells.iter_mut().enumerate() {
            if filter.include(&ordinal)? {
                writer.on_write_value(&ordinal, cell)?;
            }
        }
        Ok(())
    }
}

impl DataWriter<usize> for RowStore {
    fn value_mut(&mut self, key: &usize) -> Result<&mut dyn ValueWriter, Error> {
        match self.cells.get_mut(*key) {
            Some(cell) => Ok(cell),
            None => Err(Error::key_not_found(key)),
        }
    }

    fn initialize(&mut self) -> Result<(), Error> {
        self.cells.iter_mut().for_each(|cell| *cell = Value::Null);
        Ok(())
    }

    fn on_write_all(&mut self, reader: &mut dyn DataReader<usize>) -> Result<(), Error> {
        reader.on_read_all(self)
    }
}
