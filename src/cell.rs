//! Cell values and the in-memory table handed to every exporter.

/// A single cell value.
///
/// The set of variants is closed: every output path matches on it
/// exhaustively. A non-finite [`Cell::Number`] is rendered as an empty cell
/// everywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    #[default]
    Empty,
}

impl Cell {
    /// Check whether the cell renders as nothing at all.
    ///
    /// Empty text counts as empty, and so does a NaN or infinite number.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(n) => !n.is_finite(),
            Cell::Bool(_) => false,
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<&String> for Cell {
    fn from(value: &String) -> Self {
        Cell::Text(value.clone())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<f32> for Cell {
    fn from(value: f32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Cell {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $t) -> Self {
                    Cell::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// One table row. Column index is the position in the vector; rows may be
/// shorter than the widest row.
pub type Row = Vec<Cell>;

/// An ordered list of rows. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from anything that yields rows of cell-convertible values.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabex::{Cell, Table};
    ///
    /// let table = Table::from_rows([
    ///     vec![Cell::from("Type"), Cell::from("Amount")],
    ///     vec![Cell::from("Income"), Cell::from(1200)],
    /// ]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.column_count(), 2);
    /// ```
    pub fn from_rows<R, I, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        rows.into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Row>())
            .collect()
    }

    /// Append a row.
    pub fn push_row<I, C>(&mut self, row: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows, header included.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<T: IntoIterator<Item = Row>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}
