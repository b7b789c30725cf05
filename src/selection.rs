//! Row selection for `select` operations.

use std::ops::Range;

use crate::error::DatasetError;

/// Which rows to take from a record.
///
/// Mirrors numpy-style indexing: a single position, a list of positions
/// (duplicates allowed, rows are repeated), or a boolean mask whose length
/// must match the row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelection {
    /// A single row. The row axis is kept, producing a one-row result.
    One(usize),

    /// An explicit list of row positions.
    Rows(Vec<usize>),

    /// A boolean mask over all rows; `true` keeps the row.
    Mask(Vec<bool>),
}

impl RowSelection {
    /// Resolve to concrete row indices against a record of `n_rows` rows.
    ///
    /// # Errors
    ///
    /// [`DatasetError::RowOutOfBounds`] for positions past `n_rows`,
    /// [`DatasetError::MaskLenMismatch`] for a mask of the wrong length.
    pub fn resolve(&self, n_rows: usize) -> Result<Vec<usize>, DatasetError> {
        match self {
            RowSelection::One(index) => {
                if *index >= n_rows {
                    return Err(DatasetError::RowOutOfBounds {
                        index: *index,
                        n_rows,
                    });
                }
                Ok(vec![*index])
            }
            RowSelection::Rows(rows) => {
                for &index in rows {
                    if index >= n_rows {
                        return Err(DatasetError::RowOutOfBounds { index, n_rows });
                    }
                }
                Ok(rows.clone())
            }
            RowSelection::Mask(mask) => {
                if mask.len() != n_rows {
                    return Err(DatasetError::MaskLenMismatch {
                        expected: n_rows,
                        got: mask.len(),
                    });
                }
                Ok(mask
                    .iter()
                    .enumerate()
                    .filter(|(_, &keep)| keep)
                    .map(|(i, _)| i)
                    .collect())
            }
        }
    }
}

impl From<usize> for RowSelection {
    fn from(index: usize) -> Self {
        RowSelection::One(index)
    }
}

impl From<Vec<usize>> for RowSelection {
    fn from(rows: Vec<usize>) -> Self {
        RowSelection::Rows(rows)
    }
}

impl From<&[usize]> for RowSelection {
    fn from(rows: &[usize]) -> Self {
        RowSelection::Rows(rows.to_vec())
    }
}

impl From<Range<usize>> for RowSelection {
    fn from(range: Range<usize>) -> Self {
        RowSelection::Rows(range.collect())
    }
}

impl From<Vec<bool>> for RowSelection {
    fn from(mask: Vec<bool>) -> Self {
        RowSelection::Mask(mask)
    }
}
