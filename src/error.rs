//! Error types for record and dataset operations.

/// Validation and lookup errors.
///
/// All operations fail fast: the first violation is reported and no partial
/// record or dataset is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("fields must be equal length arrays: field `{field}` has {got} rows, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("no field named `{0}`")]
    FieldNotFound(String),

    #[error("no split named `{0}`")]
    SplitNotFound(String),

    #[error("row index {index} out of bounds for {n_rows} rows")]
    RowOutOfBounds { index: usize, n_rows: usize },

    #[error("mask length ({got}) does not match number of rows ({expected})")]
    MaskLenMismatch { expected: usize, got: usize },

    #[error("record contains no feature fields")]
    NoFeatureFields,
}
