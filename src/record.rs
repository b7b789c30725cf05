//! Single-split record container.

use std::fmt;

use ndarray::{ArrayD, Axis};

use crate::error::DatasetError;
use crate::field::{Field, FieldRole};
use crate::selection::RowSelection;

/// An equal-length collection of named fields for one split.
///
/// Fields keep their insertion order. The row count is validated across all
/// fields at construction and cached.
///
/// Every bulk operation returns a new value: [`select`](Record::select)
/// borrows and produces a fresh record, while [`map`](Record::map) and
/// [`normalise`](Record::normalise) consume the record and return the
/// transformed one, so call chains stay fluent.
///
/// # Example
///
/// ```
/// use splitframe::Record;
/// use ndarray::array;
///
/// let record = Record::from_arrays([
///     ("X", array![0.0f32, 10.0, 20.0].into_dyn()),
///     ("Y", array![0.0f32, 1.0, 0.0].into_dyn()),
/// ])
/// .unwrap();
///
/// assert_eq!(record.n_rows(), 3);
/// let subset = record.select(vec![0, 2]).unwrap();
/// assert_eq!(subset.n_rows(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
    n_rows: usize,
}

impl Record {
    /// Create a record from fields with explicit roles.
    ///
    /// The expected row count is taken from the first field; every later
    /// field must match it.
    ///
    /// # Errors
    ///
    /// [`DatasetError::LengthMismatch`] naming the first offending field.
    pub fn new(fields: Vec<Field>) -> Result<Self, DatasetError> {
        let n_rows = fields.first().map_or(0, Field::n_rows);

        for field in &fields {
            let got = field.n_rows();
            if got != n_rows {
                return Err(DatasetError::LengthMismatch {
                    field: field.name().to_string(),
                    expected: n_rows,
                    got,
                });
            }
        }

        Ok(Self { fields, n_rows })
    }

    /// Create a record from named arrays, inferring each field's role from
    /// its name via [`FieldRole::from_name`].
    pub fn from_arrays<I, S>(arrays: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (S, ArrayD<f32>)>,
        S: Into<String>,
    {
        let fields = arrays
            .into_iter()
            .map(|(name, values)| {
                let name = name.into();
                let role = FieldRole::from_name(&name);
                Field::new(name, role, values)
            })
            .collect();
        Self::new(fields)
    }

    /// Create a builder for explicit-role construction.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::new()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Row count cached at construction.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of fields.
    pub fn n_fields(&self) -> usize {
        self.fields.len()
    }

    /// The fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterator over field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    /// Look up a field by name.
    ///
    /// # Errors
    ///
    /// [`DatasetError::FieldNotFound`] if no field has that name.
    pub fn field(&self, name: &str) -> Result<&Field, DatasetError> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| DatasetError::FieldNotFound(name.to_string()))
    }

    /// Look up a field's values by name.
    ///
    /// # Errors
    ///
    /// [`DatasetError::FieldNotFound`] if no field has that name.
    pub fn get(&self, name: &str) -> Result<&ArrayD<f32>, DatasetError> {
        self.field(name).map(Field::values)
    }

    /// Row count of the first feature field.
    ///
    /// Unlike [`n_rows`](Record::n_rows), which is cached at construction,
    /// this reads the feature field directly; the two can diverge after a
    /// [`map`](Record::map) that breaks the equal-length invariant.
    ///
    /// # Errors
    ///
    /// [`DatasetError::NoFeatureFields`] if the record has no feature field.
    pub fn n_samples(&self) -> Result<usize, DatasetError> {
        self.fields
            .iter()
            .find(|f| f.role().is_feature())
            .map(Field::n_rows)
            .ok_or(DatasetError::NoFeatureFields)
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Take rows from every field, producing a new record.
    ///
    /// The same selection is applied to each field along the first axis, so
    /// the result keeps the field set (names and roles) and the equal-length
    /// invariant without re-validation. [`RowSelection::One`] keeps the row
    /// axis and yields a one-row record.
    ///
    /// # Errors
    ///
    /// [`DatasetError::RowOutOfBounds`] or [`DatasetError::MaskLenMismatch`]
    /// from resolving the selection.
    pub fn select<S: Into<RowSelection>>(&self, selection: S) -> Result<Self, DatasetError> {
        let indices = selection.into().resolve(self.n_rows)?;

        let fields = self
            .fields
            .iter()
            .map(|f| {
                Field::new(
                    f.name().to_string(),
                    f.role(),
                    f.values().select(Axis(0), &indices),
                )
            })
            .collect();

        Ok(Self {
            fields,
            n_rows: indices.len(),
        })
    }

    /// Apply a transform to the full field vector and rebuild the record
    /// from the result.
    ///
    /// Cross-field lengths are NOT revalidated; the caller is responsible
    /// for returning equal-length fields. The cached row count is re-derived
    /// from the first returned field.
    pub fn map<F>(self, transform: F) -> Self
    where
        F: FnOnce(Vec<Field>) -> Vec<Field>,
    {
        let fields = transform(self.fields);
        let n_rows = fields.first().map_or(0, Field::n_rows);
        Self { fields, n_rows }
    }

    /// Gaussian-normalize every feature field with the given statistics.
    ///
    /// Each feature field's values become `(v - mean) / std` elementwise;
    /// label fields are untouched. A zero `std` is not guarded: IEEE
    /// infinities and NaNs propagate.
    pub fn normalise(mut self, mean: f32, std: f32) -> Self {
        for field in &mut self.fields {
            if field.role().is_feature() {
                field.values_mut().mapv_inplace(|v| (v - mean) / std);
            }
        }
        self
    }

    /// US-spelling alias for [`normalise`](Record::normalise).
    pub fn normalize(self, mean: f32, std: f32) -> Self {
        self.normalise(mean, std)
    }

    /// Condensed per-field summary: element type, shape, and value range.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|field| {
                let (min_val, max_val) = field.value_range();
                format!(
                    "{}: type f32, shape {:?}, range [{}, {}]",
                    field.name(),
                    field.values().shape(),
                    min_val,
                    max_val
                )
            })
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name(), field.values())?;
        }
        write!(f, "}}")
    }
}

/// Builder for explicit-role record construction.
///
/// # Example
///
/// ```
/// use splitframe::Record;
/// use ndarray::array;
///
/// let record = Record::builder()
///     .feature("pixels", array![[0.1f32], [0.5], [0.9]].into_dyn())
///     .label("digit", array![7.0f32, 3.0, 1.0].into_dyn())
///     .build()
///     .unwrap();
///
/// assert_eq!(record.n_rows(), 3);
/// ```
#[derive(Debug, Default)]
pub struct RecordBuilder {
    fields: Vec<Field>,
}

impl RecordBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature field.
    pub fn feature(mut self, name: impl Into<String>, values: ArrayD<f32>) -> Self {
        self.fields.push(Field::feature(name, values));
        self
    }

    /// Add a label field.
    pub fn label(mut self, name: impl Into<String>, values: ArrayD<f32>) -> Self {
        self.fields.push(Field::label(name, values));
        self
    }

    /// Add a pre-built field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the record, validating the equal-length invariant.
    ///
    /// # Errors
    ///
    /// [`DatasetError::LengthMismatch`] naming the first offending field.
    pub fn build(self) -> Result<Record, DatasetError> {
        Record::new(self.fields)
    }
}
