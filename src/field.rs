//! Named, role-tagged array columns.
//!
//! A [`Field`] is one named array within a record, tagged with a
//! [`FieldRole`] that decides whether normalization applies to it.
//! Values are stored as `f32` regardless of logical type.

use ndarray::{ArrayD, Axis};

/// How a field participates in normalization.
///
/// Features hold numeric input data and are rescaled by `normalise`;
/// labels hold target data and are never touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRole {
    /// Numeric input data, subject to normalization.
    Feature,

    /// Target data, never normalized.
    Label,
}

impl FieldRole {
    /// Infer a role from a field name.
    ///
    /// Names containing `X` (`"X"`, `"Xref"`, `"pixel_X"`) are treated as
    /// features, everything else as labels. This is the convention used by
    /// the raw-array constructors; builders take the role explicitly.
    pub fn from_name(name: &str) -> Self {
        if name.contains('X') {
            FieldRole::Feature
        } else {
            FieldRole::Label
        }
    }

    /// Returns true if this is a feature field.
    #[inline]
    pub fn is_feature(&self) -> bool {
        matches!(self, FieldRole::Feature)
    }

    /// Returns true if this is a label field.
    #[inline]
    pub fn is_label(&self) -> bool {
        matches!(self, FieldRole::Label)
    }
}

/// A single named column of a record.
///
/// The first axis of `values` indexes rows; any remaining axes are the
/// per-row shape (e.g. `[n, 28, 28, 1]` for image features).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    role: FieldRole,
    values: ArrayD<f32>,
}

impl Field {
    /// Create a field with an explicit role.
    pub fn new(name: impl Into<String>, role: FieldRole, values: ArrayD<f32>) -> Self {
        Self {
            name: name.into(),
            role,
            values,
        }
    }

    /// Create a feature field.
    pub fn feature(name: impl Into<String>, values: ArrayD<f32>) -> Self {
        Self::new(name, FieldRole::Feature, values)
    }

    /// Create a label field.
    pub fn label(name: impl Into<String>, values: ArrayD<f32>) -> Self {
        Self::new(name, FieldRole::Label, values)
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field role.
    #[inline]
    pub fn role(&self) -> FieldRole {
        self.role
    }

    /// Field values.
    pub fn values(&self) -> &ArrayD<f32> {
        &self.values
    }

    /// Mutable access to the field values.
    pub fn values_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.values
    }

    /// Number of rows (length of the first axis; 0 for a scalar array).
    pub fn n_rows(&self) -> usize {
        if self.values.ndim() == 0 {
            0
        } else {
            self.values.len_of(Axis(0))
        }
    }

    /// Returns true if the field has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Minimum and maximum over all elements.
    ///
    /// Returns `(inf, -inf)` for an empty field.
    pub fn value_range(&self) -> (f32, f32) {
        let mut min_val = f32::INFINITY;
        let mut max_val = f32::NEG_INFINITY;
        for &v in self.values.iter() {
            min_val = min_val.min(v);
            max_val = max_val.max(v);
        }
        (min_val, max_val)
    }
}
