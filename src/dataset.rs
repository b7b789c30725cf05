//! Whole-dataset container keyed by split name.

use std::fmt;

use ndarray::ArrayD;

use crate::error::DatasetError;
use crate::field::Field;
use crate::record::Record;
use crate::selection::RowSelection;

/// A named collection of split records (train/test/validation/etc.).
///
/// Splits keep their insertion order. Operations follow the same value
/// semantics as [`Record`]: [`select`](Dataset::select) borrows and returns
/// a fresh dataset, [`map`](Dataset::map) and
/// [`normalise`](Dataset::normalise) consume `self` and return the
/// transformed dataset.
///
/// # Example
///
/// ```
/// use splitframe::Dataset;
/// use ndarray::array;
///
/// let ds = Dataset::from_arrays([
///     ("train", vec![
///         ("X", array![0.0f32, 10.0, 20.0].into_dyn()),
///         ("Y", array![0.0f32, 1.0, 0.0].into_dyn()),
///     ]),
///     ("test", vec![
///         ("X", array![5.0f32, 15.0].into_dyn()),
///         ("Y", array![1.0f32, 0.0].into_dyn()),
///     ]),
/// ])
/// .unwrap();
///
/// let ds = ds.normalise().unwrap();
/// assert!(ds.split("test").unwrap().get("X").unwrap()[[0]] < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    splits: Vec<(String, Record)>,
}

impl Dataset {
    /// Canonical name of the split that normalization statistics come from.
    pub const TRAIN: &'static str = "train";

    /// Create a dataset from pre-built records.
    pub fn from_records<I, S>(splits: I) -> Self
    where
        I: IntoIterator<Item = (S, Record)>,
        S: Into<String>,
    {
        Self {
            splits: splits
                .into_iter()
                .map(|(name, record)| (name.into(), record))
                .collect(),
        }
    }

    /// Create a dataset from nested raw arrays, split name to named arrays.
    ///
    /// Each split is wrapped via [`Record::from_arrays`], so field roles
    /// follow the name convention and the equal-length invariant is
    /// validated per split.
    ///
    /// # Errors
    ///
    /// [`DatasetError::LengthMismatch`] from the first invalid split.
    pub fn from_arrays<I, S, R, T>(splits: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: IntoIterator<Item = (T, ArrayD<f32>)>,
        T: Into<String>,
    {
        let mut built = Vec::new();
        for (name, arrays) in splits {
            built.push((name.into(), Record::from_arrays(arrays)?));
        }
        Ok(Self { splits: built })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of splits.
    pub fn n_splits(&self) -> usize {
        self.splits.len()
    }

    /// Iterator over split names in insertion order.
    ///
    /// Each call produces a fresh iterator.
    pub fn splits(&self) -> impl Iterator<Item = &str> {
        self.splits.iter().map(|(name, _)| name.as_str())
    }

    /// Iterator over `(name, record)` pairs in insertion order.
    pub fn records(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.splits
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Look up a split's record by name.
    ///
    /// # Errors
    ///
    /// [`DatasetError::SplitNotFound`] if no split has that name.
    pub fn split(&self, name: &str) -> Result<&Record, DatasetError> {
        self.splits
            .iter()
            .find(|(split, _)| split == name)
            .map(|(_, record)| record)
            .ok_or_else(|| DatasetError::SplitNotFound(name.to_string()))
    }

    // =========================================================================
    // Bulk operations
    // =========================================================================

    /// Take rows per split, producing a new dataset.
    ///
    /// The result is built only from the requested split names, in the
    /// requested order; splits of this dataset that are not named are
    /// excluded from the result.
    ///
    /// # Errors
    ///
    /// [`DatasetError::SplitNotFound`] for a requested split absent from
    /// this dataset, plus any error from [`Record::select`].
    pub fn select<I, S, R>(&self, selections: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (S, R)>,
        S: AsRef<str>,
        R: Into<RowSelection>,
    {
        let mut splits = Vec::new();
        for (name, selection) in selections {
            let name = name.as_ref();
            let record = self.split(name)?;
            splits.push((name.to_string(), record.select(selection)?));
        }
        Ok(Self { splits })
    }

    /// Apply the same transform to every split's record.
    ///
    /// See [`Record::map`] for the per-record contract.
    pub fn map<F>(self, mut transform: F) -> Self
    where
        F: FnMut(Vec<Field>) -> Vec<Field>,
    {
        Self {
            splits: self
                .splits
                .into_iter()
                .map(|(name, record)| (name, record.map(&mut transform)))
                .collect(),
        }
    }

    /// Gaussian-normalize every split using training statistics.
    ///
    /// Mean and population standard deviation are computed over all
    /// elements of the train split's feature fields, then applied to every
    /// split (train included) via [`Record::normalise`].
    ///
    /// # Errors
    ///
    /// [`DatasetError::SplitNotFound`] when there is no
    /// [`train`](Dataset::TRAIN) split, [`DatasetError::NoFeatureFields`]
    /// when the train split has no feature fields.
    pub fn normalise(self) -> Result<Self, DatasetError> {
        let (mean, std) = feature_stats(self.split(Self::TRAIN)?)?;

        Ok(Self {
            splits: self
                .splits
                .into_iter()
                .map(|(name, record)| (name, record.normalise(mean, std)))
                .collect(),
        })
    }

    /// US-spelling alias for [`normalise`](Dataset::normalise).
    pub fn normalize(self) -> Result<Self, DatasetError> {
        self.normalise()
    }

    /// Multi-line summary: one line per split with its record's
    /// [`describe`](Record::describe).
    pub fn describe(&self) -> String {
        let mut out = String::from("{\n");
        for (name, record) in &self.splits {
            out.push_str(&format!("\t{}: {}\n", name, record.describe()));
        }
        out.push('}');
        out
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Mean and population standard deviation over all elements of a record's
/// feature fields.
fn feature_stats(record: &Record) -> Result<(f32, f32), DatasetError> {
    let features: Vec<&Field> = record
        .fields()
        .iter()
        .filter(|f| f.role().is_feature())
        .collect();

    if features.is_empty() {
        return Err(DatasetError::NoFeatureFields);
    }

    let mut sum = 0.0f32;
    let mut count = 0usize;
    for field in &features {
        for &v in field.values().iter() {
            sum += v;
            count += 1;
        }
    }
    let mean = sum / count as f32;

    let mut sum_sq_diff = 0.0f32;
    for field in &features {
        for &v in field.values().iter() {
            sum_sq_diff += (v - mean).powi(2);
        }
    }
    let std = (sum_sq_diff / count as f32).sqrt();

    Ok((mean, std))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn train_test_dataset() -> Dataset {
        Dataset::from_arrays([
            (
                "train",
                vec![
                    ("X", array![0.0f32, 10.0, 20.0].into_dyn()),
                    ("Y", array![0.0f32, 1.0, 0.0].into_dyn()),
                ],
            ),
            (
                "test",
                vec![
                    ("X", array![5.0f32, 15.0].into_dyn()),
                    ("Y", array![1.0f32, 0.0].into_dyn()),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn from_arrays_builds_all_splits() {
        let ds = train_test_dataset();
        assert_eq!(ds.n_splits(), 2);
        assert_eq!(ds.split("train").unwrap().n_rows(), 3);
        assert_eq!(ds.split("test").unwrap().n_rows(), 2);
    }

    #[test]
    fn from_arrays_propagates_length_mismatch() {
        let err = Dataset::from_arrays([(
            "train",
            vec![
                ("X", array![0.0f32, 10.0].into_dyn()),
                ("Y", array![0.0f32].into_dyn()),
            ],
        )])
        .unwrap_err();

        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                field: "Y".to_string(),
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn from_records_keeps_records_as_given() {
        let record = Record::from_arrays([("X", array![1.0f32].into_dyn())]).unwrap();
        let ds = Dataset::from_records([("validation", record.clone())]);
        assert_eq!(ds.split("validation").unwrap(), &record);
    }

    #[test]
    fn split_lookup_missing() {
        let ds = train_test_dataset();
        let err = ds.split("validation").unwrap_err();
        assert_eq!(err, DatasetError::SplitNotFound("validation".to_string()));
    }

    #[test]
    fn splits_iterate_in_insertion_order_and_restart() {
        let ds = train_test_dataset();
        let names: Vec<&str> = ds.splits().collect();
        assert_eq!(names, vec!["train", "test"]);

        // A second call yields a fresh iterator.
        let names_again: Vec<&str> = ds.splits().collect();
        assert_eq!(names_again, names);
    }

    #[test]
    fn select_builds_only_requested_splits() {
        let ds = train_test_dataset();
        let subset = ds.select([("train", vec![0usize, 2])]).unwrap();

        assert_eq!(subset.n_splits(), 1);
        let train = subset.split("train").unwrap();
        assert_eq!(train.n_rows(), 2);
        assert_eq!(train.get("X").unwrap()[[1]], 20.0);
        assert!(subset.split("test").is_err());
    }

    #[test]
    fn select_mixed_selections_per_split() {
        let ds = train_test_dataset();
        let subset = ds
            .select([
                ("train".to_string(), RowSelection::Mask(vec![true, false, true])),
                ("test".to_string(), RowSelection::One(1)),
            ])
            .unwrap();

        assert_eq!(subset.split("train").unwrap().n_rows(), 2);
        let test = subset.split("test").unwrap();
        assert_eq!(test.n_rows(), 1);
        assert_eq!(test.get("X").unwrap()[[0]], 15.0);
    }

    #[test]
    fn select_unknown_split_fails() {
        let ds = train_test_dataset();
        let err = ds.select([("validation", vec![0usize])]).unwrap_err();
        assert_eq!(err, DatasetError::SplitNotFound("validation".to_string()));
    }

    #[test]
    fn select_does_not_mutate_original() {
        let ds = train_test_dataset();
        let _ = ds.select([("train", 0usize)]).unwrap();
        assert_eq!(ds.split("train").unwrap().n_rows(), 3);
    }

    #[test]
    fn map_applies_to_every_split() {
        let ds = train_test_dataset();
        let doubled = ds.map(|mut fields| {
            for field in &mut fields {
                field.values_mut().mapv_inplace(|v| v * 2.0);
            }
            fields
        });

        assert_eq!(doubled.split("train").unwrap().get("X").unwrap()[[2]], 40.0);
        assert_eq!(doubled.split("test").unwrap().get("X").unwrap()[[1]], 30.0);
    }

    #[test]
    fn normalise_uses_train_statistics_for_every_split() {
        let ds = train_test_dataset().normalise().unwrap();

        // Train X [0, 10, 20]: mean = 10, population std = sqrt(200/3).
        let std = (200.0f32 / 3.0).sqrt();

        let train_x = ds.split("train").unwrap().get("X").unwrap();
        assert_abs_diff_eq!(train_x[[0]], -10.0 / std, epsilon = 1e-4);
        assert_abs_diff_eq!(train_x[[1]], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(train_x[[2]], 10.0 / std, epsilon = 1e-4);
        assert_abs_diff_eq!(train_x[[2]], 1.2247, epsilon = 1e-3);

        // Test X is rescaled with the SAME train-derived statistics.
        let test_x = ds.split("test").unwrap().get("X").unwrap();
        assert_abs_diff_eq!(test_x[[0]], -5.0 / std, epsilon = 1e-4);
        assert_abs_diff_eq!(test_x[[1]], 5.0 / std, epsilon = 1e-4);
        assert_abs_diff_eq!(test_x[[0]], -0.6124, epsilon = 1e-3);

        // Labels in both splits are unchanged.
        let train_y = ds.split("train").unwrap().get("Y").unwrap();
        assert_eq!(train_y.as_slice().unwrap(), &[0.0, 1.0, 0.0]);
        let test_y = ds.split("test").unwrap().get("Y").unwrap();
        assert_eq!(test_y.as_slice().unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn normalize_alias_matches_normalise() {
        let a = train_test_dataset().normalise().unwrap();
        let b = train_test_dataset().normalize().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn normalise_without_train_split() {
        let ds = Dataset::from_arrays([(
            "test",
            vec![("X", array![1.0f32, 2.0].into_dyn())],
        )])
        .unwrap();

        let err = ds.normalise().unwrap_err();
        assert_eq!(err, DatasetError::SplitNotFound("train".to_string()));
    }

    #[test]
    fn normalise_without_feature_fields() {
        let ds = Dataset::from_arrays([(
            "train",
            vec![("Y", array![1.0f32, 2.0].into_dyn())],
        )])
        .unwrap();

        let err = ds.normalise().unwrap_err();
        assert_eq!(err, DatasetError::NoFeatureFields);
    }

    #[test]
    fn normalise_pools_all_feature_fields_for_statistics() {
        // Two feature fields: pooled values [0, 2, 4, 6], mean 3, std sqrt(5).
        let ds = Dataset::from_arrays([(
            "train",
            vec![
                ("X1", array![0.0f32, 2.0].into_dyn()),
                ("X2", array![4.0f32, 6.0].into_dyn()),
            ],
        )])
        .unwrap()
        .normalise()
        .unwrap();

        let std = 5.0f32.sqrt();
        let x1 = ds.split("train").unwrap().get("X1").unwrap();
        assert_abs_diff_eq!(x1[[0]], -3.0 / std, epsilon = 1e-5);
        let x2 = ds.split("train").unwrap().get("X2").unwrap();
        assert_abs_diff_eq!(x2[[1]], 3.0 / std, epsilon = 1e-5);
    }

    #[test]
    fn describe_one_line_per_split() {
        let ds = train_test_dataset();
        let summary = ds.describe();

        assert!(summary.starts_with("{\n"));
        assert!(summary.ends_with('}'));
        assert!(summary.contains("\ttrain: {X: type f32, shape [3], range [0, 20]"));
        assert!(summary.contains("\ttest: {X: type f32, shape [2], range [5, 15]"));
        assert_eq!(summary, format!("{ds}"));
    }

    // Verify Send + Sync
    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn dataset_is_send_sync() {
        assert_send_sync::<Dataset>();
    }
}
