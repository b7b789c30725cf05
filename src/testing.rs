//! Deterministic data generators for tests and examples.

use ndarray::{ArrayD, Axis, IxDyn};
use rand::prelude::*;

use crate::dataset::Dataset;
use crate::record::Record;

/// Generate random 1-D field values, uniform in `[min, max]`.
pub fn random_values(rows: usize, seed: u64, min: f32, max: f32) -> ArrayD<f32> {
    assert!(max >= min);
    let mut rng = StdRng::seed_from_u64(seed);
    let width = max - min;
    let data: Vec<f32> = (0..rows).map(|_| min + rng.gen::<f32>() * width).collect();
    ArrayD::from_shape_vec(IxDyn(&[rows]), data).expect("shape matches data length")
}

/// Generate regression labels as a linear function of the features plus
/// uniform noise.
///
/// Works for features of any rank; one label per row of the first axis.
pub fn linear_labels(features: &ArrayD<f32>, seed: u64, noise_amplitude: f32) -> ArrayD<f32> {
    let rows = if features.ndim() == 0 {
        0
    } else {
        features.len_of(Axis(0))
    };
    let per_row = if rows == 0 { 0 } else { features.len() / rows };

    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<f32> = (0..per_row).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect();
    let bias: f32 = rng.gen::<f32>() * 0.5 - 0.25;

    let mut labels = Vec::with_capacity(rows);
    for row in features.axis_iter(Axis(0)) {
        let mut y = bias;
        for (&x, &w) in row.iter().zip(&weights) {
            y += x * w;
        }
        if noise_amplitude > 0.0 {
            y += (rng.gen::<f32>() * 2.0 - 1.0) * noise_amplitude;
        }
        labels.push(y);
    }

    ArrayD::from_shape_vec(IxDyn(&[rows]), labels).expect("one label per row")
}

/// Deterministic shuffled train/validation split indices.
///
/// Returns `(train_idx, valid_idx)`, disjoint and jointly covering
/// `0..rows`. Feed the halves to `select` to carve out a validation split.
pub fn split_indices(rows: usize, valid_fraction: f32, seed: u64) -> (Vec<usize>, Vec<usize>) {
    assert!((0.0..1.0).contains(&valid_fraction));
    let mut idx: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    idx.shuffle(&mut rng);

    let valid_len = ((rows as f32) * valid_fraction).round() as usize;
    let valid_len = valid_len.min(rows);
    let (valid, train) = idx.split_at(valid_len);
    (train.to_vec(), valid.to_vec())
}

/// Build a record with one random feature field `X` and one synthetic
/// label field `Y`.
pub fn sample_record(rows: usize, seed: u64) -> Record {
    let x = random_values(rows, seed, 0.0, 1.0);
    let y = linear_labels(&x, seed.wrapping_add(1), 0.1);
    Record::builder()
        .feature("X", x)
        .label("Y", y)
        .build()
        .expect("generated fields share a row count")
}

/// Build a train/test dataset from [`sample_record`].
pub fn sample_dataset(train_rows: usize, test_rows: usize, seed: u64) -> Dataset {
    Dataset::from_records([
        ("train", sample_record(train_rows, seed)),
        ("test", sample_record(test_rows, seed.wrapping_add(100))),
    ])
}
