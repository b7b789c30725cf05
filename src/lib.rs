//! splitframe: fast and simple split dataset management for machine learning.
//!
//! In-memory containers for labeled, split tabular data. A [`Record`] holds
//! one split's equal-length named fields; a [`Dataset`] groups records under
//! split names (train/test/validation) and offers bulk operations: row
//! selection, per-field transformation, and Gaussian normalization of
//! feature fields using training-split statistics.
//!
//! # Key Types
//!
//! - [`Dataset`]: named mapping of split name to record
//! - [`Record`] / [`RecordBuilder`]: one split's fields with a validated row count
//! - [`Field`] / [`FieldRole`]: a named array column tagged feature or label
//! - [`RowSelection`]: numpy-style row indexing for `select`
//! - [`DatasetError`]: fail-fast validation and lookup errors
//!
//! # Example
//!
//! ```
//! use splitframe::Dataset;
//! use ndarray::array;
//!
//! let ds = Dataset::from_arrays([
//!     ("train", vec![
//!         ("X", array![0.0f32, 10.0, 20.0].into_dyn()),
//!         ("Y", array![0.0f32, 1.0, 0.0].into_dyn()),
//!     ]),
//!     ("test", vec![
//!         ("X", array![5.0f32, 15.0].into_dyn()),
//!         ("Y", array![1.0f32, 0.0].into_dyn()),
//!     ]),
//! ])
//! .unwrap();
//!
//! // Rescale every split with statistics from the train split only.
//! let ds = ds.normalise().unwrap();
//! assert!(ds.split("test").unwrap().get("X").unwrap()[[0]] < 0.0);
//! ```

// Re-export approx traits for users who want to compare normalized values
pub use approx;

pub mod dataset;
pub mod error;
pub mod field;
pub mod record;
pub mod selection;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use dataset::Dataset;
pub use error::DatasetError;
pub use field::{Field, FieldRole};
pub use record::{Record, RecordBuilder};
pub use selection::RowSelection;
