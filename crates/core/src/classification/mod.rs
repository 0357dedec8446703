//! Account classification.
//!
//! Maps account codes to their class prefix and routes entries into the
//! closed rubric sets every statement is built from:
//! - Class-prefix extraction and class-set membership
//! - The `Rubric` trait implemented by every statement side
//! - Order-preserving aggregation of entries into rubrics

pub mod classifier;
pub mod rubric;

pub use classifier::{ClassSet, belongs_to_classes, class_prefix};
pub use rubric::{MAX_VOLUME, Rubric, RubricTotal, Rubrics, aggregate, is_covered, volume};
