pub mod aggregate;
pub mod buckets;
pub mod math;
pub mod merge;
pub mod round;
pub mod validation;

pub use aggregate::aggregate;
pub use buckets::{DistanceBucket, PuttRange, DISTANCE_BUCKETS, PUTT_RANGES};
pub use round::{summarize, summarize_at};
pub use validation::{validate_hole, validate_round, HoleValidationError};
