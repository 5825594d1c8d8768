pub mod composite;
pub mod hole;
pub mod policy;
pub mod round;
pub mod user;

pub use composite::{CompositeStatistics, HoleCountAverages, ParScoreAverages};
pub use hole::{HoleInput, HoleObservation, Outcome, Par};
pub use policy::SelectionPolicy;
pub use round::{GirBucketStats, HoleCount, ParAverages, RoundSummary, StoredRound};
pub use user::User;
