pub mod commands;
pub mod controller;
pub mod state;

pub use controller::{CaptureController, CaptureOutcome, CaptureSnapshot};
pub use state::{CaptureStatus, Progress, RoundDraft};
