//! Kernel - runs one trial per diet and keeps the requested results.

mod trials;

pub use trials::{RunSummary, TrialError, TrialOutcome, TrialRunner};
