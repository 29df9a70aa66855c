//! Zoo drone run kernel.
//!
//! Loads a zoo description, runs one route-building trial per diet, keeps the
//! best or every route, and writes the chosen paths as JSON.

pub mod config;
pub mod kernel;
pub mod loader;
pub mod observability;
pub mod output;

pub use config::{PlannerConfig, Retention, Variant};
pub use kernel::{RunSummary, TrialError, TrialOutcome, TrialRunner};
pub use loader::{load_zoo, LoadError, ZooLoader};
pub use output::{render_paths, render_summary, write_paths};
