//! Deterministic drone feeding-route builder and scorer.
//!
//! A [`Zoo`] holds a depot, a battery budget, food storages and enclosures.
//! [`RouteBuilder`] turns one diet into a depot-to-depot [`Route`] using either
//! the nearest-neighbor or the energy-aware policy, and [`score`] ranks the
//! resulting path. Fed state is tracked per trial in a [`FedSet`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod builder;
pub mod fed;
pub mod geometry;
pub mod model;
pub mod scoring;

pub use builder::{build_route, Route, RouteBuilder, RoutePolicy, DEFAULT_CRUISE_ALTITUDE};
pub use fed::FedSet;
pub use geometry::{Point2, Point3, Position};
pub use model::{Diet, Enclosure, EnclosureId, FoodStorage, ParseDietError, StorageId, Zoo};
pub use scoring::{
    credited_enclosure, score, score_breakdown, LaunchAltitude, ScoreBreakdown, ScoreParams,
    DEFAULT_IMPORTANCE_WEIGHT,
};

use thiserror::Error;

/// Errors raised while building a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no food storage serves the {diet} diet")]
    NoFeasibleStorage { diet: Diet },
}

pub type Result<T> = std::result::Result<T, PlanError>;
