//! Path scoring: importance fed, weighted, minus distance flown.

use crate::{Diet, EnclosureId, FedSet, Point2, Zoo, DEFAULT_CRUISE_ALTITUDE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Multiplier applied to fed importance before distance is subtracted.
pub const DEFAULT_IMPORTANCE_WEIGHT: f64 = 1000.0;

/// Altitude the replay starts from at the first path point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum LaunchAltitude {
    Fixed(f64),
    /// The depot's own altitude.
    Depot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreParams {
    pub cruise_altitude: f64,
    pub importance_weight: f64,
    pub launch_altitude: LaunchAltitude,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            cruise_altitude: DEFAULT_CRUISE_ALTITUDE,
            importance_weight: DEFAULT_IMPORTANCE_WEIGHT,
            launch_altitude: LaunchAltitude::Depot,
        }
    }
}

impl ScoreParams {
    pub fn with_launch_altitude(mut self, launch_altitude: LaunchAltitude) -> Self {
        self.launch_altitude = launch_altitude;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreBreakdown {
    /// Sum of importance credited along the path.
    pub importance: f64,
    /// Total 3-D distance flown.
    pub distance: f64,
    pub score: f64,
}

/// Replay `path` and return its importance, distance and score.
///
/// Every point after the first is flown at cruise altitude. A point is
/// credited with the importance of the first enclosure (in load order) that
/// sits at the same `(x, y)`, requires `diet` and is in `fed`.
pub fn score_breakdown(
    zoo: &Zoo,
    path: &[Point2],
    diet: Diet,
    fed: &FedSet,
    params: &ScoreParams,
) -> ScoreBreakdown {
    let Some((first, rest)) = path.split_first() else {
        return ScoreBreakdown::default();
    };

    let launch = match params.launch_altitude {
        LaunchAltitude::Fixed(altitude) => altitude,
        LaunchAltitude::Depot => zoo.depot.z as f64,
    };

    let mut current = first.at_altitude(launch);
    let mut distance = 0.0;
    let mut importance = 0.0;

    for point in rest {
        let next = point.at_altitude(params.cruise_altitude);
        distance += current.distance(next);
        current = next;
        if let Some(id) = credited_enclosure(zoo, *point, diet, fed) {
            importance += zoo.enclosures[id.0].importance;
        }
    }

    ScoreBreakdown {
        importance,
        distance,
        score: importance * params.importance_weight - distance,
    }
}

pub fn score(zoo: &Zoo, path: &[Point2], diet: Diet, fed: &FedSet, params: &ScoreParams) -> f64 {
    score_breakdown(zoo, path, diet, fed, params).score
}

/// The enclosure a path point is credited with, if any.
pub fn credited_enclosure(zoo: &Zoo, point: Point2, diet: Diet, fed: &FedSet) -> Option<EnclosureId> {
    zoo.enclosures_for(diet)
        .find(|(id, e)| e.position.ground() == point && fed.contains(*id))
        .map(|(id, _)| id)
}
