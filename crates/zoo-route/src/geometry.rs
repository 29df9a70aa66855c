#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in 3-space used for every distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line (Euclidean) distance.
    pub fn distance(self, other: Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Ground projection of a stop, as written to the output file.
///
/// Serializes as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "(i64, i64)", into = "(i64, i64)")
)]
pub struct Point2 {
    pub x: i64,
    pub y: i64,
}

impl Point2 {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Lift the point to `altitude`.
    pub fn at_altitude(self, altitude: f64) -> Point3 {
        Point3::new(self.x as f64, self.y as f64, altitude)
    }
}

impl From<(i64, i64)> for Point2 {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for (i64, i64) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

/// Integer grid location of a depot, storage or enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Position {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The position at its true altitude.
    pub fn point(self) -> Point3 {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// The position with its altitude replaced by `altitude`.
    pub fn at_altitude(self, altitude: f64) -> Point3 {
        self.ground().at_altitude(altitude)
    }

    pub fn ground(self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}
