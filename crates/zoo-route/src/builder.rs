//! Route building: storage choice and enclosure visiting order per diet.

use crate::{
    Diet, EnclosureId, FedSet, PlanError, Point2, Point3, Result, StorageId, Zoo,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Altitude the drone cruises at between stops.
pub const DEFAULT_CRUISE_ALTITUDE: f64 = 50.0;

/// How enclosures are chosen once the storage has been picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum RoutePolicy {
    /// Visit every matching enclosure, always flying to the closest one next.
    /// The battery is never consulted.
    #[default]
    NearestNeighbor,
    /// Rank enclosures once by importance per unit distance from the storage,
    /// then admit them in that order while a return to the depot stays
    /// affordable.
    EnergyAware,
}

/// One built route for a single diet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    pub diet: Diet,
    pub policy: RoutePolicy,
    pub storage: StorageId,
    /// Enclosures in visiting order.
    pub visits: Vec<EnclosureId>,
    /// Enclosures rejected by the battery check, in ranking order.
    pub skipped: Vec<EnclosureId>,
    /// Budget left after the last admitted leg (energy-aware policy only).
    /// The return leg is not deducted.
    pub remaining_battery: Option<f64>,
    /// Depot, storage, visits, depot.
    pub path: Vec<Point2>,
}

impl Route {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteBuilder {
    policy: RoutePolicy,
    cruise_altitude: f64,
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new(RoutePolicy::default())
    }
}

impl RouteBuilder {
    pub fn new(policy: RoutePolicy) -> Self {
        Self {
            policy,
            cruise_altitude: DEFAULT_CRUISE_ALTITUDE,
        }
    }

    pub fn with_cruise_altitude(mut self, cruise_altitude: f64) -> Self {
        self.cruise_altitude = cruise_altitude;
        self
    }

    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }

    /// Build the route for `diet`, marking every admitted enclosure in `fed`.
    ///
    /// Enclosures already present in `fed` are not considered.
    pub fn build(&self, zoo: &Zoo, diet: Diet, fed: &mut FedSet) -> Result<Route> {
        let depot = zoo.depot;
        let storage_id = self.select_storage(zoo, diet)?;
        let storage = zoo.storages[storage_id.0].position;

        let mut route = Route {
            diet,
            policy: self.policy,
            storage: storage_id,
            visits: Vec::new(),
            skipped: Vec::new(),
            remaining_battery: None,
            path: vec![depot.ground(), storage.ground()],
        };

        let targets: Vec<EnclosureId> = zoo
            .enclosures_for(diet)
            .filter(|(id, _)| !fed.contains(*id))
            .map(|(id, _)| id)
            .collect();

        match self.policy {
            RoutePolicy::NearestNeighbor => {
                let start = storage.at_altitude(self.cruise_altitude);
                self.visit_nearest(zoo, start, targets, fed, &mut route);
            }
            RoutePolicy::EnergyAware => {
                self.visit_by_density(zoo, storage.point(), targets, fed, &mut route);
            }
        }

        route.path.push(depot.ground());
        Ok(route)
    }

    /// First storage (in load order) closest to the policy's reference point.
    fn select_storage(&self, zoo: &Zoo, diet: Diet) -> Result<StorageId> {
        let reference = match self.policy {
            RoutePolicy::NearestNeighbor => zoo.depot.at_altitude(self.cruise_altitude),
            RoutePolicy::EnergyAware => zoo.depot.point(),
        };

        let mut best: Option<(StorageId, f64)> = None;
        for (id, storage) in zoo.storages_for(diet) {
            let dist = storage.position.point().distance(reference);
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((id, dist)),
            }
        }

        best.map(|(id, _)| id)
            .ok_or(PlanError::NoFeasibleStorage { diet })
    }

    fn visit_nearest(
        &self,
        zoo: &Zoo,
        start: Point3,
        mut targets: Vec<EnclosureId>,
        fed: &mut FedSet,
        route: &mut Route,
    ) {
        let mut current = start;
        while let Some(idx) = nearest_index(zoo, &targets, current) {
            let id = targets.remove(idx);
            let position = zoo.enclosures[id.0].position;
            fed.mark(id);
            route.visits.push(id);
            route.path.push(position.ground());
            current = position.point();
        }
    }

    fn visit_by_density(
        &self,
        zoo: &Zoo,
        start: Point3,
        targets: Vec<EnclosureId>,
        fed: &mut FedSet,
        route: &mut Route,
    ) {
        let depot = zoo.depot.point();
        let mut current = start;
        let mut remaining = zoo.battery_capacity - depot.distance(start);

        // Ranked once against the storage position; ties keep load order.
        let mut ranked: Vec<(EnclosureId, f64)> = targets
            .into_iter()
            .map(|id| {
                let enclosure = &zoo.enclosures[id.0];
                let dist = start.distance(enclosure.position.point());
                (id, density(enclosure.importance, dist))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (id, _) in ranked {
            let candidate = zoo.enclosures[id.0].position;
            let dist_to_candidate = current.distance(candidate.point());
            let dist_candidate_to_depot = candidate.point().distance(depot);
            if remaining - (dist_to_candidate + dist_candidate_to_depot) < 0.0 {
                route.skipped.push(id);
                continue;
            }

            fed.mark(id);
            route.visits.push(id);
            route.path.push(candidate.ground());
            remaining -= dist_to_candidate;
            current = candidate.point();
        }

        route.remaining_battery = Some(remaining);
    }
}

/// Build a route with the default cruise altitude.
pub fn build_route(zoo: &Zoo, diet: Diet, policy: RoutePolicy, fed: &mut FedSet) -> Result<Route> {
    RouteBuilder::new(policy).build(zoo, diet, fed)
}

/// Index of the target closest to `from`; the first one wins on ties.
fn nearest_index(zoo: &Zoo, targets: &[EnclosureId], from: Point3) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, id) in targets.iter().enumerate() {
        let dist = zoo.enclosures[id.0].position.point().distance(from);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Importance per unit distance. A zero distance ranks ahead of everything.
fn density(importance: f64, distance: f64) -> f64 {
    if distance == 0.0 {
        f64::INFINITY
    } else {
        importance / distance
    }
}
