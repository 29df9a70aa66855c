use std::collections::BTreeSet;

use proptest::prelude::*;
use zoo_route::{
    build_route, Diet, Enclosure, FedSet, FoodStorage, Position, RoutePolicy, Zoo,
};

fn diet() -> impl Strategy<Value = Diet> {
    prop_oneof![
        Just(Diet::Carnivore),
        Just(Diet::Herbivore),
        Just(Diet::Omnivore)
    ]
}

fn position() -> impl Strategy<Value = Position> {
    (0i64..200, 0i64..200, 0i64..60).prop_map(|(x, y, z)| Position::new(x, y, z))
}

fn policy() -> impl Strategy<Value = RoutePolicy> {
    prop_oneof![
        Just(RoutePolicy::NearestNeighbor),
        Just(RoutePolicy::EnergyAware)
    ]
}

prop_compose! {
    fn zoo()(
        depot in position(),
        battery in 0u32..1500,
        extra_storages in prop::collection::vec((position(), diet()), 0..4),
        storage_positions in prop::collection::vec(position(), 3),
        enclosures in prop::collection::vec((position(), 0.0f64..10.0, diet()), 0..16),
    ) -> Zoo {
        // One storage per diet so every trial is feasible.
        let mut storages: Vec<FoodStorage> = Diet::ALL
            .into_iter()
            .zip(storage_positions)
            .map(|(diet, position)| FoodStorage::new(position, diet))
            .collect();
        storages.extend(extra_storages.into_iter().map(|(p, d)| FoodStorage::new(p, d)));

        let enclosures = enclosures
            .into_iter()
            .map(|(p, importance, d)| Enclosure::new(p, importance, d))
            .collect();

        Zoo::new(Position::new(200, 200, 60), depot, battery as f64, storages, enclosures)
    }
}

proptest! {
    #[test]
    fn paths_start_and_end_at_the_depot(zoo in zoo(), diet in diet(), policy in policy()) {
        let route = build_route(&zoo, diet, policy, &mut FedSet::new()).unwrap();
        let depot = zoo.depot.ground();

        prop_assert!(route.len() >= 3);
        prop_assert_eq!(route.path.first().copied(), Some(depot));
        prop_assert_eq!(route.path.last().copied(), Some(depot));
        prop_assert_eq!(route.path[1], zoo.storages[route.storage.0].position.ground());
        prop_assert_eq!(route.len(), route.visits.len() + 3);
    }

    #[test]
    fn enclosures_are_fed_at_most_once(zoo in zoo(), diet in diet(), policy in policy()) {
        let mut fed = FedSet::new();
        let route = build_route(&zoo, diet, policy, &mut fed).unwrap();

        let unique: BTreeSet<_> = route.visits.iter().copied().collect();
        prop_assert_eq!(unique.len(), route.visits.len());
        prop_assert_eq!(fed.iter().collect::<Vec<_>>(), unique.into_iter().collect::<Vec<_>>());
        for id in &route.visits {
            prop_assert_eq!(zoo.enclosures[id.0].diet, diet);
        }
    }

    #[test]
    fn nearest_neighbor_feeds_every_matching_enclosure(zoo in zoo(), diet in diet()) {
        let mut fed = FedSet::new();
        let route = build_route(&zoo, diet, RoutePolicy::NearestNeighbor, &mut fed).unwrap();

        prop_assert_eq!(route.visits.len(), zoo.enclosures_for(diet).count());
    }

    #[test]
    fn energy_aware_admissions_keep_a_return_reserve(zoo in zoo(), diet in diet()) {
        let route = build_route(&zoo, diet, RoutePolicy::EnergyAware, &mut FedSet::new()).unwrap();

        let depot = zoo.depot.point();
        let mut current = zoo.storages[route.storage.0].position.point();
        let mut remaining = zoo.battery_capacity - depot.distance(current);
        for id in &route.visits {
            let next = zoo.enclosures[id.0].position.point();
            let outbound = current.distance(next);
            prop_assert!(remaining - (outbound + next.distance(depot)) >= 0.0);
            remaining -= outbound;
            current = next;
        }
        prop_assert_eq!(route.remaining_battery, Some(remaining));
        prop_assert_eq!(
            route.visits.len() + route.skipped.len(),
            zoo.enclosures_for(diet).count()
        );
    }

    #[test]
    fn earlier_trials_do_not_change_a_diet_route(zoo in zoo(), policy in policy()) {
        for diet in Diet::ALL {
            // Feed every other diet first, then plan this one on the same set.
            let mut carried = FedSet::new();
            for other in Diet::ALL.into_iter().filter(|d| *d != diet) {
                build_route(&zoo, other, policy, &mut carried).unwrap();
            }
            let after_others = build_route(&zoo, diet, policy, &mut carried).unwrap();
            let fresh = build_route(&zoo, diet, policy, &mut FedSet::new()).unwrap();

            prop_assert_eq!(after_others, fresh);
        }
    }
}
