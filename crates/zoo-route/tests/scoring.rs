use zoo_route::{
    build_route, credited_enclosure, score, score_breakdown, Diet, Enclosure, EnclosureId, FedSet,
    FoodStorage, LaunchAltitude, Point2, Position, RoutePolicy, ScoreParams, Zoo,
};

fn zoo_with(enclosures: Vec<Enclosure>) -> Zoo {
    Zoo::new(
        Position::new(100, 100, 100),
        Position::new(0, 0, 0),
        1000.0,
        vec![FoodStorage::new(Position::new(0, 0, 0), Diet::Carnivore)],
        enclosures,
    )
}

fn path(coords: &[(i64, i64)]) -> Vec<Point2> {
    coords.iter().copied().map(Point2::from).collect()
}

#[test]
fn score_weights_fed_importance_against_distance() {
    let zoo = zoo_with(vec![Enclosure::new(Position::new(30, 40, 0), 2.0, Diet::Carnivore)]);
    let fed: FedSet = [EnclosureId(0)].into_iter().collect();
    let path = path(&[(0, 0), (0, 0), (30, 40), (0, 0)]);

    let breakdown = score_breakdown(&zoo, &path, Diet::Carnivore, &fed, &ScoreParams::default());

    // Climb 50, then two 50-unit legs at cruise altitude.
    assert_eq!(breakdown.distance, 150.0);
    assert_eq!(breakdown.importance, 2.0);
    assert_eq!(breakdown.score, 1850.0);
}

#[test]
fn fixed_launch_altitude_shortens_the_first_leg() {
    let zoo = zoo_with(vec![Enclosure::new(Position::new(30, 40, 0), 2.0, Diet::Carnivore)]);
    let fed: FedSet = [EnclosureId(0)].into_iter().collect();
    let path = path(&[(0, 0), (0, 0), (30, 40), (0, 0)]);
    let params = ScoreParams::default().with_launch_altitude(LaunchAltitude::Fixed(10.0));

    assert_eq!(score(&zoo, &path, Diet::Carnivore, &fed, &params), 1860.0);
}

#[test]
fn unfed_or_other_diet_enclosures_earn_nothing() {
    let zoo = zoo_with(vec![
        Enclosure::new(Position::new(30, 40, 0), 2.0, Diet::Carnivore),
        Enclosure::new(Position::new(30, 40, 0), 9.0, Diet::Herbivore),
    ]);
    let path = path(&[(0, 0), (0, 0), (30, 40), (0, 0)]);
    let params = ScoreParams::default();

    assert_eq!(
        score(&zoo, &path, Diet::Carnivore, &FedSet::new(), &params),
        -150.0
    );

    let herbivore_fed: FedSet = [EnclosureId(1)].into_iter().collect();
    assert_eq!(
        score(&zoo, &path, Diet::Carnivore, &herbivore_fed, &params),
        -150.0
    );
}

#[test]
fn coinciding_enclosures_credit_the_first_fed_match_in_load_order() {
    let zoo = zoo_with(vec![
        Enclosure::new(Position::new(30, 40, 0), 2.0, Diet::Carnivore),
        Enclosure::new(Position::new(30, 40, 9), 7.0, Diet::Carnivore),
    ]);
    let point = Point2::new(30, 40);

    let both: FedSet = [EnclosureId(0), EnclosureId(1)].into_iter().collect();
    assert_eq!(
        credited_enclosure(&zoo, point, Diet::Carnivore, &both),
        Some(EnclosureId(0))
    );

    let second_only: FedSet = [EnclosureId(1)].into_iter().collect();
    assert_eq!(
        credited_enclosure(&zoo, point, Diet::Carnivore, &second_only),
        Some(EnclosureId(1))
    );

    // Only one credit per path point, even when two enclosures share it.
    let breakdown = score_breakdown(
        &zoo,
        &path(&[(0, 0), (0, 0), (30, 40), (0, 0)]),
        Diet::Carnivore,
        &both,
        &ScoreParams::default(),
    );
    assert_eq!(breakdown.importance, 2.0);
}

#[test]
fn empty_path_scores_zero() {
    let zoo = zoo_with(vec![]);
    assert_eq!(
        score(&zoo, &[], Diet::Carnivore, &FedSet::new(), &ScoreParams::default()),
        0.0
    );
}

#[test]
fn score_ignores_order_of_unvisited_enclosures() {
    let near = Enclosure::new(Position::new(3, 4, 0), 1.5, Diet::Carnivore);
    let far = Enclosure::new(Position::new(60, 80, 0), 4.0, Diet::Carnivore);
    let other = Enclosure::new(Position::new(5, 5, 0), 8.0, Diet::Omnivore);

    let a = zoo_with(vec![near, other, far]);
    let b = zoo_with(vec![other, near, far]);

    let params = ScoreParams::default();
    let mut scores = Vec::new();
    for zoo in [&a, &b] {
        let mut fed = FedSet::new();
        let route = build_route(zoo, Diet::Carnivore, RoutePolicy::NearestNeighbor, &mut fed)
            .expect("route should exist");
        scores.push(score(zoo, &route.path, Diet::Carnivore, &fed, &params));
    }

    assert_eq!(scores[0], scores[1]);
}
