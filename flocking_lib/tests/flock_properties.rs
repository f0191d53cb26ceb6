use approx::assert_relative_eq;
use flocking_lib::{
    boid::Boid,
    flock::Flock,
    flock_base,
    options::{get_window_size, RunOptions, TrackerType},
};
use glam::Vec2;
use rstest::rstest;

fn seeded(tracker_type: TrackerType) -> RunOptions {
    RunOptions {
        tracker_type,
        seed: Some(2024),
        ..Default::default()
    }
}

#[rstest]
#[case(TrackerType::Naive)]
#[case(TrackerType::SpatHash)]
fn speed_and_acceleration_invariants_hold_every_tick(#[case] tracker_type: TrackerType) {
    let ro = seeded(tracker_type);
    let mut flock = Flock::new(&ro);

    for _ in 0..200 {
        flock.update(&ro);

        for b in flock.view() {
            assert!(b.velocity.length() <= ro.max_speed * (1. + 1e-5));
            assert_eq!(b.acceleration(), Vec2::ZERO);

            let margin = ro.radius;
            assert!(b.position.x >= -margin && b.position.x <= ro.window.win_w + margin);
            assert!(b.position.y >= -margin && b.position.y <= ro.window.win_h + margin);
        }
    }
}

#[test]
fn stepping_the_same_snapshot_is_deterministic() {
    let ro = seeded(TrackerType::Naive);
    let snapshot: Vec<Boid> = Flock::new(&ro).view().to_vec();

    let mut first = Flock::from_boids(snapshot.clone(), &ro);
    let mut second = Flock::from_boids(snapshot, &ro);

    for _ in 0..50 {
        first.update(&ro);
        second.update(&ro);
    }

    assert_eq!(first.view(), second.view());
}

#[test]
fn trackers_produce_identical_runs() {
    let naive = flock_base(60, seeded(TrackerType::Naive));
    let hashed = flock_base(60, seeded(TrackerType::SpatHash));

    assert_eq!(naive.len(), 60 * 100);
    assert_eq!(naive, hashed);
}

#[test]
fn lone_boid_moves_in_a_straight_line() {
    let ro = RunOptions::default();
    let velocity = Vec2::new(1.5, -0.5);
    let mut flock = Flock::from_boids(
        vec![
            Boid::new(100., 100., velocity, 0),
            Boid::new(600., 300., Vec2::new(-1., 0.), 1),
        ],
        &ro,
    );

    for tick in 1..=10 {
        flock.update(&ro);

        let b = flock.view()[0];
        assert_eq!(b.velocity, velocity);
        assert_relative_eq!(b.position.x, 100. + 1.5 * tick as f32, epsilon = 1e-4);
        assert_relative_eq!(b.position.y, 100. - 0.5 * tick as f32, epsilon = 1e-4);
    }
}

#[test]
fn separation_alone_drives_close_boids_apart() {
    let ro = RunOptions {
        alignment_coefficient: 0.,
        cohesion_coefficient: 0.,
        ..Default::default()
    };
    let mut flock = Flock::from_boids(
        vec![
            Boid::new(200., 200., Vec2::new(0., 1.), 0),
            Boid::new(212., 205., Vec2::new(0., 1.), 1),
        ],
        &ro,
    );
    let gap_before = flock.view()[0].position.distance(flock.view()[1].position);

    flock.update(&ro);

    let gap_after = flock.view()[0].position.distance(flock.view()[1].position);
    assert!(gap_after > gap_before);
}

fn wide_separation(tracker_type: TrackerType) -> [RunOptions; 2] {
    let literal = RunOptions {
        separation_distance: 80.,
        alignment_coefficient: 0.,
        cohesion_coefficient: 0.,
        tracker_type,
        ..Default::default()
    };
    let mut parsed: RunOptions = serde_json::from_str(
        r#"{"separation_distance": 80, "alignment_coefficient": 0, "cohesion_coefficient": 0}"#,
    )
    .unwrap();
    parsed.tracker_type = tracker_type;

    [literal, parsed]
}

#[rstest]
#[case(TrackerType::Naive)]
#[case(TrackerType::SpatHash)]
fn separation_reaches_past_neighbour_distance(#[case] tracker_type: TrackerType) {
    for ro in wide_separation(tracker_type) {
        let mut flock = Flock::from_boids(
            vec![
                Boid::new(200., 200., Vec2::ZERO, 0),
                Boid::new(260., 200., Vec2::ZERO, 1),
            ],
            &ro,
        );

        flock.update(&ro);

        // full steering of 0.1, weighted by 2.5
        assert_relative_eq!(flock.view()[0].velocity.x, -0.25, epsilon = 1e-5);
        assert_relative_eq!(flock.view()[1].velocity.x, 0.25, epsilon = 1e-5);
    }
}

#[test]
fn wraps_at_canvas_edges() {
    let ro = RunOptions {
        window: get_window_size(100, 50),
        ..Default::default()
    };
    let mut flock = Flock::from_boids(vec![Boid::new(-2.5, 25., Vec2::new(-1., 0.), 0)], &ro);

    flock.update(&ro);

    assert_relative_eq!(flock.view()[0].position.x, 103.);
}

#[test]
fn degenerate_window_does_not_panic() {
    let ro = RunOptions {
        window: get_window_size(0, 0),
        init_boids: 10,
        tracker_type: TrackerType::SpatHash,
        seed: Some(1),
        ..Default::default()
    };
    let mut flock = Flock::new(&ro);

    for _ in 0..5 {
        flock.update(&ro);
    }

    assert_eq!(flock.len(), 10);
}

#[test]
fn samples_serialize_to_json() {
    let data = flock_base(1, RunOptions {
        init_boids: 1,
        seed: Some(9),
        ..Default::default()
    });

    let json = serde_json::to_string(&data[0]).unwrap();
    assert!(json.starts_with(r#"{"id":0,"x":"#));
    assert!(json.contains(r#""time":1"#));
}
