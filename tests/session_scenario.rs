//! End-to-end session behaviour: the dipole scenario, rebuild determinism and
//! the test particle's lifecycle driven through ticks.

use efield::{
    direction_at, Advance, Charge, Config, FieldConfig, Polarity, Session, SessionEvent, Vec2,
    Viewport,
};

fn small() -> Config {
    Config::new().with_viewport(Viewport::new(240, 160))
}

#[test]
fn dipole_field_matches_closed_form() {
    let session = Session::new(Config::new());
    let cfg = FieldConfig::default();
    assert_eq!(
        session.charges(),
        &[
            Charge::new(Vec2::new(-150.0, 0.0), 1.0),
            Charge::new(Vec2::new(150.0, 0.0), -1.0),
        ]
    );

    // k * q / r^3 * d summed over both charges, with d = P - c
    let expected_x: f32 = [(-150.0f32, 1.0f32), (150.0, -1.0)]
        .iter()
        .map(|&(cx, q)| {
            let d = 0.0 - cx;
            let r = d.abs();
            cfg.k * q / (r * r * r) * d
        })
        .sum();

    let e = session.field_at(Vec2::ZERO);
    assert!(e.y.abs() < 1e-6);
    assert!((e.x - expected_x).abs() < 1e-5, "got {}, expected {}", e.x, expected_x);
    assert!((expected_x - 2.0 * 2000.0 / 22500.0).abs() < 1e-6);
}

#[test]
fn rebuild_is_deterministic() {
    let mut session = Session::new(small());
    session.add_charge(Charge::new(Vec2::new(10.0, 40.0), -1.0));
    session.rebuild();
    let first = session.derived().cloned().expect("rebuilt");
    session.rebuild();
    let second = session.derived().cloned().expect("rebuilt");
    assert_eq!(first, second);
}

#[test]
fn charge_placement_is_visible_in_the_same_tick() {
    let mut session = Session::empty(small());
    let report = session.tick([
        SessionEvent::PlaceCharge {
            position: Vec2::new(-30.0, 0.0),
            polarity: Polarity::Positive,
        },
        SessionEvent::PlaceCharge {
            position: Vec2::new(30.0, 0.0),
            polarity: Polarity::Negative,
        },
    ]);
    assert_eq!(report.charges_added, 2);
    assert!(report.rebuilt);

    let frame = session.frame();
    assert_eq!(frame.charges.len(), 2);
    assert!(!frame.field_lines.is_empty());
    assert!(frame.field_lines.len() <= 2 * session.config().seeds.seeds_per_charge);
    let bg = frame.background.expect("background built");
    assert_eq!((bg.width(), bg.height()), (240, 160));
}

#[test]
fn particle_follows_unit_field_until_it_leaves() {
    let mut session = Session::with_charges(small(), vec![Charge::new(Vec2::ZERO, 1.0)]);
    session.tick([SessionEvent::SpawnParticle {
        position: Vec2::new(0.0, 20.0),
    }]);
    // The spawn tick already advanced once
    assert_eq!(session.particle().map(|p| p.position.y), Some(22.0));

    let cfg = *session.config();
    let mut ticks = 0;
    loop {
        let before = session.particle().expect("spawned").position;
        let floor = cfg.particle.stall_floor;
        let expected = direction_at(before, session.charges(), &cfg.field, floor)
            .map(|(dir, _)| before + dir * cfg.particle.step)
            .expect("field is strong enough along the ray");

        let report = session.tick([]);
        let after = session.particle().expect("spawned").position;
        assert!((after - expected).length() < 1e-4);
        ticks += 1;

        if report.particle == Some(Advance::Died) {
            break;
        }
        assert_eq!(report.particle, Some(Advance::Moved));
        assert!(ticks < 1000, "particle never left");
    }

    // 80 + 100 = 180 is the last live y
    let dead_at = session.particle().expect("spawned").position;
    assert!(dead_at.y > 180.0);
    assert!(session.frame().particle.is_none());

    let report = session.tick([]);
    assert_eq!(report.particle, Some(Advance::Inactive));
    assert_eq!(session.particle().map(|p| p.position), Some(dead_at));
}

#[test]
fn respawn_revives_a_dead_particle() {
    let mut session = Session::with_charges(small(), vec![Charge::new(Vec2::ZERO, 1.0)]);
    session.spawn_particle(Vec2::new(0.0, 179.0));
    session.tick([]);
    assert_eq!(session.particle().map(|p| p.live), Some(false));

    session.tick([SessionEvent::SpawnParticle {
        position: Vec2::new(20.0, 0.0),
    }]);
    assert_eq!(session.particle().map(|p| p.live), Some(true));
    assert!(session.frame().particle.is_some());
}
