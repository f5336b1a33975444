use bevy::math::Vec3;
use rigging::catenary;
use rigging::{InertialInterpolator, Interpolator, State};

#[test]
fn ten_metre_span_with_two_metres_slack() {
    let mut pts = vec![Vec3::splat(99.0); 3];
    catenary::solve(&mut pts, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 10, 12.0);

    assert_eq!(pts.len(), 11);
    for (i, p) in pts.iter().enumerate() {
        if i != 5 {
            assert!(pts[5].y < p.y);
        }
    }
    assert!(pts[5].y < 0.0);
}

#[test]
fn buffer_is_reused_between_solves() {
    let mut pts = Vec::new();
    catenary::solve(&mut pts, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 32, 6.0);
    assert_eq!(pts.len(), 33);

    catenary::solve(&mut pts, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 32, 4.0);
    assert_eq!(pts, vec![Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]);
}

#[test]
fn door_opens_in_half_a_second() {
    let mut door = Interpolator::new().with_max_speed(2.0);
    door.progress();
    for _ in 0..4 {
        door.update(0.25);
    }
    assert_eq!(door.value(), 1.0);
    assert_eq!(door.state(), State::AtEnd);

    door.toggle();
    assert_eq!(door.state(), State::Regressing);
}

#[test]
fn periscope_brakes_before_the_top() {
    let mut periscope = InertialInterpolator::new()
        .with_max_speed(0.5)
        .with_acceleration(1.0);
    periscope.progress();
    for _ in 0..40 {
        periscope.update(1.0 / 50.0);
    }
    let target = periscope.drive().end_target();
    periscope.start_braking();

    for _ in 0..500 {
        periscope.update(1.0 / 50.0);
        assert!(periscope.value() <= target);
        assert!(periscope.value() >= 0.0);
    }
    assert_eq!(periscope.velocity(), 0.0);
}
