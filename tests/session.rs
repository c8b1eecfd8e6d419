use approx::assert_relative_eq;
use nalgebra::Vector3;
use rapier3d::prelude::RigidBodyHandle;
use std::time::{Duration, Instant};
use tumble::physics::{BodyDesc, BodyShape};
use tumble::rendering::HeadlessTarget;
use tumble::scene::Scene;
use tumble::session::{Session, TickOutcome, TrackError};
use tumble::sync::{StepMode, SyncConfig};

const TIMESTEP: Duration = Duration::from_millis(16);

fn fixed_session() -> (Session, Instant) {
    let origin = Instant::now();
    let config = SyncConfig {
        mode: StepMode::Fixed { timestep: TIMESTEP },
        substeps: 1,
    };
    (Session::new_at(Scene::new(), config, origin), origin)
}

/// Drives `n` ticks, one whole timestep apart.
fn run_ticks(session: &mut Session, target: &mut HeadlessTarget, origin: Instant, n: u32) {
    for i in 1..=n {
        let outcome = session.tick_at(origin + TIMESTEP * i, target);
        assert_eq!(outcome, TickOutcome::Continue);
    }
}

fn die() -> BodyDesc {
    BodyDesc::dynamic(
        5.0,
        BodyShape::Cuboid {
            hx: 0.38,
            hy: 0.38,
            hz: 0.38,
        },
    )
}

#[test]
fn node_position_matches_body_after_tick() {
    let (mut session, origin) = fixed_session();
    let mut target = HeadlessTarget::new();

    let (node, body) = session
        .spawn_tracked("Die", &die().at(-5.0, 5.0, -5.0).with_velocity(2.0, 2.0, 2.0))
        .unwrap();

    run_ticks(&mut session, &mut target, origin, 5);

    let (body_pos, body_rot) = session.physics.pose(body).unwrap();
    let node = session.scene.node(node).unwrap();
    assert_eq!(*node.transform.position(), body_pos);
    assert_eq!(*node.transform.rotation(), body_rot);
}

#[test]
fn node_orientation_stays_unit_length() {
    let (mut session, origin) = fixed_session();
    let mut target = HeadlessTarget::new();

    let (node, _) = session
        .spawn_tracked(
            "Die",
            &die()
                .at(0.0, 5.0, 0.0)
                .with_axis_angle(Vector3::new(1.0, 0.0, 2.0), 20.0)
                .with_local_impulse(Vector3::new(2.0, 3.0, 5.0)),
        )
        .unwrap();

    for i in 1..=60 {
        let outcome = session.tick_at(origin + TIMESTEP * i, &mut target);
        assert_eq!(outcome, TickOutcome::Continue);

        let node = session.scene.node(node).unwrap();
        assert_relative_eq!(node.transform.rotation().norm(), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn static_body_never_moves() {
    let (mut session, origin) = fixed_session();
    let mut target = HeadlessTarget::new();

    let (node, _) = session
        .spawn_tracked(
            "Ground",
            &BodyDesc::fixed(BodyShape::Cuboid {
                hx: 10.0,
                hy: 0.02,
                hz: 10.0,
            })
            .at(0.0, 1.0, 0.0),
        )
        .unwrap();

    let before = *session.scene.node(node).unwrap().transform.position();
    run_ticks(&mut session, &mut target, origin, 30);
    let after = *session.scene.node(node).unwrap().transform.position();

    assert_eq!(before, after);
    assert_eq!(after, Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn unsupported_body_falls_until_contact() {
    let (mut session, origin) = fixed_session();
    let mut target = HeadlessTarget::new();

    session
        .spawn_tracked(
            "Ground",
            &BodyDesc::fixed(BodyShape::Cuboid {
                hx: 10.0,
                hy: 0.02,
                hz: 10.0,
            }),
        )
        .unwrap();
    let (node, _) = session.spawn_tracked("Die", &die().at(0.0, 5.0, 0.0)).unwrap();

    let mut last_y = session.scene.node(node).unwrap().transform.position().y;
    let mut contact = false;

    for i in 1..=240 {
        let outcome = session.tick_at(origin + TIMESTEP * i, &mut target);
        assert_eq!(outcome, TickOutcome::Continue);

        let y = session.scene.node(node).unwrap().transform.position().y;
        if y >= last_y {
            // Descent only stops once the die reaches the ground.
            contact = true;
            break;
        }
        last_y = y;
    }

    assert!(contact, "die never reached the ground");
    assert!(last_y < 1.0, "descent stopped mid-air at y={last_y}");
}

#[test]
fn unready_body_leaves_node_untouched() {
    let (mut session, origin) = fixed_session();
    let mut target = HeadlessTarget::new();

    let node = session.scene.new_node("Pending");
    session
        .scene
        .node_mut(node)
        .unwrap()
        .transform
        .set_position(1.0, 2.0, 3.0);

    // Pairing against a handle whose body does not exist yet, as when an
    // asynchronous load has not completed.
    session.track(RigidBodyHandle::invalid(), node).unwrap();

    run_ticks(&mut session, &mut target, origin, 10);

    let node = session.scene.node(node).unwrap();
    assert_eq!(*node.transform.position(), Vector3::new(1.0, 2.0, 3.0));
}

#[test]
fn second_pair_for_a_node_is_rejected() {
    let (mut session, _) = fixed_session();

    let (node, _) = session.spawn_tracked("Die", &die()).unwrap();
    let other_body = session.physics.spawn(&die().at(3.0, 3.0, 3.0));

    let err = session.track(other_body, node).unwrap_err();
    assert_eq!(err, TrackError::NodeAlreadyTracked { node });
    assert_eq!(session.pairs().len(), 1);
}

#[test]
fn tracking_a_missing_node_is_rejected() {
    let (mut session, _) = fixed_session();
    let mut other_scene = Scene::new();
    let foreign = other_scene.new_node("Elsewhere");

    let body = session.physics.spawn(&die());
    let err = session.track(body, foreign).unwrap_err();
    assert_eq!(err, TrackError::NodeMissing { node: foreign });
}

#[test]
fn render_failure_halts_the_loop() {
    let (mut session, origin) = fixed_session();
    let mut target = HeadlessTarget::failing_after(2);

    session.spawn_tracked("Die", &die().at(0.0, 5.0, 0.0)).unwrap();

    assert_eq!(
        session.tick_at(origin + TIMESTEP, &mut target),
        TickOutcome::Continue
    );
    assert_eq!(
        session.tick_at(origin + TIMESTEP * 2, &mut target),
        TickOutcome::Continue
    );
    assert_eq!(
        session.tick_at(origin + TIMESTEP * 3, &mut target),
        TickOutcome::Halt
    );
    assert_eq!(target.frames(), 2);
}

#[test]
fn substeps_are_a_configuration_option() {
    let origin = Instant::now();
    let config = SyncConfig::default().with_substeps(10);
    let mut session = Session::new_at(Scene::new(), config, origin);
    let mut target = HeadlessTarget::new();

    let (node, _) = session.spawn_tracked("Die", &die().at(0.0, 5.0, 0.0)).unwrap();
    run_ticks(&mut session, &mut target, origin, 10);

    assert!(session.scene.node(node).unwrap().transform.position().y < 5.0);
}

#[test]
fn measured_mode_advances_by_elapsed_time() {
    let origin = Instant::now();
    let mut session = Session::new_at(Scene::new(), SyncConfig::measured(), origin);
    let mut target = HeadlessTarget::new();

    let (node, _) = session.spawn_tracked("Die", &die().at(0.0, 5.0, 0.0)).unwrap();

    let outcome = session.tick_at(origin + Duration::from_millis(100), &mut target);
    assert_eq!(outcome, TickOutcome::Continue);

    let y = session.scene.node(node).unwrap().transform.position().y;
    assert!(y < 5.0);
}
