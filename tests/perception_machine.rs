//! Behaviour of a single perception machine driven through recording
//! collaborators.

use approx::assert_relative_eq;
use glam::Vec3;
use lurker::perception::{AnimationFlags, AudioCue};
use lurker::{
    BehaviourState, ConfigFault, Diagnostic, EnemyConfig, Lifecycle, PerceptionStateMachine, Pose,
};
use rstest::{fixture, rstest};
use test_utils::FakeHost;

const BEHIND: Vec3 = Vec3::new(0.0, 0.0, 50.0);
const AHEAD_NEAR: Vec3 = Vec3::new(0.0, 0.0, -5.0);

fn pose() -> Pose {
    Pose::new(Vec3::ZERO, Vec3::NEG_Z)
}

fn route() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(4.0, 0.0, -4.0),
        Vec3::new(4.0, 0.0, 0.0),
    ]
}

#[fixture]
fn patrol() -> (PerceptionStateMachine, FakeHost) {
    let machine = PerceptionStateMachine::new(EnemyConfig::with_waypoints(route()))
        .expect("default tunables are valid");
    (machine, FakeHost::with_player(BEHIND))
}

fn started(mut patrol: (PerceptionStateMachine, FakeHost)) -> (PerceptionStateMachine, FakeHost) {
    let (machine, host) = &mut patrol;
    machine.start(&mut host.host()).expect("patrol starts");
    patrol
}

fn arrive(machine: &mut PerceptionStateMachine, host: &mut FakeHost) {
    host.navigator.arrive();
    machine.tick(0.0, pose(), &mut host.host());
}

#[rstest]
fn start_heads_for_first_waypoint(patrol: (PerceptionStateMachine, FakeHost)) {
    let (machine, host) = started(patrol);
    assert_eq!(machine.lifecycle(), Lifecycle::Running);
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert_eq!(machine.waypoint_index(), 0);
    assert_eq!(host.navigator.destinations, vec![Vec3::new(0.0, 0.0, -4.0)]);
    assert_relative_eq!(host.navigator.speed, 2.0);
    assert!(host.diagnostics.is_empty());
}

#[rstest]
fn walking_plays_walk_cues(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert!(host.animator.walking && !host.animator.chasing);
    assert_eq!(host.audio.clip, Some(AudioCue::Walking));
    assert_eq!(host.audio.starts, 1);
}

#[rstest]
fn arrival_switches_to_idle(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    arrive(&mut machine, &mut host);
    assert_eq!(machine.state(), BehaviourState::Idle);
    assert_relative_eq!(machine.idle_timer(), 0.0);
    machine.tick(0.1, pose(), &mut host.host());
    assert_eq!(
        AnimationFlags {
            walking: host.animator.walking,
            chasing: host.animator.chasing
        },
        AnimationFlags::IDLE
    );
    assert_eq!(host.audio.clip, Some(AudioCue::Idle));
}

#[rstest]
fn idling_short_of_the_threshold_stays_idle(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    arrive(&mut machine, &mut host);
    machine.tick(1.5, pose(), &mut host.host());
    machine.tick(0.4, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Idle);
    assert_eq!(machine.waypoint_index(), 0);

    machine.tick(0.5, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert_eq!(machine.waypoint_index(), 1);
    assert_relative_eq!(machine.idle_timer(), 0.0);
}

#[rstest]
fn idling_exactly_the_threshold_moves_on(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    arrive(&mut machine, &mut host);
    machine.tick(1.75, pose(), &mut host.host());
    machine.tick(0.25, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert_eq!(host.navigator.destination, Some(Vec3::new(4.0, 0.0, -4.0)));
}

#[rstest]
fn waypoints_wrap_around(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    for _ in 0..4 {
        arrive(&mut machine, &mut host);
        machine.tick(2.0, pose(), &mut host.host());
    }
    let waypoints = route();
    let expected: Vec<Vec3> = waypoints.iter().cycle().take(5).copied().collect();
    assert_eq!(host.navigator.destinations, expected);
    assert_eq!(machine.waypoint_index(), 1);
    assert_eq!(machine.current_waypoint(), Some(Vec3::new(4.0, 0.0, -4.0)));
}

#[rstest]
fn player_ahead_starts_a_chase_on_the_first_tick(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    host.place_player(Some(AHEAD_NEAR));
    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Chasing);
    assert_relative_eq!(host.navigator.speed, 4.0);
    assert_eq!(host.navigator.destination, Some(AHEAD_NEAR));
    assert_eq!(
        host.diagnostics,
        vec![Diagnostic::PlayerDetected { at: AHEAD_NEAR }]
    );
}

#[rstest]
#[case::beside(Vec3::new(5.0, 0.0, 0.0))]
#[case::behind(Vec3::new(0.0, 0.0, 5.0))]
#[case::out_of_range(Vec3::new(0.0, 0.0, -20.0))]
fn player_outside_the_cone_is_ignored(
    patrol: (PerceptionStateMachine, FakeHost),
    #[case] player: Vec3,
) {
    let (mut machine, mut host) = started(patrol);
    host.place_player(Some(player));
    assert!(!machine.detect(pose(), &mut host.host()));
    assert_eq!(machine.state(), BehaviourState::Walking);
}

#[rstest]
fn obstacles_block_line_of_sight(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    host.place_player(Some(Vec3::new(0.0, 0.0, -8.0)));
    host.add_obstacle(Vec3::new(0.0, 0.0, -4.0), 1.0);
    assert!(!machine.detect(pose(), &mut host.host()));
    assert_eq!(machine.state(), BehaviourState::Walking);
}

#[rstest]
fn repeated_detection_is_idempotent(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    host.place_player(Some(AHEAD_NEAR));
    assert!(machine.detect(pose(), &mut host.host()));
    assert!(machine.detect(pose(), &mut host.host()));
    assert_eq!(machine.state(), BehaviourState::Chasing);
    assert_eq!(machine.waypoint_index(), 0);
    assert_eq!(host.diagnostics.len(), 1);
}

#[rstest]
fn chase_ends_when_player_leaves_sight_distance(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    let near = Vec3::new(0.0, 0.0, -8.0);
    host.place_player(Some(near));
    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Chasing);

    host.place_player(Some(Vec3::new(0.0, 0.0, -12.0)));
    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert_relative_eq!(host.navigator.speed, 2.0);
    assert_eq!(machine.waypoint_index(), 0);
    assert!(matches!(
        host.diagnostics.last(),
        Some(Diagnostic::PlayerLost { distance: Some(d) }) if (*d - 12.0).abs() < 1e-4
    ));
}

#[rstest]
fn chase_persists_within_sight_distance_even_unseen(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    host.place_player(Some(Vec3::new(0.0, 0.0, -8.0)));
    machine.tick(0.05, pose(), &mut host.host());
    host.place_player(Some(Vec3::new(0.0, 0.0, 6.0)));
    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Chasing);
    assert_eq!(host.navigator.destination, Some(Vec3::new(0.0, 0.0, 6.0)));
}

#[rstest]
fn vanished_player_ends_the_chase(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    host.place_player(Some(AHEAD_NEAR));
    machine.tick(0.05, pose(), &mut host.host());
    host.place_player(None);
    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert_eq!(
        host.diagnostics.last(),
        Some(&Diagnostic::PlayerLost { distance: None })
    );
}

#[rstest]
fn detection_waits_for_the_cadence() {
    let config = EnemyConfig {
        detection_interval: 0.25,
        ..EnemyConfig::with_waypoints(route())
    };
    let mut machine = PerceptionStateMachine::new(config).expect("valid config");
    let mut host = FakeHost::with_player(BEHIND);
    machine.start(&mut host.host()).expect("patrol starts");

    machine.tick(0.05, pose(), &mut host.host());
    host.place_player(Some(AHEAD_NEAR));
    for _ in 0..4 {
        machine.tick(0.05, pose(), &mut host.host());
    }
    assert_eq!(machine.state(), BehaviourState::Walking);

    machine.tick(0.05, pose(), &mut host.host());
    assert_eq!(machine.state(), BehaviourState::Chasing);
}

#[rstest]
fn empty_route_faults_and_never_moves() {
    let mut machine =
        PerceptionStateMachine::new(EnemyConfig::default()).expect("scalars are valid");
    let mut host = FakeHost::with_player(AHEAD_NEAR);
    let fault = machine.start(&mut host.host());
    assert_eq!(fault, Err(ConfigFault::NoWaypoints));
    assert_eq!(machine.current_waypoint(), None);
    assert_eq!(machine.lifecycle(), Lifecycle::Faulted(ConfigFault::NoWaypoints));

    for _ in 0..10 {
        machine.tick(1.0, pose(), &mut host.host());
    }
    assert_eq!(machine.state(), BehaviourState::Idle);
    assert!(host.navigator.destinations.is_empty());
    assert_eq!(
        host.diagnostics,
        vec![Diagnostic::Misconfigured(ConfigFault::NoWaypoints)]
    );
}

#[rstest]
fn stopped_machine_ignores_the_player(patrol: (PerceptionStateMachine, FakeHost)) {
    let (mut machine, mut host) = started(patrol);
    machine.stop();
    host.place_player(Some(AHEAD_NEAR));
    machine.tick(0.05, pose(), &mut host.host());
    assert!(!machine.detect(pose(), &mut host.host()));
    assert_eq!(machine.state(), BehaviourState::Walking);
    assert_eq!(machine.lifecycle(), Lifecycle::Stopped);
}
