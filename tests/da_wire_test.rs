//! Integration test: Da Wire rounds driven by real tick timing

use kosh::core::constants::{WIRE_BASE_SPEED, WIRE_WATCH_SECONDS};
use kosh::core::{Key, ScriptedRng};
use kosh::quests::da_wire::{difficulty_multiplier, WirePhase};
use kosh::{ActiveQuest, HostEvent, PlayerProfile, QuestHost, QuestId};

fn wire(host: &QuestHost<ScriptedRng>) -> (u32, WirePhase, f64) {
    match host.active() {
        Some(ActiveQuest::DaWire(quest)) => (quest.round(), quest.phase(), quest.wire_position()),
        _ => panic!("da wire should be running"),
    }
}

/// Watch, then wait for the wire to swing back through the middle.
fn wait_for_center(host: &mut QuestHost<ScriptedRng>) {
    let (round, _, _) = wire(host);
    host.tick(WIRE_WATCH_SECONDS);
    let (_, phase, position) = wire(host);
    assert_eq!(phase, WirePhase::TimingWindow);
    assert!((position - 1.0).abs() < 1e-9);

    host.tick(1.0 / (WIRE_BASE_SPEED * difficulty_multiplier(round)));
    let (_, _, position) = wire(host);
    assert!(position.abs() < 1e-6);
}

fn play_winning_round(host: &mut QuestHost<ScriptedRng>) {
    wait_for_center(host);
    host.key_down(Key::Action);
    assert_eq!(wire(host).1, WirePhase::Hold);
    host.tick(0.5);
    host.key_up(Key::Action);
    assert_eq!(wire(host).1, WirePhase::RoundResult);
    host.key_down(Key::Confirm);
}

#[test]
fn test_clean_sweep_wins() {
    let mut host = QuestHost::new(PlayerProfile::new(), ScriptedRng::constant(0.5));
    host.start(QuestId::DaWire).expect("start");

    for _ in 0..5 {
        play_winning_round(&mut host);
    }

    assert!(!host.is_active());
    assert!(host.profile().is_completed(QuestId::DaWire));
    assert_eq!(host.profile().energy(), 100);
    let events = host.take_events();
    assert!(matches!(
        events.as_slice(),
        [HostEvent::QuestTerminated(outcome)]
            if outcome.is_success() && outcome.detail == "Won 5/5 rounds. The string is yours!"
    ));
}

#[test]
fn test_early_release_loses_round() {
    let mut host = QuestHost::new(PlayerProfile::new(), ScriptedRng::constant(0.5));
    host.start(QuestId::DaWire).expect("start");

    wait_for_center(&mut host);
    host.key_down(Key::Action);
    host.tick(0.1);
    host.key_up(Key::Action);
    assert_eq!(wire(&host).1, WirePhase::RoundResult);
    match host.active() {
        Some(ActiveQuest::DaWire(quest)) => {
            assert_eq!(quest.wins(), 0);
            assert_eq!(quest.result_message(), Some("Let go too soon! (Round 1/5)"));
        }
        _ => panic!("da wire should be running"),
    }
}

#[test]
fn test_always_missing_fails() {
    let mut host = QuestHost::new(PlayerProfile::new(), ScriptedRng::constant(0.5));
    host.start(QuestId::DaWire).expect("start");

    for _ in 0..5 {
        // Licking during the watch phase is ignored
        host.key_down(Key::Action);
        assert_eq!(wire(&host).1, WirePhase::Watch);
        host.key_up(Key::Action);

        host.tick(WIRE_WATCH_SECONDS);
        host.key_down(Key::Action);
        host.key_up(Key::Action);
        host.key_down(Key::Confirm);
    }

    assert!(!host.is_active());
    assert!(!host.profile().is_completed(QuestId::DaWire));
    let events = host.take_events();
    assert!(matches!(
        events.as_slice(),
        [HostEvent::QuestTerminated(outcome)]
            if !outcome.is_success() && outcome.detail == "Only got 0/5 rounds. Need at least 2!"
    ));
}
