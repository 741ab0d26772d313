//! End-to-end engine tests
//!
//! Drives the full data flow the way the host application does: UI edits
//! into the registry, scheduler windows through the scanner, and MIDI
//! messages through the remote, checking the state every layer exposes.

use pulsegrid::{
    create_ui_event_channel, BindingKey, FloatParameter, MidiMessage, MidiRemote, Parameter,
    PatternConfig, PatternProperty, PatternRegistry, StepArrangement, TimingConfig,
    TransportScanner, UiEvent, UiEventSender,
};
use ringbuf::traits::Consumer;
use std::sync::Arc;

fn cc(channel: u8, controller: u8, value: u8) -> MidiMessage {
    MidiMessage::ControlChange { channel, controller, value }
}

#[test]
fn test_pattern_lifecycle_and_playback() {
    let (ui_tx, mut ui_rx) = create_ui_event_channel(4096);
    let timing = TimingConfig::default();
    let mut arrangement = StepArrangement::new();
    let mut registry = PatternRegistry::new(timing, UiEventSender::new(ui_tx));
    let mut scanner = TransportScanner::new(timing.step_duration());

    // Two patterns; creation selects the newest
    registry.create_pattern(PatternConfig::default(), &mut arrangement);
    registry.create_pattern(
        PatternConfig { steps: 8, pulses: 8, ..Default::default() },
        &mut arrangement,
    );
    assert_eq!(registry.selected_index(), Some(1));
    assert_eq!(arrangement.track_count(), 2);

    // Pattern 1 has a pulse on every step
    assert!(registry.pattern(1).unwrap().euclid_pattern.iter().all(|&p| p));

    // Shrinking its steps below pulses drags pulses along
    registry.set_pattern_property(PatternProperty::Steps, 4, &mut arrangement);
    let edited = registry.pattern(1).unwrap();
    assert_eq!(edited.steps, 4);
    assert_eq!(edited.pulses, 4);
    assert_eq!(edited.duration, 480);

    // First window: both patterns open on a pulse
    scanner.advance(&mut registry, &arrangement).unwrap();
    assert!(registry.pattern(0).unwrap().is_on);
    assert!(registry.pattern(1).unwrap().is_on);

    // Second window: pattern 0 (E(16,4)) goes dark until its next pulse
    // at step 4, while pattern 1 re-armed on this window's pulse and its
    // off position moved one step further along the cycle.
    scanner.advance(&mut registry, &arrangement).unwrap();
    assert!(!registry.pattern(0).unwrap().is_on);
    assert_eq!(registry.pattern(1).unwrap().off_position, 239);

    // The settings view heard about the forced pulses clamp
    let mut saw_forced_clamp = false;
    while let Some(event) = ui_rx.try_pop() {
        if event == (UiEvent::SettingsChanged { property: PatternProperty::Pulses, value: 4 }) {
            saw_forced_clamp = true;
        }
    }
    assert!(saw_forced_clamp);

    // Deleting the selected pattern shrinks both lists together
    registry.delete_selected_pattern(&mut arrangement);
    assert_eq!(registry.len(), 1);
    assert_eq!(arrangement.track_count(), 1);
    assert_eq!(registry.selected_index(), None);

    // And deleting again with no selection changes nothing
    registry.delete_selected_pattern(&mut arrangement);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_learn_bind_then_drive_parameter() {
    let (ui_tx, mut ui_rx) = create_ui_event_channel(64);
    let mut remote = MidiRemote::new(UiEventSender::new(ui_tx));
    remote.add_midi_input("nanoKONTROL");

    let cutoff = Arc::new(FloatParameter::new("cutoff", 20.0, 20_000.0, 20.0));

    // Learn: select the parameter, turn a knob
    remote.set_learn_mode(true);
    remote.select_parameter(cutoff.clone());
    remote.handle_message("nanoKONTROL", &cc(0, 74, 30)).unwrap();
    remote.set_learn_mode(false);

    let bound = ui_rx
        .try_pop()
        .expect("binding notification expected");
    assert_eq!(
        bound,
        UiEvent::BindingListChanged {
            port: "nanoKONTROL".to_string(),
            channel: 0,
            controller: 74,
        }
    );

    // Normal mode: the bound controller drives the parameter
    remote.handle_message("nanoKONTROL", &cc(0, 74, 127)).unwrap();
    assert_eq!(cutoff.get_value(), 20_000.0);

    // An unbound controller does nothing
    remote.handle_message("nanoKONTROL", &cc(0, 75, 0)).unwrap();
    assert_eq!(cutoff.get_value(), 20_000.0);
}

#[test]
fn test_rebinding_cc20_replaces_p1_with_p2() {
    let (ui_tx, _ui_rx) = create_ui_event_channel(64);
    let mut remote = MidiRemote::new(UiEventSender::new(ui_tx));
    remote.add_midi_input("A");

    let p1 = Arc::new(FloatParameter::new("p1", 0.0, 1.0, 0.0));
    let p2 = Arc::new(FloatParameter::new("p2", 0.0, 1.0, 0.0));

    // Bind CC 20 on channel 1 of port A to p1, then to p2
    for param in [p1.clone(), p2.clone()] {
        remote.set_learn_mode(true);
        remote.select_parameter(param);
        remote.handle_message("A", &cc(1, 20, 0)).unwrap();
        remote.set_learn_mode(false);
    }

    // Only the p2 binding is reachable by that key
    assert_eq!(remote.bindings().len(), 1);
    let key = BindingKey::new("A", 1, 20).unwrap();
    assert_eq!(remote.bindings().lookup(&key).unwrap().id(), p2.id());

    remote.handle_message("A", &cc(1, 20, 127)).unwrap();
    assert_eq!(p1.get_value(), 0.0);
    assert_eq!(p2.get_value(), 1.0);
}

#[test]
fn test_scan_and_run_full_cycle_state_machine() {
    let (ui_tx, _ui_rx) = create_ui_event_channel(4096);
    let timing = TimingConfig::default();
    let mut arrangement = StepArrangement::new();
    let mut registry = PatternRegistry::new(timing, UiEventSender::new(ui_tx));

    // E(4,1): one pulse at step 0 of a 480-tick cycle
    registry.create_pattern(
        PatternConfig { steps: 4, pulses: 1, ..Default::default() },
        &mut arrangement,
    );

    // Half-step windows so a flash is observable across window edges
    let mut scanner = TransportScanner::new(timing.step_duration() / 2);

    // Drive two full cycles and record every off->on transition
    let mut transitions = Vec::new();
    let mut was_on = false;
    for _ in 0..16 {
        scanner.advance(&mut registry, &arrangement).unwrap();
        let is_on = registry.pattern(0).unwrap().is_on;
        if is_on && !was_on {
            transitions.push(scanner.playhead());
        }
        was_on = is_on;
    }

    // The pattern re-armed exactly once per cycle
    assert_eq!(transitions.len(), 2);
    assert_eq!(transitions[1] - transitions[0], 480);
}
