use pulsegrid::{
    create_command_channel, create_ui_event_channel, Command, FloatParameter, MidiDeviceManager,
    MidiInput, MidiRemote, Parameter, PatternConfig, PatternRegistry, StepArrangement,
    TimingConfig, TransportScanner, UiEvent, UiEventSender,
};
use ringbuf::traits::Consumer;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Ringbuffer capacity constants
// MIDI can send roughly 1000 messages per second; one scheduling window
// is ~125 ms, so 512 slots leave generous headroom.
const COMMAND_RINGBUFFER_CAPACITY: usize = 512;
const UI_EVENT_RINGBUFFER_CAPACITY: usize = 512;

const BPM: f64 = 120.0;

fn main() {
    println!("=== Pulsegrid ===");
    println!("Euclidean step sequencer\n");

    let (command_tx, mut command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);
    let (ui_event_tx, mut ui_event_rx) = create_ui_event_channel(UI_EVENT_RINGBUFFER_CAPACITY);
    let events = UiEventSender::new(ui_event_tx);

    let timing = TimingConfig::default();
    let mut arrangement = StepArrangement::new();
    let mut registry = PatternRegistry::new(timing, events.clone());
    let mut remote = MidiRemote::new(events);
    let mut scanner = TransportScanner::new(timing.step_duration());

    // MIDI setup
    let devices = MidiDeviceManager::new().list_input_ports();
    if devices.is_empty() {
        println!("No MIDI devices found");
    } else {
        println!("MIDI input ports:");
        for device in &devices {
            println!("  [{}] {}", device.id, device.name);
        }
    }

    // The connection stays alive as long as this binding does
    let _midi_input = match MidiInput::new(command_tx) {
        Ok(input) => {
            if let Some(name) = input.port_name() {
                println!("Connected to MIDI port: {}", name);
                remote.add_midi_input(name);
            }
            Some(input)
        }
        Err(e) => {
            eprintln!("MIDI unavailable: {}", e);
            None
        }
    };

    // A controllable parameter for MIDI learn demos. Toggle learn mode
    // with a Command::ToggleLearnMode, then move a controller.
    let volume = Arc::new(FloatParameter::new("volume", 0.0, 1.0, 0.8));

    // Seed a few patterns
    for config in [
        PatternConfig::default(),
        PatternConfig { steps: 12, pulses: 5, ..Default::default() },
        PatternConfig { steps: 8, pulses: 3, rotation: 1, ..Default::default() },
    ] {
        registry.create_pattern(config, &mut arrangement);
    }

    println!("\n{} patterns running at {} BPM\n", registry.len(), BPM);

    let tick_ms = 60_000.0 / (BPM * timing.ppqn() as f64);
    let window = Duration::from_micros((tick_ms * scanner.lookahead() as f64 * 1000.0) as u64);

    loop {
        // Drain the command queue before advancing the transport
        while let Some(command) = command_rx.try_pop() {
            match command {
                Command::Midi { port, message } => {
                    if let Err(e) = remote.handle_message(&port, &message) {
                        eprintln!("MIDI error: {}", e);
                    }
                }
                Command::CreatePattern(config) => {
                    registry.create_pattern(config, &mut arrangement);
                }
                Command::DeleteSelectedPattern => {
                    registry.delete_selected_pattern(&mut arrangement);
                }
                Command::SetPatternProperty { property, value } => {
                    registry.set_pattern_property(property, value, &mut arrangement);
                }
                Command::ToggleLearnMode(enabled) => {
                    remote.set_learn_mode(enabled);
                    if enabled {
                        remote.select_parameter(volume.clone());
                        println!("MIDI learn: move a controller to bind '{}'", volume.name());
                    }
                }
                Command::Quit => return,
            }
        }

        if let Err(e) = scanner.advance(&mut registry, &arrangement) {
            eprintln!("Sequencer error: {}", e);
        }

        // A view layer would repaint on these; print the interesting ones
        while let Some(event) = ui_event_rx.try_pop() {
            if let UiEvent::BindingListChanged { port, channel, controller } = event {
                println!("bound CC {} (channel {}) on {}", controller, channel + 1, port);
            }
        }

        let grid: String = registry
            .patterns()
            .iter()
            .map(|p| if p.is_on { '#' } else { '.' })
            .collect();
        println!(
            "tick {:>6}  [{}]  volume {:.2}",
            scanner.playhead(),
            grid,
            volume.get_value()
        );

        thread::sleep(window);
    }
}
