// Pulsegrid - Euclidean step sequencer core
// Library exports for the binary, tests and benchmarks

pub mod error;
pub mod messaging;
pub mod midi;
pub mod param;
pub mod sequencer;

// Re-export commonly used types for convenience
pub use error::EngineError;
pub use messaging::channels::{create_command_channel, create_ui_event_channel};
pub use messaging::command::Command;
pub use messaging::ui_event::{UiEvent, UiEventSender};
pub use midi::binding::{BindingKey, BindingTable, PortId};
pub use midi::device::MidiDeviceManager;
pub use midi::event::MidiMessage;
pub use midi::input::MidiInput;
pub use midi::remote::MidiRemote;
pub use param::{AtomicF32, FloatParameter, Parameter, ParameterId};
pub use sequencer::{
    bjorklund, Arrangement, Pattern, PatternConfig, PatternProperty, PatternRegistry,
    ScheduledStep, StepArrangement, StepEvent, TimingConfig, TransportScanner, MAX_STEPS,
};
