// Commands - everything the outside world asks of the engine
// MIDI callbacks and UI handlers push these; the owning thread drains
// and dispatches them, so all engine mutation stays single-threaded.

use crate::midi::binding::PortId;
use crate::midi::event::MidiMessage;
use crate::sequencer::pattern::{PatternConfig, PatternProperty};

#[derive(Debug, Clone)]
pub enum Command {
    /// A message arrived on a MIDI input port
    Midi { port: PortId, message: MidiMessage },

    CreatePattern(PatternConfig),
    DeleteSelectedPattern,
    SetPatternProperty { property: PatternProperty, value: u32 },

    ToggleLearnMode(bool),
    Quit,
}
