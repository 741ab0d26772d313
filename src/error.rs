// Engine errors - the few conditions that are real integration faults
// Out-of-range user edits are clamped, degenerate requests yield empty
// results; neither is an error. See the registry and binding modules.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A scheduled step referenced a track index with no pattern behind it.
    #[error("no pattern for track index {0}")]
    UnknownTrack(usize),

    /// Control change address outside the valid MIDI ranges.
    #[error("control change out of range: channel {channel}, controller {controller}")]
    InvalidCc { channel: u8, controller: u8 },

    /// MIDI port setup failed.
    #[error("MIDI input error: {0}")]
    MidiInit(String),
}
