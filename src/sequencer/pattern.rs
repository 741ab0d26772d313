// Pattern - one Euclidean rhythm and its playback state
// The registry owns the collection; a pattern is one ring of steps.

use crate::sequencer::timing::TimingConfig;

/// MIDI pitch every generated step carries
pub const STEP_PITCH: u8 = 60;

/// Velocity of a pulse step; rests get velocity 0
pub const STEP_VELOCITY: u8 = 100;

/// The editable pattern properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternProperty {
    Steps,
    Pulses,
    Rotation,
}

/// Creation-time settings for a pattern
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternConfig {
    pub steps: u32,
    pub pulses: u32,
    pub rotation: u32,
    pub canvas_x: f32,
    pub canvas_y: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            steps: 16,
            pulses: 4,
            rotation: 0,
            canvas_x: 0.0,
            canvas_y: 0.0,
        }
    }
}

/// One materialized pattern step, pushed to the arrangement track.
/// Rests are kept as velocity-0 events so a track always holds one
/// event per pattern slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StepEvent {
    pub pitch: u8,
    pub velocity: u8,
    /// Offset from the start of the pattern cycle, in ticks
    pub start: u64,
    pub duration: u64,
}

/// A Euclidean pattern with its derived step sequence and playback state.
///
/// `euclid_pattern` is recomputed by the registry whenever steps, pulses
/// or rotation change, before any external reader can observe it stale.
/// The `is_on`/`off_position`/`last_position` trio is mutated only by the
/// transport callbacks, `is_selected` only by the registry.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub steps: u32,
    pub pulses: u32,
    pub rotation: u32,

    /// Derived pulse/rest ring, length == steps (empty when degenerate)
    pub euclid_pattern: Vec<bool>,

    /// Creation-order index, assigned once and never changed
    pub channel: usize,

    /// Playhead position within the cycle, in ticks
    pub position: u64,
    /// Cycle length in ticks
    pub duration: u64,

    pub is_on: bool,
    pub is_selected: bool,

    /// Tick (mod duration) at which the current pulse ends
    pub off_position: u64,
    /// Position seen by the previous transport tick
    pub last_position: u64,

    // Bounding box on the pattern canvas, maintained by the view
    pub canvas_x: f32,
    pub canvas_y: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Pattern {
    /// Create a pattern from its config. The derived fields are filled in
    /// by the registry's first update.
    pub fn new(config: &PatternConfig, channel: usize) -> Self {
        Self {
            steps: config.steps,
            pulses: config.pulses,
            rotation: config.rotation,
            euclid_pattern: Vec::new(),
            channel,
            position: 0,
            duration: 0,
            is_on: false,
            is_selected: false,
            off_position: 0,
            last_position: 0,
            canvas_x: config.canvas_x,
            canvas_y: config.canvas_y,
            canvas_width: 0.0,
            canvas_height: 0.0,
        }
    }

    /// Materialize one step event per pattern slot
    pub fn step_events(&self, timing: &TimingConfig) -> Vec<StepEvent> {
        let step_duration = timing.step_duration();
        self.euclid_pattern
            .iter()
            .enumerate()
            .map(|(i, &pulse)| StepEvent {
                pitch: STEP_PITCH,
                velocity: if pulse { STEP_VELOCITY } else { 0 },
                start: i as u64 * step_duration,
                duration: step_duration,
            })
            .collect()
    }

    /// Hit test against the canvas bounding box
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.canvas_x
            && x <= self.canvas_x + self.canvas_width
            && y >= self.canvas_y
            && y <= self.canvas_y + self.canvas_height
    }
}
