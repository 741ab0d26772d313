// Arrangement - looping step tracks behind the pattern registry
// Each pattern owns one track; track order mirrors registry order.

use crate::sequencer::pattern::StepEvent;

/// Track collaborator the registry materializes patterns into.
///
/// Indices are positions in the track list: deleting a track shifts all
/// later indices down by one, exactly like deleting a pattern shifts the
/// registry, so the two stay aligned.
pub trait Arrangement {
    fn create_track(&mut self) -> usize;
    fn update_track(&mut self, index: usize, steps: Vec<StepEvent>);
    fn delete_track(&mut self, index: usize);
}

/// A step event picked up by the lookahead scan, tagged with the track
/// it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub track: usize,
    pub pitch: u8,
    pub velocity: u8,
    pub duration: u64,
}

#[derive(Debug, Clone, Default)]
struct Track {
    steps: Vec<StepEvent>,
    /// Loop length in ticks, derived from the step sequence
    duration: u64,
}

/// In-memory arrangement: a list of looping step tracks with a
/// wraparound-aware range scan for the playback lookahead.
#[derive(Debug, Default)]
pub struct StepArrangement {
    tracks: Vec<Track>,
}

impl StepArrangement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Collect every step whose loop position falls inside
    /// `[start, end)`, window edges taken modulo each track's loop
    /// length. A window spanning a full cycle or more yields each step
    /// once.
    pub fn scan(&self, start: u64, end: u64) -> Vec<ScheduledStep> {
        let mut queue = Vec::new();
        if end <= start {
            return queue;
        }

        for (track_index, track) in self.tracks.iter().enumerate() {
            if track.duration == 0 {
                continue;
            }

            let full_cycle = end - start >= track.duration;
            let window_start = start % track.duration;
            let window_end = end % track.duration;

            for step in &track.steps {
                let position = step.start % track.duration;
                if full_cycle || in_window(position, window_start, window_end) {
                    queue.push(ScheduledStep {
                        track: track_index,
                        pitch: step.pitch,
                        velocity: step.velocity,
                        duration: step.duration,
                    });
                }
            }
        }
        queue
    }
}

/// Half-open window test on the loop ring; `window_start == window_end`
/// means the window covers the whole cycle.
fn in_window(position: u64, window_start: u64, window_end: u64) -> bool {
    if window_start < window_end {
        position >= window_start && position < window_end
    } else {
        position >= window_start || position < window_end
    }
}

impl Arrangement for StepArrangement {
    fn create_track(&mut self) -> usize {
        self.tracks.push(Track::default());
        self.tracks.len() - 1
    }

    fn update_track(&mut self, index: usize, steps: Vec<StepEvent>) {
        assert!(index < self.tracks.len(), "Track index out of range");

        let duration = steps.iter().map(|s| s.start + s.duration).max().unwrap_or(0);
        self.tracks[index] = Track { steps, duration };
    }

    fn delete_track(&mut self, index: usize) {
        assert!(index < self.tracks.len(), "Track index out of range");
        self.tracks.remove(index);
    }
}
