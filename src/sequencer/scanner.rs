// Transport scanner - drives pattern playback from the scheduler clock
// One advance covers one lookahead window: scan the arrangement for the
// steps the window contains, then run every tick the window covers.

use crate::sequencer::arrangement::StepArrangement;
use crate::sequencer::registry::PatternRegistry;
use crate::EngineError;

/// Advances the registry against a running transport.
///
/// The scan for a window always happens before the runs for the ticks
/// that window covers, and ticks are run in increasing order with none
/// skipped; the edge-triggered off transition in the registry depends on
/// both.
pub struct TransportScanner {
    playhead: u64,
    lookahead: u64,
}

impl TransportScanner {
    pub fn new(lookahead: u64) -> Self {
        assert!(lookahead > 0, "Lookahead must be > 0");
        Self {
            playhead: 0,
            lookahead,
        }
    }

    pub fn playhead(&self) -> u64 {
        self.playhead
    }

    pub fn lookahead(&self) -> u64 {
        self.lookahead
    }

    /// Jump the playhead (e.g. transport relocate). Playback state is
    /// picked up again on the next advance.
    pub fn set_playhead(&mut self, tick: u64) {
        self.playhead = tick;
    }

    /// Process one lookahead window and move the playhead past it.
    pub fn advance(
        &mut self,
        registry: &mut PatternRegistry,
        arrangement: &StepArrangement,
    ) -> Result<(), EngineError> {
        let start = self.playhead;
        let end = start + self.lookahead;

        let queue = arrangement.scan(start, end);
        registry.on_transport_scan(&queue)?;

        for tick in start..end {
            registry.on_transport_run(tick);
        }

        self.playhead = end;
        Ok(())
    }
}
