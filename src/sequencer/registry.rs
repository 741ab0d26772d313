// Pattern registry - owns the pattern collection and selection state
// UI edits land here; the registry materializes patterns into the
// arrangement and drives per-pattern playback state from the transport.

use crate::messaging::ui_event::{UiEvent, UiEventSender};
use crate::sequencer::arrangement::{Arrangement, ScheduledStep};
use crate::sequencer::euclid::{bjorklund, rotate};
use crate::sequencer::pattern::{Pattern, PatternConfig, PatternProperty};
use crate::sequencer::timing::TimingConfig;
use crate::EngineError;

/// Upper bound on the editable step count
pub const MAX_STEPS: u32 = 64;

/// Ordered collection of patterns. Insertion order is creation order is
/// track order: the pattern at index `i` plays the arrangement track at
/// index `i`, and deleting a pattern deletes its track so both lists
/// shift together.
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    /// Non-owning selection pointer; at most one pattern is selected
    selected: Option<usize>,
    timing: TimingConfig,
    events: UiEventSender,
}

impl PatternRegistry {
    pub fn new(timing: TimingConfig, events: UiEventSender) -> Self {
        Self {
            patterns: Vec::new(),
            selected: None,
            timing,
            events,
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pattern(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Mutable access for the view layer (canvas bounding boxes)
    pub fn pattern_mut(&mut self, index: usize) -> Option<&mut Pattern> {
        self.patterns.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_pattern(&self) -> Option<&Pattern> {
        self.selected.and_then(|i| self.patterns.get(i))
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Create a pattern, materialize its track and select it.
    /// Returns the new pattern's index.
    pub fn create_pattern(
        &mut self,
        config: PatternConfig,
        arrangement: &mut dyn Arrangement,
    ) -> usize {
        let channel = self.patterns.len();
        let track_index = arrangement.create_track();
        debug_assert_eq!(track_index, channel, "track list out of sync with registry");

        self.patterns.push(Pattern::new(&config, channel));
        self.update_pattern(channel, arrangement);

        // select_pattern also emits the redraw
        self.select_pattern(Some(channel));
        channel
    }

    /// Recompute the derived pattern state and push the step sequence to
    /// the arrangement. Must be called after any steps/pulses/rotation
    /// mutation; there is no automatic recomputation.
    pub fn update_pattern(&mut self, index: usize, arrangement: &mut dyn Arrangement) {
        let timing = self.timing;
        let Some(pattern) = self.patterns.get_mut(index) else {
            return;
        };

        let mut euclid_pattern = bjorklund(pattern.steps as usize, pattern.pulses as usize);
        rotate(&mut euclid_pattern, pattern.rotation as usize);

        pattern.euclid_pattern = euclid_pattern;
        pattern.duration = timing.pattern_duration(pattern.steps);

        let steps = pattern.step_events(&timing);
        arrangement.update_track(index, steps);
    }

    /// Select one pattern, or clear the selection with `None`. Exactly
    /// one pattern carries `is_selected` afterwards, or none does.
    pub fn select_pattern(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.patterns.len());

        for (i, pattern) in self.patterns.iter_mut().enumerate() {
            pattern.is_selected = Some(i) == index;
        }
        self.selected = index;

        self.events.send(UiEvent::Redraw);
        self.events.send(UiEvent::SelectionChanged { index });
    }

    /// Delete the selected pattern and its track. A documented no-op
    /// when nothing is selected.
    pub fn delete_selected_pattern(&mut self, arrangement: &mut dyn Arrangement) {
        let Some(index) = self.selected else {
            return;
        };

        arrangement.delete_track(index);
        self.patterns.remove(index);

        // select_pattern also emits the redraw
        self.select_pattern(None);
    }

    /// Apply a property edit to the selected pattern, clamped rather than
    /// rejected. Shrinking `steps` below the current pulses or rotation
    /// drags those down with it and notifies the settings view of the
    /// forced change. A no-op when nothing is selected.
    pub fn set_pattern_property(
        &mut self,
        property: PatternProperty,
        value: u32,
        arrangement: &mut dyn Arrangement,
    ) {
        let Some(index) = self.selected else {
            return;
        };

        let value = match property {
            PatternProperty::Steps => {
                let value = value.min(MAX_STEPS);
                let pattern = &mut self.patterns[index];
                pattern.steps = value;
                if pattern.pulses > value {
                    pattern.pulses = value;
                    self.events.send(UiEvent::SettingsChanged {
                        property: PatternProperty::Pulses,
                        value,
                    });
                }
                if pattern.rotation > value {
                    pattern.rotation = value;
                    self.events.send(UiEvent::SettingsChanged {
                        property: PatternProperty::Rotation,
                        value,
                    });
                }
                value
            }
            PatternProperty::Pulses | PatternProperty::Rotation => {
                let pattern = &mut self.patterns[index];
                let value = value.min(pattern.steps);
                match property {
                    PatternProperty::Pulses => pattern.pulses = value,
                    PatternProperty::Rotation => pattern.rotation = value,
                    PatternProperty::Steps => unreachable!(),
                }
                value
            }
        };

        self.update_pattern(index, arrangement);
        self.events.send(UiEvent::SettingsChanged { property, value });
        self.events.send(UiEvent::Redraw);
    }

    /// First pattern (in registry order) whose canvas box contains the
    /// point; used for hit-testing clicks.
    pub fn pattern_at(&self, x: f32, y: f32) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.contains_point(x, y))
    }

    /// Advance all patterns to a transport tick and apply the
    /// edge-triggered off transition: a pattern turns off on the tick
    /// where its position reaches `off_position`, having been below it on
    /// the previous tick. Both positions wrap modulo the cycle length, so
    /// the comparison survives the loop seam. Must be called for every
    /// tick in increasing order.
    pub fn on_transport_run(&mut self, tick: u64) {
        for pattern in &mut self.patterns {
            if pattern.duration == 0 {
                pattern.position = 0;
                pattern.last_position = 0;
                continue;
            }

            pattern.position = tick % pattern.duration;

            if pattern.is_on
                && pattern.last_position <= pattern.off_position
                && pattern.position >= pattern.off_position
            {
                pattern.is_on = false;
            }

            pattern.last_position = pattern.position;
        }

        self.events.send(UiEvent::Redraw);
    }

    /// Mark patterns on for every non-silent step in the lookahead
    /// queue. Silent steps never turn a pattern on. A step referencing a
    /// track with no pattern is an integration fault.
    pub fn on_transport_scan(&mut self, queue: &[ScheduledStep]) -> Result<(), EngineError> {
        for step in queue {
            if step.velocity == 0 {
                continue;
            }

            let pattern = self
                .patterns
                .get_mut(step.track)
                .ok_or(EngineError::UnknownTrack(step.track))?;

            if pattern.duration == 0 {
                continue;
            }

            pattern.is_on = true;
            pattern.off_position = (pattern.position + step.duration) % pattern.duration;
        }
        Ok(())
    }

    /// Ask the view for a full redraw
    pub fn refresh(&mut self) {
        self.events.send(UiEvent::Redraw);
    }
}
