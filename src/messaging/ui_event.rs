// Typed UI notifications - one-way, fire-and-forget
// The engine never reads anything back from the view layer.

use crate::messaging::channels::UiEventProducer;
use crate::midi::binding::PortId;
use crate::sequencer::pattern::PatternProperty;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The pattern canvas should repaint
    Redraw,

    /// A different pattern (or none) is selected
    SelectionChanged { index: Option<usize> },

    /// A pattern property changed value, including clamp-forced changes
    SettingsChanged { property: PatternProperty, value: u32 },

    /// A controller binding was created; the binding list view should
    /// refresh
    BindingListChanged {
        port: PortId,
        channel: u8,
        controller: u8,
    },
}

/// Shared handle for pushing UI events into the notification ring
/// buffer. Emission never blocks; when the buffer is full the event is
/// dropped with a debug log, since notifications carry no state the
/// view cannot re-derive.
#[derive(Clone)]
pub struct UiEventSender {
    tx: Arc<Mutex<UiEventProducer>>,
}

impl UiEventSender {
    pub fn new(tx: UiEventProducer) -> Self {
        Self {
            tx: Arc::new(Mutex::new(tx)),
        }
    }

    pub fn send(&self, event: UiEvent) {
        if let Ok(mut tx) = self.tx.try_lock() {
            if ringbuf::traits::Producer::try_push(&mut *tx, event).is_err() {
                log::debug!("UI event buffer full, event dropped");
            }
        }
    }
}
