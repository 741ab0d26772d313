// Communication channels lock-free
// MIDI and UI threads push commands in; the engine pushes UI events out.

use crate::messaging::command::Command;
use crate::messaging::ui_event::UiEvent;
use ringbuf::{HeapRb, traits::Split};

pub type CommandProducer = ringbuf::HeapProd<Command>;
pub type CommandConsumer = ringbuf::HeapCons<Command>;

pub fn create_command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    let rb = HeapRb::<Command>::new(capacity);
    rb.split()
}

pub type UiEventProducer = ringbuf::HeapProd<UiEvent>;
pub type UiEventConsumer = ringbuf::HeapCons<UiEvent>;

pub fn create_ui_event_channel(capacity: usize) -> (UiEventProducer, UiEventConsumer) {
    let rb = HeapRb::<UiEvent>::new(capacity);
    rb.split()
}
