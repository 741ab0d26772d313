// Messaging module
// Ring-buffer channels plus the command and UI event types they carry.

pub mod channels;
pub mod command;
pub mod ui_event;

pub use channels::{create_command_channel, create_ui_event_channel};
pub use command::Command;
pub use ui_event::{UiEvent, UiEventSender};
