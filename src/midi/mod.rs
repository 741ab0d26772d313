// MIDI module
// Message parsing, the controller binding table and learn-mode remote,
// and the midir-backed port layer.

pub mod binding;
pub mod device;
pub mod event;
pub mod input;
pub mod remote;

pub use binding::{BindingKey, BindingTable, PortId};
pub use device::{MidiDeviceInfo, MidiDeviceManager};
pub use event::MidiMessage;
pub use input::MidiInput;
pub use remote::MidiRemote;
