// MIDI device discovery

use midir::{MidiInput as MidirInput, MidiInputPort};

#[derive(Clone, Debug)]
pub struct MidiDeviceInfo {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

pub struct MidiDeviceManager;

impl MidiDeviceManager {
    pub fn new() -> Self {
        Self
    }

    /// List all available MIDI input ports
    pub fn list_input_ports(&self) -> Vec<MidiDeviceInfo> {
        let mut devices = Vec::new();

        if let Ok(midi_in) = MidirInput::new("Pulsegrid MIDI Scanner") {
            let ports = midi_in.ports();

            for (index, port) in ports.iter().enumerate() {
                if let Ok(name) = midi_in.port_name(port) {
                    devices.push(MidiDeviceInfo {
                        id: format!("midi_in_{}", index),
                        name: name.clone(),
                        is_default: index == 0,
                    });
                }
            }
        }

        devices
    }

    /// Get the first available input port
    pub fn get_default_input_port(&self) -> Option<(MidirInput, MidiInputPort)> {
        let midi_in = MidirInput::new("Pulsegrid MIDI Input").ok()?;
        let ports = midi_in.ports();

        if ports.is_empty() {
            return None;
        }

        let port = ports.into_iter().next()?;
        Some((midi_in, port))
    }

}

impl Default for MidiDeviceManager {
    fn default() -> Self {
        Self::new()
    }
}
