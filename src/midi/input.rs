// MIDI input - pushes parsed messages into the command channel
// The midir callback runs on its own thread; the engine thread drains
// the ring buffer, so no engine state is touched from here.

use crate::messaging::channels::CommandProducer;
use crate::messaging::command::Command;
use crate::midi::device::MidiDeviceManager;
use crate::midi::event::MidiMessage;
use crate::EngineError;
use midir::MidiInputConnection;

pub struct MidiInput {
    _connection: Option<MidiInputConnection<()>>,
    port_name: Option<String>,
}

impl MidiInput {
    /// Connect to the first available input port. Running without any
    /// MIDI device is supported; messages just never arrive.
    pub fn new(mut command_tx: CommandProducer) -> Result<Self, EngineError> {
        let Some((midi_in, port)) = MidiDeviceManager::new().get_default_input_port() else {
            log::info!("no MIDI input port detected, running without MIDI");
            return Ok(Self {
                _connection: None,
                port_name: None,
            });
        };

        let port_name = midi_in
            .port_name(&port)
            .unwrap_or_else(|_| "Unknown".to_string());
        let callback_port = port_name.clone();

        let connection = midi_in
            .connect(
                &port,
                "pulsegrid-input",
                move |_timestamp, bytes, _| {
                    if let Some(message) = MidiMessage::from_bytes(bytes) {
                        let cmd = Command::Midi {
                            port: callback_port.clone(),
                            message,
                        };
                        // try_push never blocks; a full buffer drops the message
                        if ringbuf::traits::Producer::try_push(&mut command_tx, cmd).is_err() {
                            log::warn!("MIDI buffer full, message dropped");
                        }
                    }
                },
                (),
            )
            .map_err(|e| EngineError::MidiInit(e.to_string()))?;

        log::info!("MIDI input connected: {}", port_name);

        Ok(Self {
            _connection: Some(connection),
            port_name: Some(port_name),
        })
    }

    /// Name of the connected port, if any
    pub fn port_name(&self) -> Option<&str> {
        self.port_name.as_deref()
    }
}
