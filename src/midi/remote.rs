// MIDI remote - routes controller messages to bound parameters
// Two modes: normal messages drive bound parameters through the table,
// learn mode captures the next control change as a new binding for the
// pending parameter.

use crate::messaging::ui_event::{UiEvent, UiEventSender};
use crate::midi::binding::{BindingKey, BindingTable, PortId};
use crate::midi::event::MidiMessage;
use crate::param::{Parameter, ParameterId};
use crate::EngineError;
use std::sync::Arc;

pub struct MidiRemote {
    bindings: BindingTable,
    /// Registered input ports; messages from unknown ports are ignored
    inputs: Vec<PortId>,
    learn_mode: bool,
    /// The parameter the next control change will bind, learn mode only
    pending: Option<Arc<dyn Parameter>>,
    events: UiEventSender,
}

impl MidiRemote {
    pub fn new(events: UiEventSender) -> Self {
        Self {
            bindings: BindingTable::new(),
            inputs: Vec::new(),
            learn_mode: false,
            pending: None,
            events,
        }
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn is_learn_mode(&self) -> bool {
        self.learn_mode
    }

    pub fn pending_parameter(&self) -> Option<ParameterId> {
        self.pending.as_ref().map(|p| p.id())
    }

    /// Register an input port. Re-adding a known port is a no-op.
    pub fn add_midi_input(&mut self, port: impl Into<PortId>) {
        let port = port.into();
        if !self.inputs.contains(&port) {
            self.inputs.push(port);
        }
    }

    /// Deregister a port and drop its bindings.
    pub fn remove_midi_input(&mut self, port: &str) {
        self.inputs.retain(|p| p != port);
        self.bindings.remove_port(port);
    }

    /// Toggle learn mode. Any in-flight pending parameter is discarded
    /// on both edges.
    pub fn set_learn_mode(&mut self, enabled: bool) {
        self.learn_mode = enabled;
        self.pending = None;
    }

    /// Mark a parameter as the pending bind target. Only meaningful in
    /// learn mode; selecting an already-bound parameter is allowed and
    /// re-binds it on the next control change.
    pub fn select_parameter(&mut self, param: Arc<dyn Parameter>) {
        if self.learn_mode {
            self.pending = Some(param);
        }
    }

    /// Handle one message from an input port. Non-control-change
    /// messages and messages from unregistered ports are ignored.
    pub fn handle_message(&mut self, port: &str, message: &MidiMessage) -> Result<(), EngineError> {
        if !self.inputs.iter().any(|p| p == port) {
            log::debug!("message from unregistered MIDI port {port:?} ignored");
            return Ok(());
        }

        let MidiMessage::ControlChange { channel, controller, value } = *message else {
            return Ok(());
        };
        let key = BindingKey::new(port, channel, controller)?;

        if self.learn_mode {
            let Some(param) = self.pending.take() else {
                return Ok(());
            };
            self.bindings.bind(key, param);
            self.events.send(UiEvent::BindingListChanged {
                port: port.to_string(),
                channel,
                controller,
            });
        } else if let Some(param) = self.bindings.lookup(&key) {
            param.set_value_normalized(value as f32 / 127.0);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::channels::{create_ui_event_channel, UiEventConsumer};
    use crate::param::FloatParameter;
    use ringbuf::traits::Consumer;

    fn setup() -> (MidiRemote, UiEventConsumer) {
        let (tx, rx) = create_ui_event_channel(64);
        let mut remote = MidiRemote::new(UiEventSender::new(tx));
        remote.add_midi_input("A");
        (remote, rx)
    }

    fn param(name: &str) -> Arc<FloatParameter> {
        Arc::new(FloatParameter::new(name, 0.0, 1.0, 0.0))
    }

    fn cc(channel: u8, controller: u8, value: u8) -> MidiMessage {
        MidiMessage::ControlChange { channel, controller, value }
    }

    /// Put the remote in learn mode and bind one parameter via a CC
    fn learn(remote: &mut MidiRemote, port: &str, param: Arc<FloatParameter>, message: MidiMessage) {
        remote.set_learn_mode(true);
        remote.select_parameter(param);
        remote.handle_message(port, &message).unwrap();
        remote.set_learn_mode(false);
    }

    #[test]
    fn test_learn_binds_pending_parameter() {
        let (mut remote, mut rx) = setup();
        let p1 = param("p1");

        remote.set_learn_mode(true);
        remote.select_parameter(p1.clone());
        remote.handle_message("A", &cc(1, 20, 64)).unwrap();

        // Binding created, pending consumed
        assert_eq!(remote.bindings().len(), 1);
        assert_eq!(remote.pending_parameter(), None);

        let key = BindingKey::new("A", 1, 20).unwrap();
        assert_eq!(remote.bindings().lookup(&key).unwrap().id(), p1.id());

        let mut events = Vec::new();
        while let Some(e) = rx.try_pop() {
            events.push(e);
        }
        assert!(events.contains(&UiEvent::BindingListChanged {
            port: "A".to_string(),
            channel: 1,
            controller: 20,
        }));
    }

    #[test]
    fn test_learn_message_applies_no_value() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");

        learn(&mut remote, "A", p1.clone(), cc(0, 20, 127));

        // The capturing message only binds; it does not move the value
        assert_eq!(p1.get_value(), 0.0);
    }

    #[test]
    fn test_learn_without_pending_is_ignored() {
        let (mut remote, _rx) = setup();

        remote.set_learn_mode(true);
        remote.handle_message("A", &cc(1, 20, 64)).unwrap();

        assert!(remote.bindings().is_empty());
    }

    #[test]
    fn test_toggling_learn_mode_discards_pending() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");

        remote.set_learn_mode(true);
        remote.select_parameter(p1);
        assert!(remote.pending_parameter().is_some());

        remote.set_learn_mode(false);
        assert_eq!(remote.pending_parameter(), None);

        // Entering learn mode again starts clean too
        remote.set_learn_mode(true);
        assert_eq!(remote.pending_parameter(), None);
    }

    #[test]
    fn test_select_parameter_outside_learn_mode_is_ignored() {
        let (mut remote, _rx) = setup();

        remote.select_parameter(param("p1"));
        assert_eq!(remote.pending_parameter(), None);
    }

    #[test]
    fn test_normal_mode_applies_normalized_value() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");
        learn(&mut remote, "A", p1.clone(), cc(1, 20, 0));

        remote.handle_message("A", &cc(1, 20, 127)).unwrap();
        assert_eq!(p1.get_value(), 1.0);

        remote.handle_message("A", &cc(1, 20, 0)).unwrap();
        assert_eq!(p1.get_value(), 0.0);
    }

    #[test]
    fn test_unbound_cc_is_ignored() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");
        learn(&mut remote, "A", p1.clone(), cc(1, 20, 0));

        // Different controller, channel and port all miss
        remote.handle_message("A", &cc(1, 21, 127)).unwrap();
        remote.handle_message("A", &cc(2, 20, 127)).unwrap();
        assert_eq!(p1.get_value(), 0.0);
    }

    #[test]
    fn test_non_cc_messages_do_not_consume_pending() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");

        remote.set_learn_mode(true);
        remote.select_parameter(p1);
        remote
            .handle_message("A", &MidiMessage::NoteOn { channel: 0, note: 60, velocity: 100 })
            .unwrap();

        assert!(remote.bindings().is_empty());
        assert!(remote.pending_parameter().is_some());
    }

    #[test]
    fn test_rebinding_key_leaves_only_new_parameter() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");
        let p2 = param("p2");

        learn(&mut remote, "A", p1.clone(), cc(1, 20, 0));
        learn(&mut remote, "A", p2.clone(), cc(1, 20, 0));

        assert_eq!(remote.bindings().len(), 1);
        let key = BindingKey::new("A", 1, 20).unwrap();
        assert_eq!(remote.bindings().lookup(&key).unwrap().id(), p2.id());

        // Only the new parameter moves
        remote.handle_message("A", &cc(1, 20, 127)).unwrap();
        assert_eq!(p1.get_value(), 0.0);
        assert_eq!(p2.get_value(), 1.0);
    }

    #[test]
    fn test_add_midi_input_is_idempotent() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");

        remote.add_midi_input("A");
        remote.add_midi_input("A");

        learn(&mut remote, "A", p1.clone(), cc(0, 7, 0));
        remote.handle_message("A", &cc(0, 7, 127)).unwrap();
        assert_eq!(p1.get_value(), 1.0);
    }

    #[test]
    fn test_remove_midi_input_discards_bindings() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");
        learn(&mut remote, "A", p1.clone(), cc(0, 7, 0));

        remote.remove_midi_input("A");

        assert!(remote.bindings().is_empty());
        remote.handle_message("A", &cc(0, 7, 127)).unwrap();
        assert_eq!(p1.get_value(), 0.0);
    }

    #[test]
    fn test_unregistered_port_is_ignored() {
        let (mut remote, _rx) = setup();
        let p1 = param("p1");

        remote.set_learn_mode(true);
        remote.select_parameter(p1);
        remote.handle_message("B", &cc(0, 7, 64)).unwrap();

        assert!(remote.bindings().is_empty());
        assert!(remote.pending_parameter().is_some());
    }

    #[test]
    fn test_malformed_address_is_an_error() {
        let (mut remote, _rx) = setup();

        let err = remote
            .handle_message("A", &cc(0, 200, 64))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidCc { controller: 200, .. }));
    }
}
