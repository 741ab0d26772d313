// Controller binding table
// Maps (port, channel, controller) to a parameter. Two invariants hold
// after every mutation: a key maps to at most one parameter, and a
// parameter appears as a value at most once across the whole table.

use crate::param::{Parameter, ParameterId};
use crate::EngineError;
use std::collections::HashMap;
use std::sync::Arc;

/// MIDI input port identity, as reported by the port layer
pub type PortId = String;

/// Composite binding address: one controller on one channel of one port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub port: PortId,
    pub channel: u8,
    pub controller: u8,
}

impl BindingKey {
    /// Build a key, rejecting addresses outside the MIDI ranges.
    pub fn new(
        port: impl Into<PortId>,
        channel: u8,
        controller: u8,
    ) -> Result<Self, EngineError> {
        if channel > 15 || controller > 127 {
            return Err(EngineError::InvalidCc { channel, controller });
        }

        Ok(Self {
            port: port.into(),
            channel,
            controller,
        })
    }
}

/// The controller-to-parameter assignment table.
///
/// Binding displaces both ways: assigning a key that is already taken
/// removes the old assignment, and assigning a parameter that is already
/// bound elsewhere removes its old key.
#[derive(Default)]
pub struct BindingTable {
    bindings: HashMap<BindingKey, Arc<dyn Parameter>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: BindingKey, param: Arc<dyn Parameter>) {
        let id = param.id();
        self.bindings.retain(|_, bound| bound.id() != id);
        self.bindings.insert(key, param);
    }

    pub fn lookup(&self, key: &BindingKey) -> Option<&Arc<dyn Parameter>> {
        self.bindings.get(key)
    }

    /// Drop the binding holding this parameter, if any
    pub fn unbind_parameter(&mut self, id: ParameterId) {
        self.bindings.retain(|_, bound| bound.id() != id);
    }

    /// Drop every binding addressed through a port
    pub fn remove_port(&mut self, port: &str) {
        self.bindings.retain(|key, _| key.port != port);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BindingKey, &Arc<dyn Parameter>)> {
        self.bindings.iter()
    }
}
