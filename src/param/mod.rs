// Parameters - the controllable surface exposed to MIDI bindings
// A parameter is shared between the engine thread and whatever owns the
// actual value, so the backing store is a lock-free atomic float.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

/// Stable parameter identity, usable as a map key and for the
/// at-most-one-binding-per-parameter invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterId(Uuid);

impl ParameterId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A bindable processor parameter.
///
/// Incoming controller values are normalized to [0, 1]; the parameter
/// maps them onto its own range.
pub trait Parameter: Send + Sync {
    fn id(&self) -> ParameterId;
    fn name(&self) -> &str;
    fn get_value(&self) -> f32;
    fn set_value_normalized(&self, normalized: f32);
}

/// Thread-safe f32 using atomic operations, stored as raw bits
#[derive(Clone)]
pub struct AtomicF32 {
    inner: Arc<AtomicU32>,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            inner: Arc::new(AtomicU32::new(value.to_bits())),
        }
    }

    pub fn set(&self, value: f32) {
        self.inner.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.inner.load(Ordering::Relaxed))
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A ranged float parameter
pub struct FloatParameter {
    id: ParameterId,
    name: String,
    min: f32,
    max: f32,
    value: AtomicF32,
}

impl FloatParameter {
    pub fn new(name: impl Into<String>, min: f32, max: f32, initial: f32) -> Self {
        assert!(min < max, "Parameter range must be non-empty");

        Self {
            id: ParameterId::generate(),
            name: name.into(),
            min,
            max,
            value: AtomicF32::new(initial.clamp(min, max)),
        }
    }

    pub fn get_value_normalized(&self) -> f32 {
        (self.value.get() - self.min) / (self.max - self.min)
    }
}

impl Parameter for FloatParameter {
    fn id(&self) -> ParameterId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_value(&self) -> f32 {
        self.value.get()
    }

    fn set_value_normalized(&self, normalized: f32) {
        let normalized = normalized.clamp(0.0, 1.0);
        self.value.set(self.min + normalized * (self.max - self.min));
    }
}
