// Sequencer module
// Euclidean pattern generation, the pattern registry and the transport
// scanner that advances playback state.

pub mod arrangement;
pub mod euclid;
pub mod pattern;
pub mod registry;
pub mod scanner;
pub mod timing;

pub use arrangement::{Arrangement, ScheduledStep, StepArrangement};
pub use euclid::{bjorklund, rotate};
pub use pattern::{Pattern, PatternConfig, PatternProperty, StepEvent};
pub use registry::{PatternRegistry, MAX_STEPS};
pub use scanner::TransportScanner;
pub use timing::TimingConfig;
