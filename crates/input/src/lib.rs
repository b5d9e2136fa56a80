//! Terminal input module (engine-facing).
//!
//! Turns `crossterm` key events into the per-tick [`KeySnapshot`] the core
//! consumes. The core only ever sees "which keys are down now"; edge
//! detection happens in the core's input latch.
//!
//! Many terminals never report key release. [`KeySampler`] handles that by
//! treating a key as released once no press or repeat event has arrived for a
//! short timeout.
//!
//! [`KeySnapshot`]: crate::types::KeySnapshot

pub mod map;
pub mod sampler;

pub use blockdrop_types as types;

pub use map::{key_for_code, should_quit};
pub use sampler::KeySampler;
