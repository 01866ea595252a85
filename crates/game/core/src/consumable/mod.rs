//! Consumable effect engine.
//!
//! A use is validated completely before anything is mutated: a rejected use
//! leaves the state untouched and keeps its charge.

mod engine;
mod error;
mod kinds;

pub use engine::use_consumable;
pub use error::ConsumableError;
pub use kinds::{ConsumableKind, EffectDescriptor, EffectOutcome, Target};
