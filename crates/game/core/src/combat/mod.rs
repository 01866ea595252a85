//! Combat resolution.
//!
//! Player attacks, enemy attacks, boss abilities and projectile impacts all go
//! through [`resolve`]. Entities differ only in their stat blocks and ability
//! data; there is no per-kind code path. Items that deal a fixed amount use
//! [`inflict`].

pub mod damage;
mod error;
mod resolve;

pub use damage::{calculate_damage, scale_attack};
pub use error::CombatError;
pub use resolve::{CombatOutcome, inflict, resolve};
