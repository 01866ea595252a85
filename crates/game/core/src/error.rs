//! Common error infrastructure for game-core.
//!
//! Domain errors (`RegistryError`, `CombatError`, `ConsumableError`, ...) live
//! next to the operations that raise them. They all implement [`GameError`] so
//! the scheduler and the runtime can classify them uniformly.
//!
//! No error defined by this crate is fatal to the process: every variant is a
//! typed outcome consumed by the immediate caller.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller re-prompts or skips and carries on.
    ///
    /// Examples: destination blocked, consumable out of charge
    Recoverable,

    /// Validation error - the request itself was malformed.
    ///
    /// Examples: target outside the grid, stale entity id
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: occupancy map desync, missing catalog entry
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; the runtime publishes it in events
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}
