//! Top-level error type for game operations.

use crate::{ConfigError, StoreError};
use derive_more::{Display, Error, From};

/// Error returned by [`GameManager`](crate::GameManager) operations.
///
/// The rules themselves are total; failures come from the collaborators
/// around them or from malformed input signals.
#[derive(Debug, Clone, Display, Error, From)]
pub enum GameError {
    /// The persistent store failed.
    #[display("{}", _0)]
    Store(StoreError),

    /// Configuration could not be loaded or is invalid.
    #[display("{}", _0)]
    Config(ConfigError),

    /// A move signal outside `0..=3`.
    #[display("Invalid direction signal: {} (expected 0-3)", _0)]
    #[from(ignore)]
    InvalidDirection(#[error(not(source))] u8),
}
