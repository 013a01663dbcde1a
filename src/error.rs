//! The error type used throughout this crate.

use thiserror::Error;

/// Fatal, unrecoverable conditions: invariant violations that cannot happen
/// on well-formed `(Model, Data)` input. Callers should treat these the same
/// way the embedding engine treats any other programmer error — propagate
/// and abort the step, never paper over them.
///
/// Recoverable arena exhaustion is *not* represented here: [`crate::build_islands`]
/// handles that internally by rolling back and returning an empty
/// [`crate::IslandOutput`], observable only through a `tracing::warn!` event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IslandError {
    #[error("constraint row {row}: both edge endpoints folded onto the static tree")]
    BothEndpointsStatic { row: usize },

    #[error("edge buffer overflow at row {row}: wrote past the estimated budget of {budget} records")]
    EdgeBufferOverflow { row: usize, budget: usize },

    #[error("constraint row {0} has a Jacobian with no incident tree")]
    RowWithoutTree(usize),

    #[error("flood fill discovered {found} islands but only {assigned} received a DoF")]
    IslandCountMismatch { found: usize, assigned: usize },
}
