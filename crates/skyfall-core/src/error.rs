//! Spawn failure taxonomy.
//!
//! Every variant here is non-fatal: a failed spawn attempt is logged and
//! skipped, never propagated out of the tick loop. Scheduling-level retries
//! (the next burst iteration, the next interval) are the scheduler's
//! responsibility; the only internal retry loop is the placement solver's
//! bounded attempt budget.

use thiserror::Error;

/// Reasons a single spawn attempt can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// The placement solver used up its full retry budget without finding a
    /// free position. The caller skips this attempt; nothing is registered.
    #[error("no free position found after {attempts} placement attempts")]
    PlacementExhausted {
        /// Number of candidate positions that were drawn and rejected.
        attempts: u32,
    },

    /// The arena already holds the configured maximum of placed entities.
    /// Checked before the placement solver is consulted.
    #[error("entity capacity reached ({cap} placed)")]
    CapacityReached {
        /// The configured concurrent-entity cap.
        cap: usize,
    },

    /// The simulation was constructed with an empty template list.
    #[error("no spawn templates configured")]
    NoTemplatesConfigured,
}
