//! Configuration error definitions.
//!
//! The only fatal condition in the engine is a [`ConfigError`] raised while
//! validating a program or a policy pair, before any simulation starts.
//! Once a driver exists, every phase is a total function: stalls are
//! expressed through block reasons, never through errors.

use thiserror::Error;

use crate::config::{CommitPolicy, IssuePolicy};

/// Invalid program or policy configuration, detected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two instructions share the same id.
    #[error("duplicate instruction id `{id}`")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A dependency names an id that does not exist in the program.
    #[error("instruction `{id}` depends on unknown id `{dep}`")]
    UnknownDependency {
        /// The referencing instruction.
        id: String,
        /// The unknown dependency id.
        dep: String,
    },

    /// A dependency does not strictly precede the referencing instruction
    /// in program order (forward, self, or cyclic reference).
    #[error("instruction `{id}` depends on `{dep}`, which does not precede it in program order")]
    ForwardDependency {
        /// The referencing instruction.
        id: String,
        /// The offending dependency id.
        dep: String,
    },

    /// Latency below the one-cycle minimum.
    #[error("instruction `{id}` has latency {latency}; the minimum is 1")]
    InvalidLatency {
        /// The offending instruction.
        id: String,
        /// The rejected latency value.
        latency: u32,
    },

    /// An instruction type string that names no functional unit type.
    #[error("instruction `{id}` has unknown type `{ty}`")]
    UnknownType {
        /// The offending instruction.
        id: String,
        /// The rejected type string.
        ty: String,
    },

    /// A policy pair outside the three supported combinations.
    #[error("issue policy {issue:?} with commit policy {commit:?} is not a supported combination")]
    UnsupportedPolicy {
        /// The requested issue policy.
        issue: IssuePolicy,
        /// The requested commit policy.
        commit: CommitPolicy,
    },
}
