//! Scheduling policy configuration and fixed machine parameters.
//!
//! This module defines:
//! 1. **Policies:** The issue/commit policy enums and the validated
//!    [`Policy`] pair, restricted to the three supported combinations.
//! 2. **Widths:** The fixed decode, issue, and write-back bus widths.
//!
//! The widths and the one-unit-per-type pool are permanent simplifications
//! of the machine model, not user-adjustable parameters.

use serde::Deserialize;

use crate::error::ConfigError;

/// Number of instructions the decode buffer accepts per cycle.
pub const DECODE_WIDTH: usize = 2;

/// Maximum instructions that may begin execution in one cycle.
pub const ISSUE_WIDTH: usize = 2;

/// Write-back bus width: maximum instructions committed per cycle.
pub const COMMIT_WIDTH: usize = 2;

/// Ordering discipline for the issue phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum IssuePolicy {
    /// Issue strictly in program order; a blocked instruction blocks
    /// everything behind it.
    #[default]
    InOrder,
    /// Scan the whole decoded window; blocked instructions are skipped.
    OutOfOrder,
}

/// Ordering discipline for the commit phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CommitPolicy {
    /// Commit strictly in program order.
    #[default]
    InOrder,
    /// Commit any finished instruction, program order as tie-break.
    OutOfOrder,
}

/// A validated issue/commit policy pair.
///
/// Only three combinations are meaningful for the machine model:
/// in-order issue with in-order commit, in-order issue with out-of-order
/// commit, and out-of-order issue with out-of-order commit. Out-of-order
/// issue with in-order commit is rejected at construction, so every
/// `Policy` value in circulation is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPolicy")]
pub struct Policy {
    issue: IssuePolicy,
    commit: CommitPolicy,
}

/// Unvalidated wire shape for [`Policy`] deserialization.
#[derive(Debug, Deserialize)]
struct RawPolicy {
    issue: IssuePolicy,
    commit: CommitPolicy,
}

impl TryFrom<RawPolicy> for Policy {
    type Error = ConfigError;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        Self::new(raw.issue, raw.commit)
    }
}

impl Policy {
    /// In-order issue, in-order commit.
    pub const IN_IN: Self = Self {
        issue: IssuePolicy::InOrder,
        commit: CommitPolicy::InOrder,
    };

    /// In-order issue, out-of-order commit.
    pub const IN_OUT: Self = Self {
        issue: IssuePolicy::InOrder,
        commit: CommitPolicy::OutOfOrder,
    };

    /// Out-of-order issue, out-of-order commit.
    pub const OUT_OUT: Self = Self {
        issue: IssuePolicy::OutOfOrder,
        commit: CommitPolicy::OutOfOrder,
    };

    /// The three supported policy pairs.
    pub const ALL: [Self; 3] = [Self::IN_IN, Self::IN_OUT, Self::OUT_OUT];

    /// Builds a policy pair, rejecting the unsupported
    /// out-of-order-issue/in-order-commit combination.
    pub fn new(issue: IssuePolicy, commit: CommitPolicy) -> Result<Self, ConfigError> {
        match (issue, commit) {
            (IssuePolicy::OutOfOrder, CommitPolicy::InOrder) => {
                Err(ConfigError::UnsupportedPolicy { issue, commit })
            }
            _ => Ok(Self { issue, commit }),
        }
    }

    /// The issue-side policy.
    #[inline]
    pub fn issue(&self) -> IssuePolicy {
        self.issue
    }

    /// The commit-side policy.
    #[inline]
    pub fn commit(&self) -> CommitPolicy {
        self.commit
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::IN_IN
    }
}
