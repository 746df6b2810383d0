//! Invariant audit over finite fixtures.
//!
//! The partition guarantees hold by construction; the audit re-derives
//! them extensionally on a mask-backed space and reports what it finds.
//! An accepted report witnesses, for the chosen depth:
//!
//! - the slot bound (2^n addresses);
//! - pairwise disjointness and covering of the nonempty extents;
//! - refinement (every cell lies inside its parent);
//! - cell resolution (every point resolves to a member cell that
//!   contains it, agreeing with a scan);
//! - idempotence (an independent re-derivation fingerprints the same);
//! - closure (once every listed cut is consumed, the cells span
//!   exactly the generated algebra — assumes the cut-0 sentinel
//!   convention).

use crate::finite::{MaskCuts, extent, generated_algebra, level_extents, level_span};
use crate::fingerprint::Fingerprint;
use crate::partition::PartitionTower;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which audited invariant a failure is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditClass {
    SlotBound,
    Disjointness,
    Covering,
    Refinement,
    CellResolution,
    Idempotence,
    Closure,
}

impl AuditClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SlotBound => "slot_bound",
            Self::Disjointness => "disjointness",
            Self::Covering => "covering",
            Self::Refinement => "refinement",
            Self::CellResolution => "cell_resolution",
            Self::Idempotence => "idempotence",
            Self::Closure => "closure",
        }
    }
}

impl fmt::Display for AuditClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete violation found by the audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFailure {
    pub class: AuditClass,
    pub message: String,
}

/// Overall audit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Accepted,
    Rejected,
}

/// Outcome of auditing one level of one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Audited refinement depth.
    pub depth: u32,

    /// Accepted iff no failures.
    pub result: AuditOutcome,

    /// Fingerprint of the audited level.
    pub level_fingerprint: Fingerprint,

    /// Violations, empty when accepted.
    pub failures: Vec<AuditFailure>,
}

impl AuditReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self.result, AuditOutcome::Accepted)
    }
}

/// Audit level `depth` of the partition tower over `cuts`.
pub fn run_audit(cuts: &MaskCuts, depth: u32) -> AuditReport {
    let mut failures = Vec::new();

    let mut tower = PartitionTower::new(cuts);
    let level = tower.level(depth).clone();
    let extents = level_extents(cuts, &level);
    let universe = cuts.space().universe();

    if let Some(expected) = 1usize.checked_shl(depth) {
        if level.len() != expected {
            failures.push(AuditFailure {
                class: AuditClass::SlotBound,
                message: format!(
                    "level {depth} holds {} slots, expected {expected}",
                    level.len()
                ),
            });
        }
    }

    for i in 0..extents.len() {
        for j in (i + 1)..extents.len() {
            let shared = extents[i] & extents[j];
            if shared != 0 {
                failures.push(AuditFailure {
                    class: AuditClass::Disjointness,
                    message: format!(
                        "cells {:#b} and {:#b} share points {shared:#b}",
                        extents[i], extents[j]
                    ),
                });
            }
        }
    }

    let union = extents.iter().fold(0u64, |acc, mask| acc | mask);
    if union != universe {
        failures.push(AuditFailure {
            class: AuditClass::Covering,
            message: format!("points {:#b} lie in no cell", universe & !union),
        });
    }

    if depth > 0 {
        for cell in level.cells() {
            let mask = extent(cuts, cell);
            if mask == 0 {
                continue;
            }
            // parent() is Some for every cell below the root level
            if let Some(parent) = cell.parent() {
                if extent(cuts, &parent) & mask != mask {
                    failures.push(AuditFailure {
                        class: AuditClass::Refinement,
                        message: format!("cell {cell} escapes its parent {parent}"),
                    });
                }
            }
        }
    }

    for point in cuts.space().points() {
        let address = tower.cell_of(depth, &point);
        if !level.contains(&address) {
            failures.push(AuditFailure {
                class: AuditClass::CellResolution,
                message: format!("point {point} resolves to {address}, not a level slot"),
            });
            continue;
        }
        if extent(cuts, &address) & (1 << point) == 0 {
            failures.push(AuditFailure {
                class: AuditClass::CellResolution,
                message: format!("point {point} lies outside its resolved cell {address}"),
            });
        }
        if level.locate(cuts, &point) != Some(&address) {
            failures.push(AuditFailure {
                class: AuditClass::CellResolution,
                message: format!("scan and resolution disagree for point {point}"),
            });
        }
    }

    let fingerprint = level.fingerprint();
    let rederived = PartitionTower::new(cuts).level(depth).fingerprint();
    if rederived != fingerprint {
        failures.push(AuditFailure {
            class: AuditClass::Idempotence,
            message: format!("re-derivation fingerprints {rederived}, expected {fingerprint}"),
        });
    }

    if depth >= cuts.full_depth() {
        let span = level_span(cuts, &level);
        let algebra = generated_algebra(cuts);
        if span != algebra {
            failures.push(AuditFailure {
                class: AuditClass::Closure,
                message: format!(
                    "cells span {} sets, generated algebra holds {}",
                    span.len(),
                    algebra.len()
                ),
            });
        }
    }

    AuditReport {
        depth,
        result: if failures.is_empty() {
            AuditOutcome::Accepted
        } else {
            AuditOutcome::Rejected
        },
        level_fingerprint: fingerprint,
        failures,
    }
}
