//! Separation evidence over finite samples.
//!
//! A cut family separates points when every pair of distinct points
//! is distinguished by some cut:
//!
//! ```text
//! separates(t) := ∀ x ≠ y, ∃ n, (x ∈ t(n)) ≠ (y ∈ t(n))
//! ```
//!
//! Separation over an infinite domain is not decidable, so the kernel
//! never validates it at runtime. What it offers is **evidence**: an
//! exhaustive pairwise check over a finite sample of points and a
//! finite range of cuts, reporting every colliding pair. Consumers
//! requiring an injective encoding must establish or assume the
//! abstract property themselves; on a countable space whose cut list
//! contains every singleton, the evidence is complete at sufficient
//! depth.

use crate::cuts::CutFamily;
use crate::encode::encode;
use serde::{Deserialize, Serialize};

/// A pair of sample points no consulted cut distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collision {
    /// Index of the first point in the sample.
    pub left: usize,

    /// Index of the second point in the sample.
    pub right: usize,
}

/// Outcome of an exhaustive pairwise separation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparationReport {
    /// Highest cut index consulted.
    pub depth: u32,

    /// Number of unordered sample pairs examined.
    pub pairs_checked: usize,

    /// Pairs whose codes agree on every consulted cut.
    pub collisions: Vec<Collision>,
}

impl SeparationReport {
    /// Whether every pair was distinguished by some consulted cut.
    pub fn is_separating(&self) -> bool {
        self.collisions.is_empty()
    }
}

/// Check every unordered pair of `sample` against cuts 0..=depth.
pub fn separation_report<C: CutFamily>(
    cuts: &C,
    sample: &[C::Point],
    depth: u32,
) -> SeparationReport {
    let mut collisions = Vec::new();
    let mut pairs_checked = 0;

    for left in 0..sample.len() {
        for right in (left + 1)..sample.len() {
            pairs_checked += 1;
            let a = encode(cuts, &sample[left]);
            let b = encode(cuts, &sample[right]);
            if a.agrees_to(&b, depth + 1) {
                collisions.push(Collision { left, right });
            }
        }
    }

    SeparationReport {
        depth,
        pairs_checked,
        collisions,
    }
}

/// Shortcut: whether the cuts separate the sample up to `depth`.
pub fn separates<C: CutFamily>(cuts: &C, sample: &[C::Point], depth: u32) -> bool {
    separation_report(cuts, sample, depth).is_separating()
}
