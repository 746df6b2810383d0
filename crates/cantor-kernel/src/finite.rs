//! Mask-backed finite sample spaces.
//!
//! The abstract constructions never need a materialized space, but
//! exercising their guarantees does. A [`FiniteSpace`] holds at most
//! 64 points (indices 0..size) so that every subset is one `u64`
//! mask; a [`MaskCuts`] is a cut family given by a finite list of
//! masks, with every index beyond the list an empty cut.
//!
//! On such a space cells gain an **extent** (the mask of points they
//! actually contain), levels gain an extensional empty-pruned view,
//! and the generated structure of the cut family becomes computable:
//! [`generated_algebra`] closes the masks under complement and union,
//! and once a level has consumed every listed cut its cells span
//! exactly that algebra.

use crate::cuts::CutFamily;
use crate::error::CantorError;
use crate::partition::{CellAddress, PartitionLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Most points a mask-backed space can hold.
pub const MAX_POINTS: u32 = 64;

/// A space of `size` points, indices 0..size, subsets as `u64` masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiniteSpace {
    size: u32,
}

impl FiniteSpace {
    /// A space of `size` points. Fails above [`MAX_POINTS`].
    pub fn new(size: u32) -> Result<Self, CantorError> {
        if size > MAX_POINTS {
            return Err(CantorError::SpaceTooWide { size });
        }
        Ok(Self { size })
    }

    /// Number of points.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The mask of the whole space.
    pub fn universe(&self) -> u64 {
        if self.size == MAX_POINTS {
            u64::MAX
        } else {
            (1u64 << self.size) - 1
        }
    }

    /// Iterate the point indices.
    pub fn points(self) -> impl Iterator<Item = u32> {
        0..self.size
    }

    /// Whether `point` is a point of the space.
    pub fn contains(&self, point: u32) -> bool {
        point < self.size
    }
}

/// A cut family over a finite space, one mask per listed cut.
///
/// Indices beyond the list are empty cuts. The sentinel convention
/// (cut 0 empty) is followed by [`MaskCuts::from_generators`] and
/// [`MaskCuts::singletons`]; [`MaskCuts::new`] leaves the list to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskCuts {
    space: FiniteSpace,
    masks: Vec<u64>,
}

impl MaskCuts {
    /// A cut family from an explicit mask list.
    ///
    /// Every mask must lie inside the space.
    pub fn new(space: FiniteSpace, masks: Vec<u64>) -> Result<Self, CantorError> {
        let universe = space.universe();
        for (index, mask) in masks.iter().enumerate() {
            if mask & !universe != 0 {
                return Err(CantorError::MaskOutOfSpace {
                    index,
                    mask: *mask,
                    size: space.size(),
                });
            }
        }
        Ok(Self { space, masks })
    }

    /// A cut family from generating masks, with the empty sentinel
    /// inserted at index 0.
    pub fn from_generators(space: FiniteSpace, generators: Vec<u64>) -> Result<Self, CantorError> {
        let mut masks = Vec::with_capacity(generators.len() + 1);
        masks.push(0);
        masks.extend(generators);
        Self::new(space, masks)
    }

    /// The canonical separating family: cut k is the singleton {k-1}.
    pub fn singletons(space: FiniteSpace) -> Self {
        let masks = std::iter::once(0)
            .chain(space.points().map(|p| 1u64 << p))
            .collect();
        Self { space, masks }
    }

    /// The underlying space.
    pub fn space(&self) -> FiniteSpace {
        self.space
    }

    /// Number of listed cuts, sentinel included.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Whether no cuts are listed.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// The mask of cut `index`, if listed.
    pub fn mask(&self, index: u32) -> Option<u64> {
        self.masks.get(index as usize).copied()
    }

    /// Depth at which every listed cut has been consumed.
    pub fn full_depth(&self) -> u32 {
        (self.masks.len() as u32).saturating_sub(1)
    }
}

impl CutFamily for MaskCuts {
    type Point = u32;

    fn contains(&self, index: u32, point: &u32) -> bool {
        if !self.space.contains(*point) {
            return false;
        }
        match self.mask(index) {
            Some(mask) => (mask >> *point) & 1 == 1,
            None => false,
        }
    }
}

/// The mask of points a cell actually contains.
pub fn extent(cuts: &MaskCuts, address: &CellAddress) -> u64 {
    let mut mask = cuts.space().universe();
    for (i, inside) in address.flags().iter().enumerate() {
        let cut = cuts.mask(i as u32 + 1).unwrap_or(0);
        mask &= if *inside { cut } else { !cut };
    }
    mask
}

/// The extensional view of a level: the extents of its nonempty cells,
/// sorted.
///
/// Two distinct addresses at one level disagree on some cut, so their
/// extents intersect in nothing; nonempty extents are therefore
/// pairwise distinct and no deduplication is needed.
pub fn level_extents(cuts: &MaskCuts, level: &PartitionLevel) -> Vec<u64> {
    let mut extents: Vec<u64> = level
        .cells()
        .iter()
        .map(|cell| extent(cuts, cell))
        .filter(|mask| *mask != 0)
        .collect();
    extents.sort_unstable();
    extents
}

/// Every union of cells of the level, the empty union included.
///
/// Exponential in the number of nonempty cells; intended for small
/// fixture spaces.
pub fn level_span(cuts: &MaskCuts, level: &PartitionLevel) -> BTreeSet<u64> {
    let mut span = BTreeSet::new();
    span.insert(0);
    for atom in level_extents(cuts, level) {
        let existing: Vec<u64> = span.iter().copied().collect();
        for mask in existing {
            span.insert(mask | atom);
        }
    }
    span
}

/// The algebra of subsets generated by the listed cuts: closure under
/// complement and union (hence, on a finite space, intersection).
///
/// Fixpoint iteration; intended for small fixture spaces.
pub fn generated_algebra(cuts: &MaskCuts) -> BTreeSet<u64> {
    let universe = cuts.space().universe();
    let mut algebra: BTreeSet<u64> = BTreeSet::new();
    algebra.insert(0);
    algebra.insert(universe);
    algebra.extend(cuts.masks.iter().copied());

    let mut changed = true;
    while changed {
        changed = false;
        let current: Vec<u64> = algebra.iter().copied().collect();
        for &a in &current {
            if algebra.insert(universe & !a) {
                changed = true;
            }
            for &b in &current {
                if algebra.insert(a | b) {
                    changed = true;
                }
            }
        }
    }

    algebra
}
