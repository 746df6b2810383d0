//! Binary refinement partitions.
//!
//! Level 0 is the trivial partition {α}. Level n+1 splits every cell C
//! of level n into C ∩ t(n+1) and C \ t(n+1). A cell is identified by
//! its **refinement address**: the flags recorded while splitting, flag
//! k-1 answering "inside cut k". The address representation makes the
//! partition guarantees structural:
//!
//! - at most 2^n cells at level n (one per address);
//! - two distinct cells at one level differ in some flag, so one lies
//!   inside a cut the other avoids — they are disjoint;
//! - every point answers every flag, so the cells cover the space;
//! - a level-(n+1) cell refines exactly the level-n cell named by its
//!   address prefix.
//!
//! Empty cells are retained as valid, point-less slots. Callers that
//! want the extensional view of a finite space prune them through
//! [`crate::finite::level_extents`].

use crate::cuts::CutFamily;
use crate::error::CantorError;
use crate::fingerprint::Fingerprint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The refinement address of one partition cell.
///
/// An address of depth n names the cell
/// `⋂ { t(k) : flag k set } ∩ ⋂ { α \ t(k) : flag k clear }` for
/// k in 1..=n. The root address (depth 0) names the whole space.
///
/// Addresses order lexicographically, outside before inside, and
/// display as bit strings ("ε" at the root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    flags: Vec<bool>,
}

impl CellAddress {
    /// The root address: the whole space, depth 0.
    pub fn root() -> Self {
        Self { flags: Vec::new() }
    }

    /// Build an address from recorded membership flags.
    ///
    /// Flag k-1 answers "inside cut k".
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    /// Refinement depth: how many cuts this address has consumed.
    pub fn depth(&self) -> u32 {
        self.flags.len() as u32
    }

    /// The recorded membership flags.
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Which side of cut `k` this cell lies on, for k in 1..=depth.
    pub fn side_of_cut(&self, k: u32) -> Option<bool> {
        if k == 0 {
            return None;
        }
        self.flags.get(k as usize - 1).copied()
    }

    /// The child cell produced by the next split.
    pub fn child(&self, inside: bool) -> Self {
        let mut flags = self.flags.clone();
        flags.push(inside);
        Self { flags }
    }

    /// The cell this one was split from, if not the root.
    pub fn parent(&self) -> Option<Self> {
        if self.flags.is_empty() {
            return None;
        }
        Some(Self {
            flags: self.flags[..self.flags.len() - 1].to_vec(),
        })
    }

    /// Whether this cell is a subset of `coarser` by construction,
    /// i.e. `coarser`'s address is a prefix of this one.
    pub fn refines(&self, coarser: &CellAddress) -> bool {
        self.flags.len() >= coarser.flags.len()
            && self.flags[..coarser.flags.len()] == coarser.flags[..]
    }

    /// Whether `point` lies in this cell.
    pub fn admits<C: CutFamily>(&self, cuts: &C, point: &C::Point) -> bool {
        self.flags
            .iter()
            .enumerate()
            .all(|(i, inside)| cuts.contains(i as u32 + 1, point) == *inside)
    }

    /// The address as a '0'/'1' string, empty at the root.
    pub fn bit_string(&self) -> String {
        self.flags
            .iter()
            .map(|inside| if *inside { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            write!(f, "ε")
        } else {
            write!(f, "{}", self.bit_string())
        }
    }
}

impl FromStr for CellAddress {
    type Err = CantorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ε" {
            return Ok(Self::root());
        }
        let mut flags = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => flags.push(false),
                '1' => flags.push(true),
                _ => return Err(CantorError::BitString(s.to_string())),
            }
        }
        Ok(Self { flags })
    }
}

impl Serialize for CellAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bit_string())
    }
}

impl<'de> Deserialize<'de> for CellAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// One level of the refinement tower: all 2^n address slots at depth n,
/// in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionLevel {
    depth: u32,
    cells: Vec<CellAddress>,
}

impl PartitionLevel {
    /// The trivial partition {α} at depth 0.
    pub fn trivial() -> Self {
        Self {
            depth: 0,
            cells: vec![CellAddress::root()],
        }
    }

    /// The next level: every cell split into outside and inside halves.
    pub fn refine(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len() * 2);
        for cell in &self.cells {
            cells.push(cell.child(false));
            cells.push(cell.child(true));
        }
        Self {
            depth: self.depth + 1,
            cells,
        }
    }

    /// Refinement depth of this level.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of address slots (2^depth), empty cells included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the level has no slots. Never true for a built level.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The address slots in lexicographic order.
    pub fn cells(&self) -> &[CellAddress] {
        &self.cells
    }

    /// Whether `address` is a slot of this level.
    pub fn contains(&self, address: &CellAddress) -> bool {
        self.cells.binary_search(address).is_ok()
    }

    /// Scan for the cell admitting `point`.
    ///
    /// Always finds one for a built level; [`cell_of`] computes the
    /// same answer without scanning.
    pub fn locate<C: CutFamily>(&self, cuts: &C, point: &C::Point) -> Option<&CellAddress> {
        self.cells.iter().find(|cell| cell.admits(cuts, point))
    }

    /// Deterministic fingerprint of the level.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut builder = Fingerprint::builder().field_u64("depth", u64::from(self.depth));
        for cell in &self.cells {
            builder = builder.field("cell", &cell.bit_string());
        }
        builder.finish()
    }
}

/// Memoized tower of partition levels over one cut family.
///
/// Level n+1 is derived from the cached level n; nothing is recomputed
/// from scratch. The cut family is immutable and levels are pure
/// functions of it, so cached levels never invalidate.
#[derive(Debug)]
pub struct PartitionTower<C> {
    cuts: C,
    levels: Vec<PartitionLevel>,
}

impl<C: CutFamily> PartitionTower<C> {
    /// Start a tower at the trivial level.
    pub fn new(cuts: C) -> Self {
        Self {
            cuts,
            levels: vec![PartitionLevel::trivial()],
        }
    }

    /// The cut family the tower refines by.
    pub fn cuts(&self) -> &C {
        &self.cuts
    }

    /// Deepest level built so far.
    pub fn built_depth(&self) -> u32 {
        self.levels.len() as u32 - 1
    }

    /// The level at `depth`, building intermediate levels as needed.
    pub fn level(&mut self, depth: u32) -> &PartitionLevel {
        while self.levels.len() <= depth as usize {
            let next = self.levels[self.levels.len() - 1].refine();
            self.levels.push(next);
        }
        &self.levels[depth as usize]
    }

    /// The address of the cell of level `depth` containing `point`.
    pub fn cell_of(&self, depth: u32, point: &C::Point) -> CellAddress {
        cell_of(&self.cuts, depth, point)
    }
}

/// The unique cell of level `depth` containing `point`, computed
/// directly from the point's membership flags against cuts 1..=depth.
pub fn cell_of<C: CutFamily>(cuts: &C, depth: u32, point: &C::Point) -> CellAddress {
    let flags = (1..=depth).map(|k| cuts.contains(k, point)).collect();
    CellAddress::from_flags(flags)
}
