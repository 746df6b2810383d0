//! # Cantor Kernel
//!
//! Countable partition refinement and Cantor-space encoding: given a
//! naturally-indexed family of subsets of an abstract space (the
//! "cuts"), build successively finer finite partitions by binary
//! refinement, and encode every point as the infinite boolean sequence
//! of its cut memberships. When the cuts separate points, the encoding
//! is injective — the space embeds into Cantor space.
//!
//! This crate is **space-agnostic**: it does not prescribe what points
//! are. It only prescribes how cuts split cells and how membership
//! flags are recorded.
//!
//! ## Architecture
//!
//! ```text
//! CutFamily              ← indexed subsets t: ℕ → Set(α), t(0) = ∅
//!     │
//! PartitionTower         ← memoized levels; level n+1 splits by cut n+1
//!     │
//! CellAddress            ← binary refinement address of one cell
//!     │
//! CantorCode             ← lazy bit n = (x ∈ t(n))
//!     │
//! SeparationReport       ← finite-sample evidence that cuts separate
//! ```
//!
//! The constructions are total and pure. Whether a cut family actually
//! generates or separates the intended structure is a caller contract:
//! it is not decidable over an infinite domain, and the kernel does not
//! try. [`finite`] provides mask-backed sample spaces on which the
//! guarantees can be checked exhaustively, and [`audit`] re-verifies
//! the construction invariants over such a space.

pub mod audit;
pub mod cuts;
pub mod encode;
pub mod error;
pub mod fingerprint;
pub mod finite;
pub mod partition;
pub mod separation;

pub use audit::{AuditClass, AuditFailure, AuditOutcome, AuditReport, run_audit};
pub use cuts::{CutFamily, FnCuts};
pub use encode::{CantorCode, CodePrefix, encode};
pub use error::CantorError;
pub use fingerprint::{Fingerprint, FingerprintBuilder};
pub use finite::{FiniteSpace, MaskCuts, extent, generated_algebra, level_extents, level_span};
pub use partition::{CellAddress, PartitionLevel, PartitionTower, cell_of};
pub use separation::{Collision, SeparationReport, separates, separation_report};
