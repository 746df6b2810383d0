//! Error types for Cantor kernel operations.
//!
//! The partition and encoding constructions themselves are total; the
//! errors here arise at the domain boundary of mask-backed finite
//! spaces and when parsing textual representations.

/// Errors arising from invalid finite-space data or textual input.
#[derive(Debug, thiserror::Error)]
pub enum CantorError {
    /// A mask-backed space was requested with more points than a mask
    /// can hold.
    #[error("space has {size} points but mask-backed spaces support at most 64")]
    SpaceTooWide { size: u32 },

    /// A cut mask has bits set outside the space.
    #[error("cut {index} mask {mask:#b} lies outside the {size}-point space")]
    MaskOutOfSpace { index: usize, mask: u64, size: u32 },

    /// A point index beyond the space was supplied.
    #[error("point {point} lies outside the {size}-point space")]
    PointOutOfSpace { point: u32, size: u32 },

    /// A cell address or code prefix could not be parsed.
    #[error("invalid bit string: {0:?}")]
    BitString(String),

    /// A fixture payload is malformed.
    #[error("fixture error: {0}")]
    Fixture(String),
}
