//! Cantor codes: points as infinite boolean sequences.
//!
//! Bit n of a point's code answers "inside cut n". The code is
//! conceptually infinite and is therefore never materialized: a
//! [`CantorCode`] is a lazy view that answers bits on demand, and
//! consumers take owned finite [`CodePrefix`]es when they need data.
//!
//! Two codes are equal exactly when the points agree on every cut, so
//! the encoding is injective whenever the cuts separate points (see
//! [`crate::separation`]). Full-code equality is not decidable; the
//! kernel offers agreement up to a chosen length and leaves the choice
//! of length to the caller.

use crate::cuts::CutFamily;
use crate::error::CantorError;
use crate::fingerprint::Fingerprint;
use crate::partition::{CellAddress, cell_of};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Encode a point against a cut family.
pub fn encode<'a, C: CutFamily>(cuts: &'a C, point: &'a C::Point) -> CantorCode<'a, C> {
    CantorCode { cuts, point }
}

/// A lazy, restartable view of one point's Cantor code.
pub struct CantorCode<'a, C: CutFamily> {
    cuts: &'a C,
    point: &'a C::Point,
}

impl<C: CutFamily> Clone for CantorCode<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CutFamily> Copy for CantorCode<'_, C> {}

impl<'a, C: CutFamily> CantorCode<'a, C> {
    /// Bit n of the code: whether the point lies in cut n.
    pub fn bit(&self, n: u32) -> bool {
        self.cuts.contains(n, self.point)
    }

    /// The first `len` bits as an owned prefix.
    pub fn prefix(&self, len: u32) -> CodePrefix {
        CodePrefix {
            bits: (0..len).map(|n| self.bit(n)).collect(),
        }
    }

    /// The cell of partition level `depth` this point falls in.
    ///
    /// The cell address is the code with bit 0 dropped: flags against
    /// cuts 1..=depth.
    pub fn cell(&self, depth: u32) -> CellAddress {
        cell_of(self.cuts, depth, self.point)
    }

    /// Whether this code and `other` agree on bits 0..len.
    pub fn agrees_to(&self, other: &CantorCode<'_, C>, len: u32) -> bool {
        self.first_disagreement(other, len).is_none()
    }

    /// The lowest bit below `len` where the codes differ, if any.
    pub fn first_disagreement(&self, other: &CantorCode<'_, C>, len: u32) -> Option<u32> {
        (0..len).find(|&n| self.bit(n) != other.bit(n))
    }
}

/// An owned finite prefix of a Cantor code.
///
/// Displays and serializes as a '0'/'1' string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodePrefix {
    bits: Vec<bool>,
}

impl CodePrefix {
    /// Prefix length in bits.
    pub fn len(&self) -> u32 {
        self.bits.len() as u32
    }

    /// Whether the prefix is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit n of the prefix, if within the length.
    pub fn bit(&self, n: u32) -> Option<bool> {
        self.bits.get(n as usize).copied()
    }

    /// The prefix as a '0'/'1' string.
    pub fn bit_string(&self) -> String {
        self.bits
            .iter()
            .map(|b| if *b { '1' } else { '0' })
            .collect()
    }

    /// Deterministic fingerprint of the prefix.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::builder()
            .field("bits", &self.bit_string())
            .finish()
    }
}

impl fmt::Display for CodePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bits.is_empty() {
            write!(f, "ε")
        } else {
            write!(f, "{}", self.bit_string())
        }
    }
}

impl FromStr for CodePrefix {
    type Err = CantorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ε" {
            return Ok(Self { bits: Vec::new() });
        }
        let mut bits = Vec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(CantorError::BitString(s.to_string())),
            }
        }
        Ok(Self { bits })
    }
}

impl Serialize for CodePrefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bit_string())
    }
}

impl<'de> Deserialize<'de> for CodePrefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::FnCuts;

    fn sample_cuts() -> impl CutFamily<Point = u32> {
        FnCuts::new(|n: u32, p: &u32| match n {
            1 => p % 2 == 0,
            2 => p % 3 == 0,
            _ => false,
        })
    }

    #[test]
    fn bits_are_memberships() {
        let cuts = sample_cuts();
        let code = encode(&cuts, &6);
        assert!(!code.bit(0));
        assert!(code.bit(1));
        assert!(code.bit(2));
        assert!(!code.bit(3));
    }

    #[test]
    fn prefix_matches_bits() {
        let cuts = sample_cuts();
        let code = encode(&cuts, &6);
        let prefix = code.prefix(4);
        assert_eq!(prefix.bit_string(), "0110");
        assert_eq!(prefix.bit(1), Some(true));
        assert_eq!(prefix.bit(4), None);
    }

    #[test]
    fn cell_is_code_without_bit_zero() {
        let cuts = sample_cuts();
        for point in 0..12u32 {
            let code = encode(&cuts, &point);
            for depth in 0..=4 {
                let prefix = code.prefix(depth + 1);
                let cell = code.cell(depth);
                let tail: Vec<bool> = (1..=depth).map(|n| prefix.bit(n).unwrap()).collect();
                assert_eq!(cell.flags(), &tail[..]);
            }
        }
    }

    #[test]
    fn agreement_tracks_memberships() {
        let cuts = sample_cuts();
        // 2 and 8: both even, both off the multiples of 3.
        assert!(encode(&cuts, &2).agrees_to(&encode(&cuts, &8), 16));
        // 2 and 3 split on both cuts.
        assert_eq!(
            encode(&cuts, &2).first_disagreement(&encode(&cuts, &3), 16),
            Some(1)
        );
        // Any pair agrees on the empty range.
        assert!(encode(&cuts, &2).agrees_to(&encode(&cuts, &3), 0));
    }

    #[test]
    fn prefix_display_parse_serde() {
        let cuts = sample_cuts();
        let prefix = encode(&cuts, &6).prefix(4);
        assert_eq!(prefix.to_string(), "0110");
        assert_eq!("0110".parse::<CodePrefix>().unwrap(), prefix);
        let json = serde_json::to_string(&prefix).unwrap();
        assert_eq!(json, "\"0110\"");
        assert_eq!(serde_json::from_str::<CodePrefix>(&json).unwrap(), prefix);
        assert!("01x".parse::<CodePrefix>().is_err());
        assert_eq!("ε".parse::<CodePrefix>().unwrap().len(), 0);
    }

    #[test]
    fn prefix_fingerprint_is_stable() {
        let cuts = sample_cuts();
        let a = encode(&cuts, &6).prefix(4).fingerprint();
        let b = encode(&cuts, &6).prefix(4).fingerprint();
        assert_eq!(a, b);
    }
}
