//! Quantized Address Delta.
//!
//! This module defines the strongly typed delta stored in a history entry. It provides:
//! 1. **Quantization:** Converting a raw address difference into half-block stride units.
//! 2. **Encoding:** Range-checking against the signed `DELTA_BITS` width, saturating to zero.
//! 3. **Projection:** Scaling an encoded delta back to a byte offset for candidate generation.

use std::fmt;

use super::constants::DELTA_MAX;

/// A quantized, range-checked address delta.
///
/// The stored value always fits in [`DELTA_BITS`](super::constants::DELTA_BITS)
/// signed bits. Differences whose magnitude does not fit are encoded as the
/// sentinel value `0` rather than being rejected, so the history keeps its FIFO
/// shape even on wild jumps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Delta(i16);

impl Delta {
    /// The out-of-range sentinel.
    pub const SENTINEL: Self = Self(0);

    /// Computes the raw quantized difference between two addresses.
    ///
    /// The difference is measured in units of half a block and truncated toward
    /// zero, so any movement smaller than `block_size / 2` yields `0`.
    ///
    /// # Arguments
    ///
    /// * `from` - The previously observed address.
    /// * `to` - The newly observed address.
    /// * `block_size` - Cache block size in bytes; must be at least 2.
    ///
    /// # Returns
    ///
    /// The signed, unencoded difference in half-block units.
    #[inline]
    pub fn raw_between(from: u64, to: u64, block_size: u64) -> i64 {
        let step = (block_size >> 1).max(1) as i64;
        (to.wrapping_sub(from) as i64) / step
    }

    /// Returns `true` if `raw` is representable without saturation.
    #[inline]
    pub const fn fits(raw: i64) -> bool {
        raw.unsigned_abs() <= DELTA_MAX as u64
    }

    /// Encodes a raw difference, substituting [`Delta::SENTINEL`] when it does not fit.
    #[inline]
    pub fn encode(raw: i64) -> Self {
        if Self::fits(raw) {
            Self(raw as i16)
        } else {
            Self::SENTINEL
        }
    }

    /// Returns the encoded value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0 as i64
    }

    /// Scales this delta to a byte offset of whole blocks.
    #[inline]
    pub const fn offset_bytes(self, block_size: u64) -> i64 {
        self.value().wrapping_mul(block_size as i64)
    }
}

impl From<i16> for Delta {
    fn from(value: i16) -> Self {
        Self::encode(value as i64)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}
