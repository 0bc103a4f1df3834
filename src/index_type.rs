//! Compact index types for the block arena.

use core::hash::Hash;
use std::fmt::Debug;

/// A sealed-style trait for integer types used as **block handles** into the
/// deque's arena.
///
/// Instead of pointer-based sibling links, blocks store indices into a single
/// `Vec` arena. Splicing a block in or out of the chain is then an index
/// rewrite with no dangling-reference risk, and a link costs 1-4 bytes
/// instead of 8 on 64-bit platforms.
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no block" (analogous to a null link).
    /// Used for the ends of the chain and for the end of the free list.
    const NONE: Self;

    /// The first valid index (0).
    const ZERO: Self;

    /// Converts this index to a `usize` for arena access.
    fn as_usize(self) -> usize;

    /// Converts a `usize` arena slot to this compact type.
    ///
    /// # Panics
    /// May panic if `i` does not fit the underlying type (e.g., > 254 for
    /// `u8`, where 255 is reserved as [`Self::NONE`]).
    fn from_usize(i: usize) -> Self;
}

impl IndexType for u8 {
    const NONE: Self = u8::MAX;
    const ZERO: Self = 0;
    #[inline(always)]
    fn as_usize(self) -> usize {
        self as usize
    }
    #[inline(always)]
    fn from_usize(i: usize) -> Self {
        i as u8
    }
}

impl IndexType for u16 {
    const NONE: Self = u16::MAX;
    const ZERO: Self = 0;
    #[inline(always)]
    fn as_usize(self) -> usize {
        self as usize
    }
    #[inline(always)]
    fn from_usize(i: usize) -> Self {
        i as u16
    }
}

impl IndexType for u32 {
    const NONE: Self = u32::MAX;
    const ZERO: Self = 0;
    #[inline(always)]
    fn as_usize(self) -> usize {
        self as usize
    }
    #[inline(always)]
    fn from_usize(i: usize) -> Self {
        i as u32
    }
}
