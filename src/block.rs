//! The fixed-capacity storage block making up the deque's chain.

use crate::IndexType;

/// A fixed-capacity slot array holding a contiguous run of the deque's
/// elements, plus arena links to its siblings in the chain.
///
/// # Invariants
/// * Occupied slots are always the contiguous run `0..len`, with the element
///   closest to the deque's front at index 0. Both insertion directions
///   normalize to this single packing convention, so the two end scans never
///   observe internal gaps regardless of how the block was filled.
/// * No operation moves more than `B - 1` elements; `B` is small, so every
///   shift is a short bounded loop.
///
/// Preconditions (fullness/emptiness) are validated by the owning deque;
/// the block itself only `debug_assert!`s them.
#[derive(Clone, Debug)]
pub(crate) struct Block<T, const B: usize, I: IndexType> {
    slots: [Option<T>; B],
    len: usize,
    /// Arena index of the sibling closer to the deque's front.
    pub(crate) prev: I,
    /// Arena index of the sibling closer to the deque's back.
    pub(crate) next: I,
}

impl<T, const B: usize, I: IndexType> Block<T, B, I> {
    pub(crate) fn new() -> Self {
        Self {
            slots: [const { None }; B],
            len: 0,
            prev: I::NONE,
            next: I::NONE,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub(crate) fn is_full(&self) -> bool {
        self.len == B
    }

    /// Inserts at the front: shifts the run `0..len` up by one slot and
    /// writes `item` at index 0.
    pub(crate) fn push_front(&mut self, item: T) {
        debug_assert!(!self.is_full());
        let mut i = self.len;
        while i > 0 {
            self.slots[i] = self.slots[i - 1].take();
            i -= 1;
        }
        self.slots[0] = Some(item);
        self.len += 1;
    }

    /// Inserts at the back: writes `item` at index `len`.
    pub(crate) fn push_back(&mut self, item: T) {
        debug_assert!(!self.is_full());
        self.slots[self.len] = Some(item);
        self.len += 1;
    }

    /// Removes and returns the front element, closing the gap.
    pub(crate) fn take_front(&mut self) -> Option<T> {
        self.remove_at(0)
    }

    /// Removes and returns the back element. The top slot is cleared
    /// directly; no shift is needed.
    pub(crate) fn take_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.slots[self.len].take()
    }

    pub(crate) fn front(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.slots[0].as_ref()
        }
    }

    pub(crate) fn back(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.slots[self.len - 1].as_ref()
        }
    }

    pub(crate) fn front_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        } else {
            self.slots[0].as_mut()
        }
    }

    pub(crate) fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            None
        } else {
            self.slots[self.len - 1].as_mut()
        }
    }

    pub(crate) fn get(&self, i: usize) -> Option<&T> {
        if i < self.len {
            self.slots[i].as_ref()
        } else {
            None
        }
    }

    /// Removes the element at `i`, shifting everything above it down by one
    /// to close the gap. The vacated top slot becomes empty.
    pub(crate) fn remove_at(&mut self, i: usize) -> Option<T> {
        if i >= self.len {
            return None;
        }
        let item = self.slots[i].take();
        for j in i + 1..self.len {
            self.slots[j - 1] = self.slots[j].take();
        }
        self.len -= 1;
        item
    }

    /// Raw slot view, empty slots included. Exposed through the deque's
    /// diagnostic accessor.
    pub(crate) fn slots(&self) -> &[Option<T>] {
        &self.slots
    }
}

impl<T: PartialEq, const B: usize, I: IndexType> Block<T, B, I> {
    /// Index of the first slot equal to `value`, scanning from the front.
    pub(crate) fn position(&self, value: &T) -> Option<usize> {
        (0..self.len).find(|&i| self.slots[i].as_ref() == Some(value))
    }

    /// Index of the first slot equal to `value`, scanning from the back.
    pub(crate) fn rposition(&self, value: &T) -> Option<usize> {
        (0..self.len).rev().find(|&i| self.slots[i].as_ref() == Some(value))
    }
}
