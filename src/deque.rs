use std::collections::VecDeque;
use std::fmt;

use crate::block::Block;
use crate::IndexType;

/// A trait for abstraction over different double-ended queue types, so code
/// written against the generic contract can swap implementations.
pub trait AnyDeque<T> {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn push_back(&mut self, item: T);
    fn push_front(&mut self, item: T);
    fn pop_back(&mut self) -> Option<T>;
    fn pop_front(&mut self) -> Option<T>;
    fn clear(&mut self);
    fn front(&self) -> Option<&T>;
    fn back(&self) -> Option<&T>;
    fn front_mut(&mut self) -> Option<&mut T>;
    fn back_mut(&mut self) -> Option<&mut T>;
}

impl<T> AnyDeque<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_back(&mut self, item: T) {
        self.push_back(item);
    }
    fn push_front(&mut self, item: T) {
        self.push_front(item);
    }
    fn pop_back(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
    fn front_mut(&mut self) -> Option<&mut T> {
        self.front_mut()
    }
    fn back_mut(&mut self) -> Option<&mut T> {
        self.back_mut()
    }
}

/// Error returned by the strict accessors (`remove_front`, `get_back`, ...)
/// when the deque holds no elements.
///
/// The lenient accessors (`pop_front`, `front`, ...) report the same
/// condition as `None`; both are thin layers over one underlying
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyError;

impl fmt::Display for EmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deque is empty")
    }
}

impl std::error::Error for EmptyError {}

/// Number of element slots per block.
pub const BLOCK_CAPACITY: usize = 5;

/// Bound on the total element count when none is given.
pub const DEFAULT_MAX_LEN: usize = 1000;

/// A bounded double-ended queue stored as a chain of fixed-capacity blocks.
///
/// # Overview
/// Elements live in `B`-slot blocks ([`BLOCK_CAPACITY`] by default) linked
/// into a doubly-linked chain. Front operations touch the head block, back
/// operations the tail block; a fresh block is linked in when a boundary
/// block is full and retired once it drains. Any single operation moves at
/// most `B - 1` elements, so there is neither the whole-buffer shifting of a
/// flat array deque nor the per-element node overhead of a classic linked
/// list.
///
/// Blocks are not heap nodes: they live in one `Vec` arena and link to each
/// other by compact [`IndexType`] indices, with retired arena slots kept on
/// a free list threaded through the `next` links. Splice and unlink are
/// index rewrites.
///
/// # Capacity bound
/// The deque rejects insertions once it holds `max_len` elements: the
/// `offer_*` methods report the rejection as `false`, the `push_*` methods
/// swallow it. The bound is fixed at construction.
///
/// # Invariants
/// * `head` is reachable from `tail` via `prev` links and vice versa via
///   `next`; `len` is the sum of block lengths over the chain.
/// * A single (possibly empty) root block always exists; every other live
///   block is non-empty.
pub struct BlockDeque<T, const B: usize = BLOCK_CAPACITY, I: IndexType = u32> {
    blocks: Vec<Block<T, B, I>>,
    free_head: I,
    head: I,
    tail: I,
    len: usize,
    max_len: usize,
}

impl<T, const B: usize, I: IndexType> BlockDeque<T, B, I> {
    /// Creates an empty deque bounded to [`DEFAULT_MAX_LEN`] elements.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    /// Creates an empty deque holding at most `max_len` elements.
    ///
    /// # Panics
    /// Panics if `max_len` is zero.
    pub fn with_max_len(max_len: usize) -> Self {
        const {
            assert!(B > 0, "BlockDeque block capacity must be non-zero");
        }
        assert!(max_len > 0, "BlockDeque max_len must be positive");

        Self {
            blocks: vec![Block::new()],
            free_head: I::NONE,
            head: I::ZERO,
            tail: I::ZERO,
            len: 0,
            max_len,
        }
    }

    // --- Inspection ---

    /// Returns the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bound on the total element count.
    #[inline(always)]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    // --- Access ---

    /// Returns a reference to the front element, or `None` when empty.
    pub fn front(&self) -> Option<&T> {
        self.blocks[self.head.as_usize()].front()
    }

    /// Returns a reference to the back element, or `None` when empty.
    pub fn back(&self) -> Option<&T> {
        self.blocks[self.tail.as_usize()].back()
    }

    /// Strict form of [`front`](Self::front): fails when empty.
    pub fn get_front(&self) -> Result<&T, EmptyError> {
        self.front().ok_or(EmptyError)
    }

    /// Strict form of [`back`](Self::back): fails when empty.
    pub fn get_back(&self) -> Result<&T, EmptyError> {
        self.back().ok_or(EmptyError)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.blocks[self.head.as_usize()].front_mut()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.blocks[self.tail.as_usize()].back_mut()
    }

    /// Raw slot view of the `n`-th block in the chain (front to back),
    /// empty slots included, or `None` past the end of the chain.
    ///
    /// This is a diagnostic accessor: it is the only place the internal
    /// storage layout is observable.
    pub fn block_slots(&self, n: usize) -> Option<&[Option<T>]> {
        let mut curr = self.head;
        let mut i = 0;
        while curr != I::NONE {
            if i == n {
                return Some(self.blocks[curr.as_usize()].slots());
            }
            curr = self.blocks[curr.as_usize()].next;
            i += 1;
        }
        None
    }

    // --- Insertion ---

    /// Inserts at the front. Returns `false` without mutating when the
    /// deque already holds `max_len` elements.
    pub fn offer_front(&mut self, item: T) -> bool {
        if self.len >= self.max_len {
            return false;
        }
        if self.blocks[self.head.as_usize()].is_full() {
            let idx = self.alloc_block();
            self.blocks[idx.as_usize()].next = self.head;
            self.blocks[self.head.as_usize()].prev = idx;
            self.head = idx;
        }
        self.blocks[self.head.as_usize()].push_front(item);
        self.len += 1;
        true
    }

    /// Inserts at the back. Returns `false` without mutating when the
    /// deque already holds `max_len` elements.
    pub fn offer_back(&mut self, item: T) -> bool {
        if self.len >= self.max_len {
            return false;
        }
        if self.blocks[self.tail.as_usize()].is_full() {
            let idx = self.alloc_block();
            self.blocks[idx.as_usize()].prev = self.tail;
            self.blocks[self.tail.as_usize()].next = idx;
            self.tail = idx;
        }
        self.blocks[self.tail.as_usize()].push_back(item);
        self.len += 1;
        true
    }

    /// Inserts at the front, dropping the element when the deque is at
    /// capacity. Use [`offer_front`](Self::offer_front) to observe the
    /// rejection.
    pub fn push_front(&mut self, item: T) {
        self.offer_front(item);
    }

    /// Inserts at the back, dropping the element when the deque is at
    /// capacity. Use [`offer_back`](Self::offer_back) to observe the
    /// rejection.
    pub fn push_back(&mut self, item: T) {
        self.offer_back(item);
    }

    // --- Removal ---

    /// Removes and returns the front element, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let head = self.head;
        let item = self.blocks[head.as_usize()].take_front();
        self.len -= 1;
        let next = self.blocks[head.as_usize()].next;
        if self.blocks[head.as_usize()].is_empty() && next != I::NONE {
            self.blocks[next.as_usize()].prev = I::NONE;
            self.head = next;
            self.free_block(head);
        }
        item
    }

    /// Removes and returns the back element, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let tail = self.tail;
        let item = self.blocks[tail.as_usize()].take_back();
        self.len -= 1;
        let prev = self.blocks[tail.as_usize()].prev;
        if self.blocks[tail.as_usize()].is_empty() && prev != I::NONE {
            self.blocks[prev.as_usize()].next = I::NONE;
            self.tail = prev;
            self.free_block(tail);
        }
        item
    }

    /// Strict form of [`pop_front`](Self::pop_front): fails when empty.
    pub fn remove_front(&mut self) -> Result<T, EmptyError> {
        self.pop_front().ok_or(EmptyError)
    }

    /// Strict form of [`pop_back`](Self::pop_back): fails when empty.
    pub fn remove_back(&mut self) -> Result<T, EmptyError> {
        self.pop_back().ok_or(EmptyError)
    }

    /// Drops every element and resets to the single empty root block. The
    /// capacity bound is unchanged.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.blocks.push(Block::new());
        self.free_head = I::NONE;
        self.head = I::ZERO;
        self.tail = I::ZERO;
        self.len = 0;
    }

    // --- Iteration ---

    /// A lazy forward iterator over the elements, blocks front to back and
    /// slots low to high within each block.
    pub fn iter(&self) -> Iter<'_, T, B, I> {
        Iter {
            blocks: &self.blocks,
            curr: self.head,
            pos: 0,
            remaining: self.len,
        }
    }

    // --- Internals ---

    /// Takes a block off the free list, or grows the arena by one slot.
    fn alloc_block(&mut self) -> I {
        if self.free_head != I::NONE {
            let idx = self.free_head;
            let block = &mut self.blocks[idx.as_usize()];
            self.free_head = block.next;
            block.next = I::NONE;
            block.prev = I::NONE;
            idx
        } else {
            let slot = self.blocks.len();
            assert!(
                slot < I::NONE.as_usize(),
                "block arena exceeded the index type's range"
            );
            self.blocks.push(Block::new());
            I::from_usize(slot)
        }
    }

    /// Pushes a drained block's arena slot onto the free list. The free
    /// list is threaded through the `next` links.
    fn free_block(&mut self, idx: I) {
        debug_assert!(self.blocks[idx.as_usize()].is_empty());
        let block = &mut self.blocks[idx.as_usize()];
        block.prev = I::NONE;
        block.next = self.free_head;
        self.free_head = idx;
    }

    /// Splices an empty block out of the chain: both neighbours are
    /// relinked to each other, so the rest of the chain stays reachable.
    /// Must not be called on the sole remaining block.
    fn unlink(&mut self, idx: I) {
        debug_assert!(self.head != self.tail);
        let block = &self.blocks[idx.as_usize()];
        let (prev, next) = (block.prev, block.next);
        if prev != I::NONE {
            self.blocks[prev.as_usize()].next = next;
        } else {
            self.head = next;
        }
        if next != I::NONE {
            self.blocks[next.as_usize()].prev = prev;
        } else {
            self.tail = prev;
        }
        self.free_block(idx);
    }

    /// Removes the element at `pos` in block `idx`, then rebalances: one
    /// element is borrowed from the next sibling's front to keep this block
    /// as full as the chain allows, and whichever block that drains is
    /// spliced out.
    fn remove_at(&mut self, idx: I, pos: usize) {
        let _ = self.blocks[idx.as_usize()].remove_at(pos);
        self.len -= 1;
        let next = self.blocks[idx.as_usize()].next;
        if next != I::NONE && !self.blocks[next.as_usize()].is_empty() {
            if let Some(borrowed) = self.blocks[next.as_usize()].take_front() {
                self.blocks[idx.as_usize()].push_back(borrowed);
            }
            if self.blocks[next.as_usize()].is_empty() {
                self.unlink(next);
            }
        } else if self.blocks[idx.as_usize()].is_empty() && self.head != self.tail {
            self.unlink(idx);
        }
    }
}

impl<T: PartialEq, const B: usize, I: IndexType> BlockDeque<T, B, I> {
    /// Removes the first element equal to `value`, scanning blocks from the
    /// front. Returns whether anything was removed.
    pub fn remove_first_occurrence(&mut self, value: &T) -> bool {
        let mut curr = self.head;
        while curr != I::NONE {
            if let Some(pos) = self.blocks[curr.as_usize()].position(value) {
                self.remove_at(curr, pos);
                return true;
            }
            curr = self.blocks[curr.as_usize()].next;
        }
        false
    }

    /// Removes the last element equal to `value`, scanning blocks from the
    /// back. Returns whether anything was removed.
    pub fn remove_last_occurrence(&mut self, value: &T) -> bool {
        let mut curr = self.tail;
        while curr != I::NONE {
            if let Some(pos) = self.blocks[curr.as_usize()].rposition(value) {
                self.remove_at(curr, pos);
                return true;
            }
            curr = self.blocks[curr.as_usize()].prev;
        }
        false
    }

    /// Returns `true` if any element equals `value` (front-to-back scan).
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|item| item == value)
    }
}

impl<T, const B: usize, I: IndexType> AnyDeque<T> for BlockDeque<T, B, I> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_back(&mut self, item: T) {
        self.push_back(item);
    }
    fn push_front(&mut self, item: T) {
        self.push_front(item);
    }
    fn pop_back(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn pop_front(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
    fn front_mut(&mut self) -> Option<&mut T> {
        self.front_mut()
    }
    fn back_mut(&mut self) -> Option<&mut T> {
        self.back_mut()
    }
}

// --- Iterators ---

/// Forward iterator over a [`BlockDeque`]'s elements.
pub struct Iter<'a, T, const B: usize, I: IndexType> {
    blocks: &'a [Block<T, B, I>],
    curr: I,
    pos: usize,
    remaining: usize,
}

impl<'a, T, const B: usize, I: IndexType> Iterator for Iter<'a, T, B, I> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while self.remaining > 0 && self.curr != I::NONE {
            let block = &self.blocks[self.curr.as_usize()];
            if self.pos < block.len() {
                let item = block.get(self.pos);
                self.pos += 1;
                if item.is_some() {
                    self.remaining -= 1;
                    return item;
                }
            } else {
                self.curr = block.next;
                self.pos = 0;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, const B: usize, I: IndexType> ExactSizeIterator for Iter<'_, T, B, I> {}

/// Draining by-value iterator over a [`BlockDeque`].
pub struct IntoIter<T, const B: usize, I: IndexType> {
    deque: BlockDeque<T, B, I>,
}

impl<T, const B: usize, I: IndexType> Iterator for IntoIter<T, B, I> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, const B: usize, I: IndexType> ExactSizeIterator for IntoIter<T, B, I> {}

impl<T, const B: usize, I: IndexType> IntoIterator for BlockDeque<T, B, I> {
    type Item = T;
    type IntoIter = IntoIter<T, B, I>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { deque: self }
    }
}

impl<'a, T, const B: usize, I: IndexType> IntoIterator for &'a BlockDeque<T, B, I> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B, I>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Traits ---

impl<T, const B: usize, I: IndexType> Default for BlockDeque<T, B, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const B: usize, I: IndexType> Clone for BlockDeque<T, B, I> {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            free_head: self.free_head,
            head: self.head,
            tail: self.tail,
            len: self.len,
            max_len: self.max_len,
        }
    }
}

impl<T: fmt::Debug, const B: usize, I: IndexType> fmt::Debug for BlockDeque<T, B, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const B: usize, I: IndexType> PartialEq for BlockDeque<T, B, I> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const B: usize, I: IndexType> Eq for BlockDeque<T, B, I> {}

/// Back-insertion in iteration order; elements beyond the capacity bound
/// are dropped, mirroring [`push_back`](BlockDeque::push_back).
impl<T, const B: usize, I: IndexType> Extend<T> for BlockDeque<T, B, I> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const B: usize, I: IndexType> FromIterator<T> for BlockDeque<T, B, I> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    type TestDeque = BlockDeque<i32>;

    fn collect(deque: &TestDeque) -> Vec<i32> {
        deque.iter().copied().collect()
    }

    #[test]
    fn test_deque_fifo_round_trip() {
        let mut d = TestDeque::new();
        for i in 1..=12 {
            assert!(d.offer_back(i));
        }
        assert_eq!(d.len(), 12);
        for i in 1..=12 {
            assert_eq!(d.pop_front(), Some(i));
        }
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_lifo_round_trip() {
        let mut d = TestDeque::new();
        for i in 1..=12 {
            assert!(d.offer_front(i));
        }
        for i in (1..=12).rev() {
            assert_eq!(d.pop_front(), Some(i));
        }
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_strict_removal_scenario() {
        let mut d = TestDeque::new();
        for i in 1..=12 {
            d.push_back(i);
        }
        assert_eq!(d.len(), 12);
        for i in 1..=12 {
            assert_eq!(d.remove_front(), Ok(i));
        }
        assert_eq!(d.remove_front(), Err(EmptyError));
        assert_eq!(d.remove_back(), Err(EmptyError));
    }

    #[test]
    fn test_deque_capacity_bound_rejects() {
        let mut d: BlockDeque<i32> = BlockDeque::with_max_len(3);
        assert!(d.offer_back(1));
        assert!(d.offer_back(2));
        assert!(d.offer_front(0));
        assert!(!d.offer_back(3));
        assert!(!d.offer_front(-1));
        assert_eq!(d.len(), 3);
        assert_eq!(collect(&d), vec![0, 1, 2]);
    }

    #[test]
    fn test_deque_push_swallows_capacity_rejection() {
        let mut d: BlockDeque<i32> = BlockDeque::with_max_len(2);
        d.push_back(1);
        d.push_back(2);
        d.push_back(3);
        d.push_front(0);
        assert_eq!(d.len(), 2);
        assert_eq!(collect(&d), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "max_len must be positive")]
    fn test_deque_zero_bound_rejected() {
        let _ = BlockDeque::<i32>::with_max_len(0);
    }

    #[test]
    fn test_deque_pop_empty_idempotent() {
        let mut d = TestDeque::new();
        for _ in 0..3 {
            assert_eq!(d.pop_front(), None);
            assert_eq!(d.pop_back(), None);
            assert_eq!(d.len(), 0);
        }
    }

    #[test]
    fn test_deque_peeks() {
        let mut d = TestDeque::new();
        assert_eq!(d.front(), None);
        assert_eq!(d.back(), None);
        assert_eq!(d.get_front(), Err(EmptyError));
        assert_eq!(d.get_back(), Err(EmptyError));

        for i in 1..=7 {
            d.push_back(i);
        }
        assert_eq!(d.front(), Some(&1));
        assert_eq!(d.back(), Some(&7));
        assert_eq!(d.get_front(), Ok(&1));
        assert_eq!(d.get_back(), Ok(&7));
        assert_eq!(d.len(), 7);

        if let Some(front) = d.front_mut() {
            *front = 10;
        }
        if let Some(back) = d.back_mut() {
            *back = 70;
        }
        assert_eq!(d.pop_front(), Some(10));
        assert_eq!(d.pop_back(), Some(70));
    }

    #[test]
    fn test_deque_boundary_blocks_allocated_and_retired() {
        let mut d = TestDeque::new();
        // 7 elements span two blocks of 5.
        for i in 1..=7 {
            d.push_back(i);
        }
        assert!(d.block_slots(1).is_some());
        // Drain the back block; the tail pointer must retreat.
        assert_eq!(d.pop_back(), Some(7));
        assert_eq!(d.pop_back(), Some(6));
        assert!(d.block_slots(1).is_none());
        assert_eq!(collect(&d), vec![1, 2, 3, 4, 5]);

        // Same at the front.
        for i in 1..=5 {
            assert_eq!(d.pop_front(), Some(i));
        }
        assert!(d.is_empty());
        // The root block survives a full drain.
        assert_eq!(d.block_slots(0).map(|slots| slots.len()), Some(5));
    }

    #[test]
    fn test_deque_clear_and_reuse() {
        let mut d = TestDeque::new();
        for i in 1..=13 {
            d.push_back(i);
        }
        d.clear();
        assert_eq!(d.len(), 0);
        assert!(d.is_empty());
        assert_eq!(d.max_len(), DEFAULT_MAX_LEN);
        assert!(d.offer_back(42));
        assert_eq!(d.front(), Some(&42));
    }

    #[test]
    fn test_deque_remove_occurrence_single_block() {
        let mut d = TestDeque::new();
        for i in 1..=5 {
            d.push_back(i);
        }
        assert!(d.remove_first_occurrence(&3));
        assert_eq!(d.len(), 4);
        assert_eq!(collect(&d), vec![1, 2, 4, 5]);
        assert!(!d.remove_first_occurrence(&3));
        assert_eq!(d.len(), 4);
    }

    #[test]
    fn test_deque_remove_occurrence_picks_correct_end() {
        let mut d = TestDeque::new();
        for v in [1, 2, 1, 3, 1] {
            d.push_back(v);
        }
        assert!(d.remove_first_occurrence(&1));
        assert_eq!(collect(&d), vec![2, 1, 3, 1]);
        assert!(d.remove_last_occurrence(&1));
        assert_eq!(collect(&d), vec![2, 1, 3]);
        assert!(!d.remove_last_occurrence(&9));
    }

    #[test]
    fn test_deque_remove_occurrence_borrows_from_next_block() {
        let mut d = TestDeque::new();
        for i in 1..=15 {
            d.push_back(i);
        }
        // Removing from the first block pulls the second block's front
        // element back to keep the block full.
        assert!(d.remove_first_occurrence(&3));
        assert_eq!(d.len(), 14);
        assert_eq!(
            d.block_slots(0).unwrap(),
            &[Some(1), Some(2), Some(4), Some(5), Some(6)]
        );
        assert_eq!(
            collect(&d),
            vec![1, 2, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );
    }

    #[test]
    fn test_deque_chain_survives_interior_block_drain() {
        let mut d = TestDeque::new();
        for i in 1..=15 {
            d.push_back(i);
        }
        // Each removal in the middle block borrows from the last block;
        // the fifth drains the last block entirely. The chain must stay
        // fully reachable afterwards.
        for v in [6, 7, 8, 9, 10] {
            assert!(d.remove_first_occurrence(&v));
        }
        assert_eq!(d.len(), 10);
        assert_eq!(collect(&d), vec![1, 2, 3, 4, 5, 11, 12, 13, 14, 15]);
        assert_eq!(d.back(), Some(&15));

        // Both ends still work.
        d.push_back(16);
        assert_eq!(d.pop_back(), Some(16));
        assert_eq!(d.pop_back(), Some(15));
        assert_eq!(d.pop_front(), Some(1));
    }

    #[test]
    fn test_deque_remove_occurrence_drains_tail_block() {
        let mut d = TestDeque::new();
        for i in 1..=10 {
            d.push_back(i);
        }
        for v in [6, 7, 8, 9, 10] {
            assert!(d.remove_first_occurrence(&v));
        }
        assert_eq!(d.len(), 5);
        assert!(d.block_slots(1).is_none());
        assert_eq!(d.back(), Some(&5));
        assert_eq!(d.pop_back(), Some(5));
    }

    #[test]
    fn test_deque_contains() {
        let mut d = TestDeque::new();
        for i in 1..=8 {
            d.push_back(i);
        }
        assert!(d.contains(&1));
        assert!(d.contains(&6));
        assert!(d.contains(&8));
        assert!(!d.contains(&9));
        assert!(!TestDeque::new().contains(&1));
    }

    #[test]
    fn test_deque_iterator() {
        let mut d = TestDeque::new();
        for i in 1..=11 {
            d.push_back(i);
        }
        let mut iter = d.iter();
        assert_eq!(iter.size_hint(), (11, Some(11)));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.size_hint(), (10, Some(10)));
        assert_eq!(iter.last(), Some(&11));

        let drained: Vec<_> = d.into_iter().collect();
        assert_eq!(drained, (1..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_deque_mixed_front_back_single_block() {
        let mut d = TestDeque::new();
        d.push_back(3);
        d.push_front(2);
        d.push_back(4);
        d.push_front(1);
        // Mixed insertion on the lone root block stays contiguous.
        assert_eq!(collect(&d), vec![1, 2, 3, 4]);
        assert_eq!(d.pop_front(), Some(1));
        assert_eq!(d.pop_back(), Some(4));
        assert_eq!(collect(&d), vec![2, 3]);
    }

    #[test]
    fn test_deque_block_slots_layout() {
        let mut d = TestDeque::new();
        for i in 1..=7 {
            d.push_back(i);
        }
        assert_eq!(
            d.block_slots(0).unwrap(),
            &[Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        assert_eq!(
            d.block_slots(1).unwrap(),
            &[Some(6), Some(7), None, None, None]
        );
        assert_eq!(d.block_slots(2), None);
    }

    #[test]
    fn test_deque_retired_blocks_reused() {
        let mut d: BlockDeque<i32> = BlockDeque::with_max_len(20);
        // Grow to four blocks, drain, regrow; the arena recycles retired
        // slots through the free list instead of growing past the peak
        // chain length.
        for round in 0..3 {
            for i in 0..20 {
                assert!(d.offer_back(round * 100 + i));
            }
            for i in 0..20 {
                assert_eq!(d.pop_front(), Some(round * 100 + i));
            }
        }
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_extend_in_order_with_bound() {
        let mut d: BlockDeque<i32> = BlockDeque::with_max_len(3);
        d.extend([1, 2, 3, 4, 5]);
        assert_eq!(d.len(), 3);
        assert_eq!(collect(&d), vec![1, 2, 3]);

        let d: BlockDeque<i32> = (1..=7).collect();
        assert_eq!(
            d.iter().copied().collect::<Vec<_>>(),
            (1..=7).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_deque_traits_interop() {
        let mut d = TestDeque::new();
        d.extend([1, 2, 3]);

        let cloned = d.clone();
        assert_eq!(cloned, d);

        let debug = format!("{:?}", d);
        assert_eq!(debug, "[1, 2, 3]");

        let def: TestDeque = BlockDeque::default();
        assert!(def.is_empty());
        assert_eq!(def.max_len(), DEFAULT_MAX_LEN);

        let mut other = TestDeque::new();
        other.extend([1, 2]);
        assert_ne!(other, d);

        assert_eq!(format!("{}", EmptyError), "deque is empty");
    }

    #[test]
    fn test_deque_any_deque_contract() {
        fn exercise<D: AnyDeque<i32>>(d: &mut D) {
            d.push_back(2);
            d.push_front(1);
            d.push_back(3);
            assert_eq!(d.len(), 3);
            assert_eq!(d.front(), Some(&1));
            assert_eq!(d.back(), Some(&3));
            if let Some(front) = d.front_mut() {
                *front = -1;
            }
            if let Some(back) = d.back_mut() {
                *back = -3;
            }
            assert_eq!(d.pop_front(), Some(-1));
            assert_eq!(d.pop_back(), Some(-3));
            d.clear();
            assert!(d.is_empty());
        }

        exercise(&mut TestDeque::new());
        exercise(&mut VecDeque::new());
    }

    #[test]
    fn test_deque_drop_behavior() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let counter = Rc::new(RefCell::new(0));
        #[derive(Clone)]
        struct Dropper(Rc<RefCell<i32>>);
        impl Drop for Dropper {
            fn drop(&mut self) {
                *self.0.borrow_mut() += 1;
            }
        }

        {
            let mut d: BlockDeque<Dropper> = BlockDeque::new();
            for _ in 0..7 {
                d.push_back(Dropper(counter.clone()));
            }
        }
        assert_eq!(*counter.borrow(), 7);

        *counter.borrow_mut() = 0;
        let mut d: BlockDeque<Dropper> = BlockDeque::new();
        for _ in 0..7 {
            d.push_back(Dropper(counter.clone()));
        }
        d.clear();
        assert_eq!(*counter.borrow(), 7);
        assert!(d.is_empty());
    }

    #[test]
    fn test_deque_small_index_type() {
        let mut d: BlockDeque<i32, 2, u8> = BlockDeque::with_max_len(8);
        for i in 1..=8 {
            assert!(d.offer_back(i));
        }
        assert!(!d.offer_back(9));
        assert_eq!(d.block_slots(0).unwrap(), &[Some(1), Some(2)]);
        for i in 1..=8 {
            assert_eq!(d.pop_front(), Some(i));
        }
        assert_eq!(d.pop_front(), None);
    }
}
