//! # Block Deque
//!
//! A bounded double-ended queue backed by a chain of small fixed-capacity
//! blocks instead of one resizable ring buffer or a per-element linked list.
//!
//! This crate provides `BlockDeque`, a drop-in structure for code written
//! against a generic deque contract (see the `AnyDeque` trait) that needs a
//! hard bound on the total element count.
//!
//! ## Key Features
//!
//! * **Bounded:** insertion beyond the configured `max_len` is rejected as a
//!   `bool`, never an error; the bound defaults to 1000.
//! * **Block storage:** elements live in blocks of [`BLOCK_CAPACITY`] slots,
//!   so no operation ever shifts more than a handful of elements and no
//!   element gets its own heap node.
//! * **Arena chain:** blocks link to each other by compact indices into one
//!   `Vec` arena rather than by pointers; splicing a block in or out of the
//!   chain is an index rewrite, and retired blocks are recycled through a
//!   free list.
//! * **Strict and lenient accessors:** every boundary operation comes in a
//!   `Result` flavor (`remove_front`, `get_back`) and an `Option` flavor
//!   (`pop_front`, `back`) layered over the same implementation.
//!
//! ## Examples
//!
//! ### FIFO use
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut deque: BlockDeque<i32> = BlockDeque::new();
//!
//! for i in 1..=12 {
//!     deque.push_back(i);
//! }
//! assert_eq!(deque.len(), 12);
//!
//! assert_eq!(deque.pop_front(), Some(1));
//! assert_eq!(deque.pop_back(), Some(12));
//! ```
//!
//! ### Capacity bound
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut deque: BlockDeque<&str> = BlockDeque::with_max_len(2);
//!
//! assert!(deque.offer_back("a"));
//! assert!(deque.offer_back("b"));
//!
//! // The bound is enforced; the deque is unchanged.
//! assert!(!deque.offer_back("c"));
//! assert_eq!(deque.len(), 2);
//! ```
//!
//! ### Occurrence removal
//!
//! ```rust
//! use block_deque::BlockDeque;
//!
//! let mut deque: BlockDeque<i32> = (1..=5).collect();
//!
//! assert!(deque.remove_first_occurrence(&3));
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
//! ```

// --- Module Declarations ---

mod block;
pub mod deque;
pub mod index_type;

// --- Re-exports ---

pub use deque::{AnyDeque, BlockDeque, EmptyError, IntoIter, Iter};
pub use deque::{BLOCK_CAPACITY, DEFAULT_MAX_LEN};
pub use index_type::IndexType;
