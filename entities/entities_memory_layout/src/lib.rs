//! Entities Layer: Memory Layout
//!
//! Provides the fundamental data types describing how a fixed-size linear
//! address space is carved into regions.
//!
//! ## Overview
//!
//! The `entities_memory_layout` crate is the innermost layer of the partition
//! simulator. It knows nothing about placement strategies or process
//! bookkeeping; it only models regions and keeps the ordered block list
//! structurally sound.
//!
//! ## Modules
//!
//! - **[`block`](block/index.html)**: `Block`, `BlockStatus` and `ProcessId`
//! - **[`partition`](partition/index.html)**: `Partition`, the gapless ordered
//!   block list with split and coalesce
//!
//! ## Invariants
//!
//! Every `Partition` reachable through the public API satisfies:
//!
//! 1. The blocks cover `[0, total_size)` contiguously and in ascending order
//! 2. No two adjacent blocks are both free (once coalesced)
//! 3. Every block has a positive size
//! 4. No process id owns more than one block
//!
//! ## See Also
//!
//! - [`usecases_memory_management`](../../usecases/usecases_memory_management/index.html): Placement strategies and the allocation engine

pub mod block;
pub mod partition;

pub use block::{Block, BlockStatus, ProcessId};
pub use partition::{Partition, PartitionError};
