//! Use Cases Layer: Memory Management
//!
//! Provides dynamic partitioning over a fixed-size address space: the four
//! classic placement strategies and the allocation engine that applies them.
//!
//! ## Overview
//!
//! The `usecases_memory_management` crate is part of the use cases layer. It
//! builds on the layout types of the Entities layer and adds the decisions:
//! where a request lands, who owns what, and how fragmented free space is.
//!
//! ## Placement Strategies
//!
//! - **[`firstfit`](firstfit/index.html)**: First-fit - first block in address
//!   order that can hold the request
//!
//! - **[`nextfit`](nextfit/index.html)**: Next-fit - like first-fit, but resumes
//!   after the last next-fit placement and wraps around
//!
//! - **[`bestfit`](bestfit/index.html)**: Best-fit - block leaving the smallest
//!   leftover, minimizing wasted space in the chosen block
//!
//! - **[`worstfit`](worstfit/index.html)**: Worst-fit - block leaving the largest
//!   leftover, keeping remainders large
//!
//! - **[`allocator`](allocator/index.html)**: Strategy selector, placement trait
//!   and error types
//!
//! ## Engine
//!
//! - **[`simulator`](simulator/index.html)**: `PartitionAllocator`, which owns
//!   the partition and the process registry
//! - **[`registry`](registry/index.html)**: Live processes and the id counter
//! - **[`fragmentation`](fragmentation/index.html)**: Free-space statistics
//!
//! ## See Also
//!
//! - [`entities_memory_layout`](../../entities/entities_memory_layout/index.html): Blocks and partitions

pub mod allocator;
pub mod firstfit;
pub mod nextfit;
pub mod bestfit;
pub mod worstfit;
pub mod registry;
pub mod fragmentation;
pub mod simulator;

pub use allocator::{AllocationError, FitStrategy, ParseStrategyError, PlacementStrategy};
pub use fragmentation::FragmentationStats;
pub use registry::{ProcessRecord, ProcessRegistry};
pub use simulator::{AllocatedExtent, FreeExtent, PartitionAllocator};
