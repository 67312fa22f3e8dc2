//! Placement Strategy Trait and Types
//!
//! Defines the placement interface shared by the four classic dynamic
//! partitioning strategies, the strategy selector used by the allocation
//! engine, and the engine's error type.
//!
//! ## Overview
//!
//! A placement strategy looks at the current block list and picks the index
//! of a free block able to hold a request, or reports that nothing fits. It
//! never mutates the partition; splitting and bookkeeping belong to
//! [`PartitionAllocator`](crate::simulator::PartitionAllocator).
//!
//! ## Placement Strategies
//!
//! - **FirstFit**: first eligible block in address order
//! - **NextFit**: first eligible block after the last next-fit placement, wrapping around
//! - **BestFit**: eligible block leaving the smallest leftover
//! - **WorstFit**: eligible block leaving the largest leftover
//!
//! A block is eligible when it is free and at least as large as the request.
//!
//! ## Examples
//!
//! ```rust
//! use entities_memory_layout::Partition;
//! use usecases_memory_management::PlacementStrategy;
//!
//! let partition = Partition::new(100).unwrap();
//! let index = PlacementStrategy::BestFit.select(partition.blocks(), 40, None);
//! assert_eq!(index, Some(0));
//! ```
//!
//! ## See Also
//!
//! - [`firstfit`](super::firstfit/index.html): First-fit placement
//! - [`nextfit`](super::nextfit/index.html): Next-fit placement
//! - [`bestfit`](super::bestfit/index.html): Best-fit placement
//! - [`worstfit`](super::worstfit/index.html): Worst-fit placement

use std::fmt;
use std::str::FromStr;

use entities_memory_layout::{Block, PartitionError, ProcessId};
use thiserror::Error;

use crate::bestfit::BestFit;
use crate::firstfit::FirstFit;
use crate::nextfit::NextFit;
use crate::worstfit::WorstFit;

/// Placement strategy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementStrategy {
    /// First-fit placement strategy
    FirstFit,
    /// Next-fit placement strategy
    NextFit,
    /// Best-fit placement strategy
    BestFit,
    /// Worst-fit placement strategy
    WorstFit,
}

impl PlacementStrategy {
    /// Every strategy, in presentation order
    pub const ALL: [PlacementStrategy; 4] = [
        PlacementStrategy::FirstFit,
        PlacementStrategy::NextFit,
        PlacementStrategy::BestFit,
        PlacementStrategy::WorstFit,
    ];

    /// Canonical kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            PlacementStrategy::FirstFit => "first-fit",
            PlacementStrategy::NextFit => "next-fit",
            PlacementStrategy::BestFit => "best-fit",
            PlacementStrategy::WorstFit => "worst-fit",
        }
    }

    /// Pick a block for `request` units
    ///
    /// `next_fit_cursor` is the index chosen by the last successful next-fit
    /// placement; it is ignored by the other strategies.
    pub fn select(self, blocks: &[Block], request: usize, next_fit_cursor: Option<usize>) -> Option<usize> {
        match self {
            PlacementStrategy::FirstFit => FirstFit.find(blocks, request),
            PlacementStrategy::NextFit => NextFit::resuming_after(next_fit_cursor).find(blocks, request),
            PlacementStrategy::BestFit => BestFit.find(blocks, request),
            PlacementStrategy::WorstFit => WorstFit.find(blocks, request),
        }
    }
}

impl fmt::Display for PlacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised strategy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown placement strategy `{0}` (expected first-fit, next-fit, best-fit or worst-fit)")]
pub struct ParseStrategyError(pub String);

impl FromStr for PlacementStrategy {
    type Err = ParseStrategyError;

    /// Accepts `first-fit`, `first_fit`, `firstfit`, `First Fit` and `first`
    /// (likewise for the other strategies), ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        let stem = key.strip_suffix("fit").unwrap_or(&key);

        match stem {
            "first" => Ok(PlacementStrategy::FirstFit),
            "next" => Ok(PlacementStrategy::NextFit),
            "best" => Ok(PlacementStrategy::BestFit),
            "worst" => Ok(PlacementStrategy::WorstFit),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Placement trait for the different strategies
///
/// Implementations receive the blocks in ascending address order and return
/// the index of an eligible block (free, `size >= request`), or `None` when no
/// block is eligible. They must not assume `request` is positive or bounded;
/// validation happens in the engine before dispatch.
pub trait FitStrategy {
    /// Choose a block for `request` units
    fn find(&self, blocks: &[Block], request: usize) -> Option<usize>;
}

/// Allocation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Requested size is zero or larger than the address space
    #[error("invalid size {requested}: must be between 1 and {total_size}")]
    InvalidSize { requested: usize, total_size: usize },
    /// Seeded gap pattern is larger than `usize` can represent
    #[error("gap pattern size overflows (address space is {total_size} units)")]
    PatternOverflow { total_size: usize },
    /// No free block is large enough under the chosen strategy
    #[error("no free block can hold {requested} units ({strategy})")]
    NoSpace {
        requested: usize,
        strategy: PlacementStrategy,
    },
    /// Unknown or already released process
    #[error("process {0} not found")]
    ProcessNotFound(ProcessId),
    /// Offset outside `[0, total_size)`
    #[error("offset {offset} is outside the {total_size}-unit address space")]
    InvalidOffset { offset: usize, total_size: usize },
    /// Structural partition failure
    #[error(transparent)]
    Layout(#[from] PartitionError),
}
