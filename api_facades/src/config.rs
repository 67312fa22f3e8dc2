//! Session Configuration
//!
//! Describes how a simulation session builds (and rebuilds on reset) its
//! address space.

use usecases_memory_management::PlacementStrategy;

/// Gap sizes of the demonstration layout
pub const DEMO_GAP_SIZES: [usize; 5] = [25, 40, 100, 20, 10];

/// Segment size of the demonstration layout
pub const DEMO_ALLOCATION_SIZE: usize = 50;

/// Address-space size of the demonstration layout
pub const DEMO_TOTAL_SIZE: usize = 1000;

/// Session configuration
///
/// The default is the demonstration layout: 1000 units seeded with six
/// 50-unit processes around gaps of 25, 40, 100, 20 and 10 units, placing new
/// requests with first-fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Size of the address space
    pub total_size: usize,
    /// Free gaps laid between seeded processes
    pub gap_sizes: Vec<usize>,
    /// Size of each seeded process
    pub allocation_size: usize,
    /// Strategy used for new requests until changed
    pub strategy: PlacementStrategy,
    /// Seed the gap pattern; when false the space starts as one free block
    pub seed_layout: bool,
}

impl SessionConfig {
    /// Configuration for an unseeded address space of `total_size` units
    pub fn empty(total_size: usize) -> Self {
        Self {
            total_size,
            seed_layout: false,
            ..Self::default()
        }
    }

    /// Replace the starting strategy
    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_size: DEMO_TOTAL_SIZE,
            gap_sizes: DEMO_GAP_SIZES.to_vec(),
            allocation_size: DEMO_ALLOCATION_SIZE,
            strategy: PlacementStrategy::FirstFit,
            seed_layout: true,
        }
    }
}
