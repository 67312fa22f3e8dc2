//! Simulation Session Facade
//!
//! Provides the single entry point a presentation front end talks to. A
//! session wraps one allocation engine together with the state that belongs
//! to the front end rather than the engine: the currently selected strategy
//! and the configuration a reset rebuilds from.
//!
//! ## Overview
//!
//! - `allocate` places a request with the selected strategy
//! - `release` frees a process (a click on its block, a menu entry, ...)
//! - `process_at_position` maps a coordinate on a horizontal memory bar of a
//!   given width to the process drawn there
//! - `snapshot` copies out everything needed to redraw
//!
//! Sessions are explicitly owned values; a front end keeps one per window (or
//! per connection) and passes it by reference.

use entities_memory_layout::ProcessId;
use log::debug;
use usecases_memory_management::{AllocationError, PartitionAllocator, PlacementStrategy};

use crate::config::SessionConfig;
use crate::snapshot::{SessionSnapshot, Summary};

/// One interactive simulation
#[derive(Debug, Clone)]
pub struct SimulationSession {
    config: SessionConfig,
    engine: PartitionAllocator,
    strategy: PlacementStrategy,
}

impl SimulationSession {
    /// Build a session from `config`
    ///
    /// # Errors
    ///
    /// Returns `AllocationError::InvalidSize` if the address space is empty or
    /// the seeded pattern does not fit.
    pub fn new(config: SessionConfig) -> Result<Self, AllocationError> {
        let engine = Self::build_engine(&config)?;
        Ok(Self {
            strategy: config.strategy,
            config,
            engine,
        })
    }

    fn build_engine(config: &SessionConfig) -> Result<PartitionAllocator, AllocationError> {
        if config.seed_layout {
            PartitionAllocator::with_gap_pattern(config.total_size, &config.gap_sizes, config.allocation_size)
        } else {
            PartitionAllocator::new(config.total_size)
        }
    }

    /// Discard the current engine and rebuild it from the configuration
    ///
    /// The selected strategy is kept; process ids restart at `P1`.
    pub fn reset(&mut self) -> Result<(), AllocationError> {
        self.engine = Self::build_engine(&self.config)?;
        debug!("session reset ({} units, seeded: {})", self.config.total_size, self.config.seed_layout);
        Ok(())
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: PlacementStrategy) {
        self.strategy = strategy;
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only access to the engine
    pub fn engine(&self) -> &PartitionAllocator {
        &self.engine
    }

    /// Place `size` units with the selected strategy
    pub fn allocate(&mut self, size: usize) -> Result<ProcessId, AllocationError> {
        self.engine.allocate(size, self.strategy)
    }

    /// Place `size` units with an explicit strategy, leaving the selection alone
    pub fn allocate_with(&mut self, size: usize, strategy: PlacementStrategy) -> Result<ProcessId, AllocationError> {
        self.engine.allocate(size, strategy)
    }

    /// Free the block held by `process_id`
    pub fn release(&mut self, process_id: ProcessId) -> Result<(), AllocationError> {
        self.engine.deallocate(process_id)
    }

    /// Process owning address-space offset `offset`
    pub fn owner_at(&self, offset: usize) -> Result<Option<ProcessId>, AllocationError> {
        self.engine.locate_owner_at(offset)
    }

    /// Process drawn at horizontal coordinate `x` on a bar `width` units wide
    ///
    /// The bar represents the whole address space scaled proportionally. The
    /// right edge (`x == width`) maps to the last offset. Coordinates outside
    /// `[0, width]`, non-finite inputs, a non-positive width, and free space
    /// all yield `None`.
    pub fn process_at_position(&self, x: f64, width: f64) -> Option<ProcessId> {
        if !x.is_finite() || !width.is_finite() || width <= 0.0 || x < 0.0 || x > width {
            return None;
        }
        let total_size = self.engine.total_size();
        let scaled = (x / width * total_size as f64).floor() as usize;
        let offset = scaled.min(total_size - 1);
        self.engine.locate_owner_at(offset).ok().flatten()
    }

    /// Copy out the current layout and statistics
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            strategy: self.strategy,
            free: self.engine.free_blocks(),
            allocated: self.engine.allocated_blocks(),
            stats: self.engine.fragmentation_stats(),
        }
    }

    /// One-line statistics summary of the current layout
    pub fn summary(&self) -> Summary {
        Summary(self.engine.fragmentation_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_seeded() {
        let session = SimulationSession::new(SessionConfig::default()).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.allocated.len(), 6);
        assert_eq!(snapshot.free.len(), 6);
        assert_eq!(snapshot.strategy, PlacementStrategy::FirstFit);
    }

    #[test]
    fn test_allocate_uses_selected_strategy() {
        let mut session = SimulationSession::new(SessionConfig::default()).unwrap();
        session.set_strategy(PlacementStrategy::BestFit);

        // Best-fit puts 10 units in the 10-unit gap at 435
        let pid = session.allocate(10).unwrap();
        assert_eq!(session.owner_at(435), Ok(Some(pid)));
        assert_eq!(session.engine().registry().get(pid).unwrap().strategy(), Some(PlacementStrategy::BestFit));
    }

    #[test]
    fn test_allocate_with_keeps_selection() {
        let mut session = SimulationSession::new(SessionConfig::default()).unwrap();
        let pid = session.allocate_with(500, PlacementStrategy::WorstFit).unwrap();
        assert_eq!(session.owner_at(495), Ok(Some(pid)));
        assert_eq!(session.strategy(), PlacementStrategy::FirstFit);
    }

    #[test]
    fn test_process_at_position_scaling() {
        let session = SimulationSession::new(SessionConfig::default()).unwrap();

        // 500-pixel bar: each pixel is two units
        assert_eq!(session.process_at_position(0.0, 500.0), Some(ProcessId::new(1)));
        assert_eq!(session.process_at_position(30.0, 500.0), None);
        assert_eq!(session.process_at_position(40.0, 500.0), Some(ProcessId::new(2)));
        assert_eq!(session.process_at_position(500.0, 500.0), None);
        assert_eq!(session.process_at_position(-1.0, 500.0), None);
        assert_eq!(session.process_at_position(501.0, 500.0), None);
        assert_eq!(session.process_at_position(10.0, 0.0), None);
        assert_eq!(session.process_at_position(f64::NAN, 500.0), None);
    }

    #[test]
    fn test_reset_rebuilds_layout() {
        let mut session = SimulationSession::new(SessionConfig::default()).unwrap();
        session.set_strategy(PlacementStrategy::NextFit);
        session.release(ProcessId::new(3)).unwrap();
        session.allocate(200).unwrap();

        session.reset().unwrap();
        let fresh = SimulationSession::new(SessionConfig::default()).unwrap();
        assert_eq!(session.engine().partition(), fresh.engine().partition());
        assert_eq!(session.strategy(), PlacementStrategy::NextFit);
    }

    #[test]
    fn test_invalid_config() {
        let config = SessionConfig {
            total_size: 100,
            ..SessionConfig::default()
        };
        assert!(matches!(
            SimulationSession::new(config),
            Err(AllocationError::InvalidSize { requested: 495, total_size: 100 })
        ));
    }
}
