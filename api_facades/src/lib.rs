//! API Facades Layer
//!
//! Provides the facade presentation front ends use to drive a partition
//! simulation. Front ends (a window, a terminal driver, a test harness) never
//! touch the partition directly; they hold a [`SimulationSession`] and work
//! through its operations and snapshots.
//!
//! All facades call underlying Rust modules from inner layers.

pub mod config;
pub mod session;
pub mod snapshot;

// Re-export main facade types
pub use config::{SessionConfig, DEMO_ALLOCATION_SIZE, DEMO_GAP_SIZES, DEMO_TOTAL_SIZE};
pub use session::SimulationSession;
pub use snapshot::{SessionSnapshot, Summary};
