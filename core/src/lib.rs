//! Live WiFi channel graph core.
//!
//! Turns successive scan snapshots into stable, per-network curves on a
//! channel axis: trapezoid geometry per network, cyclic colours with a
//! reserved style for the connected network, in-place updates and pruning
//! of networks that disappeared. Drawing is delegated to a
//! [`ChartDrawable`] backend.

pub mod graph;
pub mod prelude;
pub mod scan;
pub mod telemetry;

pub use graph::{ChannelGraphView, ChartFrame, MemoryChart};
pub use prelude::{ChartDrawable, GraphError, GraphResult};
pub use scan::{NetworkObservation, ScanSnapshot, WiFiBand};
