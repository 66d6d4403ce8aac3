pub mod band;
pub mod observation;

pub use band::{BandConfig, WiFiBand, CHANNEL_SPREAD};
pub use observation::{load_snapshots, NetworkObservation, ScanSnapshot};
