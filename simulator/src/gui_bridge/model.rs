use serde::{Deserialize, Serialize};
use wifigraph::graph::ChartFrame;
use wifigraph::scan::WiFiBand;

use crate::workflow::runner::WorkflowResult;

/// Payload served to the visualizer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub tick: u64,
    pub network_count: usize,
    pub curve_count: usize,
    pub visible_bands: Vec<WiFiBand>,
    pub frames: Vec<ChartFrame>,
    pub notes: Vec<String>,
}

impl VisualizationModel {
    pub fn from_result(tick: u64, network_count: usize, result: &WorkflowResult) -> Self {
        let notes = result
            .counts
            .iter()
            .map(|(band, counts)| {
                format!(
                    "{}: {} cycles, {} created, {} removed",
                    band, counts.cycles, counts.created, counts.removed
                )
            })
            .collect();
        Self {
            tick,
            network_count,
            curve_count: result.curve_count,
            visible_bands: result.visible_bands.clone(),
            frames: result.frames.clone(),
            notes,
        }
    }
}
