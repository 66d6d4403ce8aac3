use anyhow::Context;
use wifigraph::graph::{ChannelGraphView, ChartFrame, MemoryChart};
use wifigraph::scan::{ScanSnapshot, WiFiBand};
use wifigraph::telemetry::UpdateCounts;

use crate::workflow::config::WorkflowConfig;

pub struct WorkflowResult {
    pub frames: Vec<ChartFrame>,
    pub curve_count: usize,
    pub visible_bands: Vec<WiFiBand>,
    pub counts: Vec<(WiFiBand, UpdateCounts)>,
}

/// Drives one channel graph per configured band.
pub struct Runner {
    views: Vec<ChannelGraphView<MemoryChart>>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> anyhow::Result<Self> {
        let views = config
            .bands
            .iter()
            .map(|band| {
                ChannelGraphView::for_band(*band, MemoryChart::new(), config.graph.clone())
                    .with_context(|| format!("building {} view", band))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { views })
    }

    pub fn execute(&mut self, snapshot: &ScanSnapshot) -> anyhow::Result<WorkflowResult> {
        for view in &mut self.views {
            let band = view.band();
            view.update(snapshot)
                .with_context(|| format!("updating {} view", band))?;
        }
        Ok(self.result())
    }

    pub fn result(&self) -> WorkflowResult {
        let frames: Vec<ChartFrame> = self
            .views
            .iter()
            .map(|view| view.chart().frame(view.band()))
            .collect();
        let visible_bands = frames
            .iter()
            .filter(|frame| frame.visible)
            .map(|frame| frame.band)
            .collect();
        let curve_count = self.views.iter().map(|view| view.registry().len()).sum();
        let counts = self
            .views
            .iter()
            .map(|view| (view.band(), view.counts()))
            .collect();

        WorkflowResult {
            frames,
            curve_count,
            visible_bands,
            counts,
        }
    }
}
