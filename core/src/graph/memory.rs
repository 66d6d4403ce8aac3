use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::axis::AxisConfig;
use crate::graph::settings::GraphLegend;
use crate::prelude::{
    ChartDrawable, DataPoint, GraphError, GraphResult, LegendEntry, SeriesId, SeriesStyle,
};
use crate::scan::band::WiFiBand;

/// A series as currently held by a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSeries {
    pub id: SeriesId,
    pub points: Vec<DataPoint>,
    pub style: SeriesStyle,
}

/// Serializable picture of one band's chart, consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub band: WiFiBand,
    pub axes: Option<AxisConfig>,
    pub visible: bool,
    pub legend_position: GraphLegend,
    pub legend: Vec<LegendEntry>,
    pub series: Vec<RenderedSeries>,
}

/// Chart backend that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryChart {
    axes: Option<AxisConfig>,
    series: BTreeMap<SeriesId, RenderedSeries>,
    legend_position: GraphLegend,
    legend: Vec<LegendEntry>,
    visible: bool,
}

impl MemoryChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axes(&self) -> Option<&AxisConfig> {
        self.axes.as_ref()
    }

    pub fn series(&self, id: SeriesId) -> Option<&RenderedSeries> {
        self.series.get(&id)
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Series in the order they were attached.
    pub fn all_series(&self) -> impl Iterator<Item = &RenderedSeries> {
        self.series.values()
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn legend_position(&self) -> GraphLegend {
        self.legend_position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn frame(&self, band: WiFiBand) -> ChartFrame {
        ChartFrame {
            band,
            axes: self.axes.clone(),
            visible: self.visible,
            legend_position: self.legend_position,
            legend: self.legend.clone(),
            series: self.series.values().cloned().collect(),
        }
    }
}

impl ChartDrawable for MemoryChart {
    fn configure_axes(&mut self, axes: &AxisConfig) -> GraphResult<()> {
        self.axes = Some(axes.clone());
        Ok(())
    }

    fn add_series(
        &mut self,
        id: SeriesId,
        points: &[DataPoint],
        style: &SeriesStyle,
    ) -> GraphResult<()> {
        if self.series.contains_key(&id) {
            return Err(GraphError::Backend(format!("{} already attached", id)));
        }
        self.series.insert(
            id,
            RenderedSeries {
                id,
                points: points.to_vec(),
                style: style.clone(),
            },
        );
        Ok(())
    }

    fn reset_data(&mut self, id: SeriesId, points: &[DataPoint]) -> GraphResult<()> {
        let series = self
            .series
            .get_mut(&id)
            .ok_or(GraphError::UnknownSeries(id))?;
        series.points = points.to_vec();
        Ok(())
    }

    fn remove_series(&mut self, id: SeriesId) -> GraphResult<()> {
        self.series
            .remove(&id)
            .map(|_| ())
            .ok_or(GraphError::UnknownSeries(id))
    }

    fn update_legend(
        &mut self,
        position: GraphLegend,
        entries: &[LegendEntry],
    ) -> GraphResult<()> {
        self.legend_position = position;
        self.legend = entries.to_vec();
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> GraphResult<()> {
        self.visible = visible;
        Ok(())
    }
}
