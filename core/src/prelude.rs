use serde::{Deserialize, Serialize};

use crate::graph::axis::AxisConfig;
use crate::graph::palette::GraphColor;
use crate::graph::settings::GraphLegend;

/// A single plot point on the channel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: i32,
    pub y: i32,
}

impl DataPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Opaque handle a chart backend uses to address one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub u64);

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "series#{}", self.0)
    }
}

/// Visual style applied to a series when it is first attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: GraphColor,
    pub thickness: u32,
    pub draw_background: bool,
    pub title: String,
}

/// One row of the chart legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub title: String,
    pub color: GraphColor,
    pub thickness: u32,
}

/// Common error type for chart backends and configuration.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("chart backend failure: {0}")]
    Backend(String),
    #[error("unknown series {0}")]
    UnknownSeries(SeriesId),
    #[error("invalid band: {0}")]
    InvalidBand(String),
    #[error("malformed scan data: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Drawing surface the channel graph renders into.
///
/// Implementations are assumed to be synchronous. The view calls
/// `configure_axes` once at construction, then any number of series
/// mutations followed by `update_legend` and `set_visible` per cycle.
pub trait ChartDrawable {
    fn configure_axes(&mut self, axes: &AxisConfig) -> GraphResult<()>;
    fn add_series(
        &mut self,
        id: SeriesId,
        points: &[DataPoint],
        style: &SeriesStyle,
    ) -> GraphResult<()>;
    fn reset_data(&mut self, id: SeriesId, points: &[DataPoint]) -> GraphResult<()>;
    fn remove_series(&mut self, id: SeriesId) -> GraphResult<()>;
    fn update_legend(
        &mut self,
        position: GraphLegend,
        entries: &[LegendEntry],
    ) -> GraphResult<()>;
    fn set_visible(&mut self, visible: bool) -> GraphResult<()>;
}
