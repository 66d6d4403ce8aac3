pub mod axis;
pub mod geometry;
pub mod memory;
pub mod palette;
pub mod registry;
pub mod settings;
pub mod view;

pub use axis::{AxisConfig, AxisLabel};
pub use geometry::{CurveGeometry, FLOOR};
pub use memory::{ChartFrame, MemoryChart, RenderedSeries};
pub use palette::{ColorPalette, GraphColor};
pub use registry::{Curve, SeriesRegistry, Upsert};
pub use settings::{GraphLegend, GraphSettings, VisibilityPolicy};
pub use view::{ChannelGraphView, GraphViewOptions};
