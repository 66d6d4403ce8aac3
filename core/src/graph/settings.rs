use serde::{Deserialize, Serialize};

use crate::scan::band::WiFiBand;

/// Where the chart places its legend.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GraphLegend {
    Left,
    #[default]
    Right,
    Hide,
}

/// Decides whether a band's view is shown after an update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "band", rename_all = "snake_case")]
pub enum VisibilityPolicy {
    Always,
    /// Only the view rendering the selected band is shown.
    SelectedBand(WiFiBand),
    /// Shown while the band has at least one network.
    #[default]
    WhenPopulated,
}

impl VisibilityPolicy {
    pub fn is_visible(&self, band: WiFiBand, has_data: bool) -> bool {
        match self {
            VisibilityPolicy::Always => true,
            VisibilityPolicy::SelectedBand(selected) => *selected == band,
            VisibilityPolicy::WhenPopulated => has_data,
        }
    }
}

/// User-facing graph preferences shared by every band view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphSettings {
    pub legend: GraphLegend,
    pub visibility: VisibilityPolicy,
}
