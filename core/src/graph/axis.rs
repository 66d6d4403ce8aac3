use serde::{Deserialize, Serialize};

use crate::graph::geometry::FLOOR;
use crate::scan::band::BandConfig;

/// Upper bound of the signal axis, in dBm.
pub const MAX_Y: i32 = 0;
/// Channels visible at once on the X axis.
pub const CNT_X: i32 = 18;

/// Formats tick labels for the channel and signal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub first_channel: i32,
    pub last_channel: i32,
    pub even_only: bool,
}

impl AxisLabel {
    pub fn new(first_channel: i32, last_channel: i32) -> Self {
        Self {
            first_channel,
            last_channel,
            even_only: false,
        }
    }

    pub fn with_even_only(mut self, even_only: bool) -> Self {
        self.even_only = even_only;
        self
    }

    /// Label for a tick value; empty when the tick should stay unlabelled.
    pub fn format(&self, value: f64, is_x: bool) -> String {
        let rounded = value.round() as i32;
        let shown = if is_x {
            rounded >= self.first_channel
                && rounded <= self.last_channel
                && (!self.even_only || rounded % 2 == 0)
        } else {
            rounded > FLOOR && rounded <= MAX_Y
        };
        if shown {
            rounded.to_string()
        } else {
            String::new()
        }
    }
}

/// Axis setup applied once when a view is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub scrollable: bool,
    pub label: AxisLabel,
    pub horizontal_title: String,
    pub vertical_title: String,
}

impl AxisConfig {
    pub fn for_band(band: &BandConfig, scrollable: bool, even_only: bool) -> Self {
        let min_x = band.first_channel - band.spread;
        Self {
            min_x,
            max_x: min_x + CNT_X - 1,
            min_y: FLOOR,
            max_y: MAX_Y,
            scrollable,
            label: AxisLabel::new(band.first_channel, band.last_channel).with_even_only(even_only),
            horizontal_title: "WiFi Channels".into(),
            vertical_title: "Signal Strength (dBm)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::band::WiFiBand;

    #[test]
    fn x_labels_stay_inside_band() {
        let label = AxisLabel::new(1, 14);
        assert_eq!(label.format(0.0, true), "");
        assert_eq!(label.format(1.0, true), "1");
        assert_eq!(label.format(6.4, true), "6");
        assert_eq!(label.format(14.0, true), "14");
        assert_eq!(label.format(15.0, true), "");
    }

    #[test]
    fn even_only_hides_odd_channels() {
        let label = AxisLabel::new(36, 165).with_even_only(true);
        assert_eq!(label.format(37.0, true), "");
        assert_eq!(label.format(38.0, true), "38");
    }

    #[test]
    fn y_labels_exclude_floor() {
        let label = AxisLabel::new(1, 14);
        assert_eq!(label.format(-100.0, false), "");
        assert_eq!(label.format(-99.6, false), "");
        assert_eq!(label.format(-50.0, false), "-50");
        assert_eq!(label.format(0.0, false), "0");
        assert_eq!(label.format(5.0, false), "");
    }

    #[test]
    fn axis_window_spans_visible_channel_count() {
        let axes = AxisConfig::for_band(&WiFiBand::Ghz2.config(), false, false);
        assert_eq!(axes.min_x, -1);
        assert_eq!(axes.max_x, 16);
        assert_eq!(axes.min_y, FLOOR);
        assert!(!axes.label.even_only);
    }
}
