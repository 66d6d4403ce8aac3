use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::prelude::GraphError;

/// Half-width, in channels, of the footprint drawn around a network.
pub const CHANNEL_SPREAD: i32 = 2;

/// WiFi frequency band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WiFiBand {
    #[serde(rename = "2.4GHz", alias = "ghz2")]
    Ghz2,
    #[serde(rename = "5GHz", alias = "ghz5")]
    Ghz5,
}

impl WiFiBand {
    pub const ALL: [WiFiBand; 2] = [WiFiBand::Ghz2, WiFiBand::Ghz5];

    pub fn name(&self) -> &'static str {
        match self {
            WiFiBand::Ghz2 => "2.4 GHz",
            WiFiBand::Ghz5 => "5 GHz",
        }
    }

    /// Default channel bounds for the band.
    pub fn config(&self) -> BandConfig {
        match self {
            WiFiBand::Ghz2 => BandConfig {
                first_channel: 1,
                last_channel: 14,
                spread: CHANNEL_SPREAD,
            },
            WiFiBand::Ghz5 => BandConfig {
                first_channel: 36,
                last_channel: 165,
                spread: CHANNEL_SPREAD,
            },
        }
    }

    /// Classifies a centre frequency in MHz.
    pub fn from_frequency(frequency: u32) -> Option<WiFiBand> {
        match frequency {
            2400..=2499 => Some(WiFiBand::Ghz2),
            4900..=5899 => Some(WiFiBand::Ghz5),
            _ => None,
        }
    }

    /// Maps a centre frequency in MHz to its channel number.
    pub fn channel_for_frequency(frequency: u32) -> Option<i32> {
        match WiFiBand::from_frequency(frequency)? {
            WiFiBand::Ghz2 if frequency == 2484 => Some(14),
            WiFiBand::Ghz2 => Some((frequency as i32 - 2407) / 5),
            WiFiBand::Ghz5 => Some((frequency as i32 - 5000) / 5),
        }
    }
}

impl fmt::Display for WiFiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WiFiBand {
    type Err = GraphError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "2" | "2.4" | "2.4ghz" | "2.4 ghz" | "ghz2" => Ok(WiFiBand::Ghz2),
            "5" | "5ghz" | "5 ghz" | "ghz5" => Ok(WiFiBand::Ghz5),
            other => Err(GraphError::InvalidBand(other.to_string())),
        }
    }
}

/// Channel bounds and curve spread for one band, supplied to a view at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandConfig {
    pub first_channel: i32,
    pub last_channel: i32,
    pub spread: i32,
}
