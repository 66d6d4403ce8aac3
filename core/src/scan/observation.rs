use serde::{Deserialize, Serialize};

use crate::prelude::GraphResult;
use crate::scan::band::WiFiBand;

/// One detected network as reported by a scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkObservation {
    pub ssid: String,
    pub bssid: String,
    pub channel: i32,
    /// Signal level in dBm.
    pub level: i32,
    pub band: WiFiBand,
    #[serde(default)]
    pub connected: bool,
}

impl NetworkObservation {
    pub fn new(
        ssid: impl Into<String>,
        bssid: impl Into<String>,
        channel: i32,
        level: i32,
        band: WiFiBand,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
            channel,
            level,
            band,
            connected: false,
        }
    }

    /// Builds an observation from a raw centre frequency, `None` when the
    /// frequency lies outside every known band.
    pub fn from_frequency(
        ssid: impl Into<String>,
        bssid: impl Into<String>,
        frequency: u32,
        level: i32,
    ) -> Option<Self> {
        let band = WiFiBand::from_frequency(frequency)?;
        let channel = WiFiBand::channel_for_frequency(frequency)?;
        Some(Self::new(ssid, bssid, channel, level, band))
    }

    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    /// Identity key of the signal source.
    pub fn title(&self) -> String {
        let ssid = if self.ssid.is_empty() {
            "*hidden*"
        } else {
            self.ssid.as_str()
        };
        format!("{} ({})", ssid, self.bssid)
    }
}

/// Result of one scan refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSnapshot {
    #[serde(default)]
    pub networks: Vec<NetworkObservation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<NetworkObservation>,
}

impl ScanSnapshot {
    pub fn new(networks: Vec<NetworkObservation>) -> Self {
        Self {
            networks,
            connection: None,
        }
    }

    /// Builds a snapshot whose connection is the first network flagged as connected.
    pub fn with_detected_connection(networks: Vec<NetworkObservation>) -> Self {
        let connection = networks.iter().find(|network| network.connected).cloned();
        Self {
            networks,
            connection,
        }
    }

    pub fn connection(&self) -> Option<&NetworkObservation> {
        self.connection.as_ref()
    }

    /// Networks of `band`, ordered by channel. Equal channels keep scan order.
    pub fn networks_in(&self, band: WiFiBand) -> Vec<&NetworkObservation> {
        let mut networks: Vec<&NetworkObservation> = self
            .networks
            .iter()
            .filter(|network| network.band == band)
            .collect();
        networks.sort_by_key(|network| network.channel);
        networks
    }

    pub fn from_json(contents: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Parses a recorded sequence of snapshots.
pub fn load_snapshots(contents: &str) -> GraphResult<Vec<ScanSnapshot>> {
    Ok(serde_json::from_str(contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::GraphError;

    #[test]
    fn title_combines_ssid_and_bssid() {
        let network = NetworkObservation::new("home", "aa:bb", 6, -40, WiFiBand::Ghz2);
        assert_eq!(network.title(), "home (aa:bb)");

        let hidden = NetworkObservation::new("", "cc:dd", 6, -40, WiFiBand::Ghz2);
        assert_eq!(hidden.title(), "*hidden* (cc:dd)");
    }

    #[test]
    fn from_frequency_resolves_band_and_channel() {
        let network = NetworkObservation::from_frequency("lab", "01", 5200, -70).unwrap();
        assert_eq!(network.band, WiFiBand::Ghz5);
        assert_eq!(network.channel, 40);
        assert!(NetworkObservation::from_frequency("lab", "01", 100, -70).is_none());
    }

    #[test]
    fn networks_in_filters_band_and_sorts_by_channel() {
        let snapshot = ScanSnapshot::new(vec![
            NetworkObservation::new("c", "3", 11, -60, WiFiBand::Ghz2),
            NetworkObservation::new("x", "9", 36, -60, WiFiBand::Ghz5),
            NetworkObservation::new("a", "1", 1, -60, WiFiBand::Ghz2),
            NetworkObservation::new("b", "2", 6, -60, WiFiBand::Ghz2),
        ]);

        let channels: Vec<i32> = snapshot
            .networks_in(WiFiBand::Ghz2)
            .iter()
            .map(|network| network.channel)
            .collect();
        assert_eq!(channels, vec![1, 6, 11]);
        assert_eq!(snapshot.networks_in(WiFiBand::Ghz5).len(), 1);
    }

    #[test]
    fn detected_connection_picks_flagged_network() {
        let snapshot = ScanSnapshot::with_detected_connection(vec![
            NetworkObservation::new("a", "1", 1, -60, WiFiBand::Ghz2),
            NetworkObservation::new("b", "2", 6, -50, WiFiBand::Ghz2).with_connected(true),
        ]);
        assert_eq!(snapshot.connection().map(|c| c.ssid.as_str()), Some("b"));
    }

    #[test]
    fn snapshot_json_accepts_missing_connection() {
        let json = r#"{"networks":[{"ssid":"a","bssid":"1","channel":6,"level":-50,"band":"2.4GHz"}]}"#;
        let snapshot = ScanSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.networks.len(), 1);
        assert!(!snapshot.networks[0].connected);
        assert!(snapshot.connection().is_none());
    }

    #[test]
    fn malformed_snapshots_surface_decode_error() {
        assert!(matches!(load_snapshots("[{"), Err(GraphError::Decode(_))));
    }
}
