use anyhow::{bail, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wifigraph::scan::{NetworkObservation, ScanSnapshot};

use crate::generator::template::{
    bssid_for, frequency_for, ssid_for, CHANNELS_2GHZ, CHANNELS_5GHZ,
};

/// Configuration for generating synthetic scan results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub networks: usize,
    /// Fraction of the roster placed on 5 GHz.
    pub five_ghz_share: f64,
    pub min_level: i32,
    pub max_level: i32,
    /// Maximum per-tick level change, in dB.
    pub jitter: i32,
    /// Probability that a non-connected network is missing from a tick.
    pub dropout: f64,
    /// Whether the first roster entry is the connected network.
    pub connected: bool,
    pub seed: u64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            networks: 12,
            five_ghz_share: 0.35,
            min_level: -95,
            max_level: -30,
            jitter: 3,
            dropout: 0.1,
            connected: true,
            seed: 0,
            description: None,
            scenario: None,
        }
    }
}

struct RosterEntry {
    ssid: String,
    bssid: String,
    frequency: u32,
    base_level: i32,
}

/// Seeded source of scan snapshots over a fixed roster of networks.
pub struct ScanGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    roster: Vec<RosterEntry>,
}

impl ScanGenerator {
    pub fn new(config: GeneratorConfig) -> anyhow::Result<Self> {
        if config.min_level >= config.max_level {
            bail!(
                "level range is empty: min {} >= max {}",
                config.min_level,
                config.max_level
            );
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let share = config.five_ghz_share.clamp(0.0, 1.0);
        let roster = (0..config.networks)
            .map(|index| {
                let channels: &[i32] = if rng.gen_bool(share) {
                    &CHANNELS_5GHZ
                } else {
                    &CHANNELS_2GHZ
                };
                let channel = channels[rng.gen_range(0..channels.len())];
                RosterEntry {
                    ssid: ssid_for(index),
                    bssid: bssid_for(config.seed, index),
                    frequency: frequency_for(channel),
                    base_level: rng.gen_range(config.min_level..=config.max_level),
                }
            })
            .collect();

        Ok(Self {
            config,
            rng,
            roster,
        })
    }

    /// Produces the next tick of scan results.
    pub fn next_snapshot(&mut self) -> anyhow::Result<ScanSnapshot> {
        let dropout = self.config.dropout.clamp(0.0, 1.0);
        let jitter = self.config.jitter.abs();
        let mut networks = Vec::with_capacity(self.roster.len());

        for (index, entry) in self.roster.iter_mut().enumerate() {
            let connected = self.config.connected && index == 0;
            if !connected && self.rng.gen_bool(dropout) {
                continue;
            }

            let drift = self.rng.gen_range(-jitter..=jitter);
            entry.base_level =
                (entry.base_level + drift).clamp(self.config.min_level, self.config.max_level);

            let network = NetworkObservation::from_frequency(
                entry.ssid.clone(),
                entry.bssid.clone(),
                entry.frequency,
                entry.base_level,
            )
            .with_context(|| format!("frequency {} outside known bands", entry.frequency))?
            .with_connected(connected);
            networks.push(network);
        }

        Ok(ScanSnapshot::with_detected_connection(networks))
    }
}

/// One-shot snapshot for a configuration.
pub fn build_snapshot_from_config(config: &GeneratorConfig) -> anyhow::Result<ScanSnapshot> {
    ScanGenerator::new(config.clone())?.next_snapshot()
}

pub fn build_snapshot(networks: usize, seed: u64) -> anyhow::Result<ScanSnapshot> {
    let config = GeneratorConfig {
        networks,
        seed,
        ..Default::default()
    };
    build_snapshot_from_config(&config)
}
