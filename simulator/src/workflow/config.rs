use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wifigraph::graph::GraphSettings;
use wifigraph::scan::WiFiBand;

use crate::generator::profile::GeneratorConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub ticks: usize,
    pub bands: Vec<WiFiBand>,
    pub graph: GraphSettings,
    pub generator: GeneratorConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            ticks: 10,
            bands: WiFiBand::ALL.to_vec(),
            graph: GraphSettings::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Builds a config from CLI values. An empty `bands` keeps both bands.
    pub fn from_args(ticks: usize, networks: usize, seed: u64, bands: &[WiFiBand]) -> Self {
        let bands = if bands.is_empty() {
            WiFiBand::ALL.to_vec()
        } else {
            let mut selected = Vec::new();
            for band in bands {
                if !selected.contains(band) {
                    selected.push(*band);
                }
            }
            selected
        };
        Self {
            ticks,
            bands,
            generator: GeneratorConfig {
                networks,
                seed,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
