use std::collections::BTreeSet;

use crate::graph::axis::AxisConfig;
use crate::graph::registry::{SeriesRegistry, Upsert};
use crate::graph::settings::GraphSettings;
use crate::prelude::{ChartDrawable, GraphResult};
use crate::scan::band::{BandConfig, WiFiBand};
use crate::scan::observation::{NetworkObservation, ScanSnapshot};
use crate::telemetry::{LogManager, UpdateCounts, UpdateMetrics};

/// Axis behaviour chosen when a view is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphViewOptions {
    pub scrollable: bool,
    pub even_only: bool,
}

/// Live channel graph for a single band.
///
/// Owns its chart and the identity-to-curve registry for the whole view
/// lifetime. Each [`update`](Self::update) reconciles the chart against one
/// scan snapshot.
pub struct ChannelGraphView<C: ChartDrawable> {
    band: WiFiBand,
    settings: GraphSettings,
    chart: C,
    registry: SeriesRegistry,
    logger: LogManager,
    metrics: UpdateMetrics,
}

#[derive(Default)]
struct CycleTally {
    created: usize,
    updated: usize,
}

impl<C: ChartDrawable> ChannelGraphView<C> {
    pub fn new(
        band: WiFiBand,
        config: BandConfig,
        options: GraphViewOptions,
        settings: GraphSettings,
        mut chart: C,
    ) -> GraphResult<Self> {
        chart.configure_axes(&AxisConfig::for_band(
            &config,
            options.scrollable,
            options.even_only,
        ))?;
        Ok(Self {
            band,
            settings,
            chart,
            registry: SeriesRegistry::new(config, options.even_only),
            logger: LogManager::new(band.name()),
            metrics: UpdateMetrics::new(),
        })
    }

    /// 2.4 GHz view: fixed axis, every channel labelled.
    pub fn two(chart: C, settings: GraphSettings) -> GraphResult<Self> {
        Self::new(
            WiFiBand::Ghz2,
            WiFiBand::Ghz2.config(),
            GraphViewOptions {
                scrollable: false,
                even_only: false,
            },
            settings,
            chart,
        )
    }

    /// 5 GHz view: scrollable axis, even channels labelled.
    pub fn five(chart: C, settings: GraphSettings) -> GraphResult<Self> {
        Self::new(
            WiFiBand::Ghz5,
            WiFiBand::Ghz5.config(),
            GraphViewOptions {
                scrollable: true,
                even_only: true,
            },
            settings,
            chart,
        )
    }

    pub fn for_band(band: WiFiBand, chart: C, settings: GraphSettings) -> GraphResult<Self> {
        match band {
            WiFiBand::Ghz2 => Self::two(chart, settings),
            WiFiBand::Ghz5 => Self::five(chart, settings),
        }
    }

    pub fn update(&mut self, snapshot: &ScanSnapshot) -> GraphResult<()> {
        let mut touched = BTreeSet::new();
        let mut tally = CycleTally::default();

        let connection = snapshot
            .connection()
            .filter(|connection| connection.band == self.band)
            .map(|connection| connection.clone().with_connected(true));
        if let Some(connection) = &connection {
            self.track(connection, &mut touched, &mut tally)?;
        }

        self.registry.ensure_baseline(&mut self.chart)?;

        let connection_key = connection.as_ref().map(NetworkObservation::title);
        for network in snapshot.networks_in(self.band) {
            if network.connected || connection_key.as_deref() == Some(network.title().as_str()) {
                continue;
            }
            self.track(network, &mut touched, &mut tally)?;
        }

        let removed = self.registry.reconcile(&mut self.chart, &touched)?;

        self.chart
            .update_legend(self.settings.legend, &self.registry.legend_entries())?;
        let visible = self
            .settings
            .visibility
            .is_visible(self.band, !touched.is_empty());
        self.chart.set_visible(visible)?;

        self.metrics.record_cycle(tally.created, tally.updated, removed);
        self.logger.record(&format!(
            "cycle: {} curves ({} new, {} moved, {} dropped), visible={}",
            self.registry.len(),
            tally.created,
            tally.updated,
            removed,
            visible
        ));
        Ok(())
    }

    fn track(
        &mut self,
        network: &NetworkObservation,
        touched: &mut BTreeSet<String>,
        tally: &mut CycleTally,
    ) -> GraphResult<()> {
        match self.registry.upsert(&mut self.chart, network)? {
            Upsert::Created => tally.created += 1,
            Upsert::Updated => tally.updated += 1,
        }
        touched.insert(network.title());
        self.logger.detail(&format!(
            "{} at channel {} / {} dBm",
            network.title(),
            network.channel,
            network.level
        ));
        Ok(())
    }

    /// Replaces the legend and visibility preferences; applied on the next update.
    pub fn set_settings(&mut self, settings: GraphSettings) {
        self.settings = settings;
    }

    pub fn band(&self) -> WiFiBand {
        self.band
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    pub fn counts(&self) -> UpdateCounts {
        self.metrics.snapshot()
    }
}
