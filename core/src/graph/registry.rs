use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::graph::geometry::CurveGeometry;
use crate::graph::palette::{ColorPalette, GraphColor};
use crate::prelude::{ChartDrawable, DataPoint, GraphResult, LegendEntry, SeriesId, SeriesStyle};
use crate::scan::band::BandConfig;
use crate::scan::observation::NetworkObservation;

pub const CONNECTED_THICKNESS: u32 = 6;
pub const THICKNESS: u32 = 2;

/// A network's curve as attached to the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub id: SeriesId,
    pub points: [DataPoint; 5],
    pub style: SeriesStyle,
}

/// What an upsert did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Identity-keyed curves of one view, plus its baseline.
pub struct SeriesRegistry {
    band: BandConfig,
    even_only: bool,
    curves: BTreeMap<String, Curve>,
    baseline: Option<SeriesId>,
    palette: ColorPalette,
    next_id: u64,
}

impl SeriesRegistry {
    pub fn new(band: BandConfig, even_only: bool) -> Self {
        Self {
            band,
            even_only,
            curves: BTreeMap::new(),
            baseline: None,
            palette: ColorPalette::new(),
            next_id: 0,
        }
    }

    fn peek_id(&self) -> SeriesId {
        SeriesId(self.next_id)
    }

    /// Attaches a curve for a new identity, or swaps the geometry of an
    /// existing one. The style of an existing curve is never touched.
    pub fn upsert<C: ChartDrawable + ?Sized>(
        &mut self,
        chart: &mut C,
        observation: &NetworkObservation,
    ) -> GraphResult<Upsert> {
        let key = observation.title();
        let points =
            CurveGeometry::curve_points(observation.channel, observation.level, self.band.spread);

        if let Some(curve) = self.curves.get_mut(&key) {
            chart.reset_data(curve.id, &points)?;
            curve.points = points;
            return Ok(Upsert::Updated);
        }

        // Id and colour are only consumed once the chart accepted the series.
        let style = self.style_for(observation, &key);
        let id = self.peek_id();
        chart.add_series(id, &points, &style)?;
        self.next_id += 1;
        if !observation.connected {
            self.palette.advance();
        }
        debug!("attached {} for {}", id, key);
        self.curves.insert(key, Curve { id, points, style });
        Ok(Upsert::Created)
    }

    fn style_for(&self, observation: &NetworkObservation, key: &str) -> SeriesStyle {
        let (color, thickness) = if observation.connected {
            (GraphColor::CONNECTED, CONNECTED_THICKNESS)
        } else {
            (self.palette.peek_color(), THICKNESS)
        };
        SeriesStyle {
            color,
            thickness,
            draw_background: true,
            title: format!("{} {}", key, observation.channel),
        }
    }

    /// Detaches every curve whose identity is not in `touched`. Returns the
    /// number of curves removed.
    pub fn reconcile<C: ChartDrawable + ?Sized>(
        &mut self,
        chart: &mut C,
        touched: &BTreeSet<String>,
    ) -> GraphResult<usize> {
        let stale: Vec<String> = self
            .curves
            .keys()
            .filter(|key| !touched.contains(*key))
            .cloned()
            .collect();

        for key in &stale {
            if let Some(curve) = self.curves.get(key) {
                chart.remove_series(curve.id)?;
                debug!("detached {} for {}", curve.id, key);
            }
            self.curves.remove(key);
        }
        Ok(stale.len())
    }

    /// Adds the invisible extent-pinning series the first time it is called.
    pub fn ensure_baseline<C: ChartDrawable + ?Sized>(
        &mut self,
        chart: &mut C,
    ) -> GraphResult<()> {
        if self.baseline.is_some() {
            return Ok(());
        }

        let points = CurveGeometry::baseline_points(&self.band, self.even_only);
        let style = SeriesStyle {
            color: GraphColor::TRANSPARENT,
            thickness: 0,
            draw_background: false,
            title: String::new(),
        };
        let id = self.peek_id();
        chart.add_series(id, &points, &style)?;
        self.next_id += 1;
        self.baseline = Some(id);
        Ok(())
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline_id(&self) -> Option<SeriesId> {
        self.baseline
    }

    pub fn curve(&self, key: &str) -> Option<&Curve> {
        self.curves.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Legend rows for the stored curves, in identity order.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.curves
            .values()
            .map(|curve| LegendEntry {
                title: curve.style.title.clone(),
                color: curve.style.color,
                thickness: curve.style.thickness,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::geometry::FLOOR;
    use crate::graph::memory::MemoryChart;
    use crate::graph::axis::AxisConfig;
    use crate::graph::palette::PALETTE;
    use crate::graph::settings::GraphLegend;
    use crate::prelude::GraphError;
    use crate::scan::band::WiFiBand;

    /// Memory chart that refuses new series while `reject_adds` is set.
    struct FlakyChart {
        inner: MemoryChart,
        reject_adds: bool,
    }

    impl ChartDrawable for FlakyChart {
        fn configure_axes(&mut self, axes: &AxisConfig) -> GraphResult<()> {
            self.inner.configure_axes(axes)
        }

        fn add_series(
            &mut self,
            id: SeriesId,
            points: &[DataPoint],
            style: &SeriesStyle,
        ) -> GraphResult<()> {
            if self.reject_adds {
                return Err(GraphError::Backend("chart offline".to_string()));
            }
            self.inner.add_series(id, points, style)
        }

        fn reset_data(&mut self, id: SeriesId, points: &[DataPoint]) -> GraphResult<()> {
            self.inner.reset_data(id, points)
        }

        fn remove_series(&mut self, id: SeriesId) -> GraphResult<()> {
            self.inner.remove_series(id)
        }

        fn update_legend(
            &mut self,
            position: GraphLegend,
            entries: &[LegendEntry],
        ) -> GraphResult<()> {
            self.inner.update_legend(position, entries)
        }

        fn set_visible(&mut self, visible: bool) -> GraphResult<()> {
            self.inner.set_visible(visible)
        }
    }

    fn band() -> BandConfig {
        BandConfig {
            first_channel: 1,
            last_channel: 13,
            spread: 2,
        }
    }

    fn network(ssid: &str, channel: i32, level: i32) -> NetworkObservation {
        NetworkObservation::new(ssid, "00:11", channel, level, WiFiBand::Ghz2)
    }

    fn touched(keys: &[&NetworkObservation]) -> BTreeSet<String> {
        keys.iter().map(|network| network.title()).collect()
    }

    #[test]
    fn upsert_creates_then_updates_geometry_in_place() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), false);
        let first = network("a", 6, -50);

        assert_eq!(registry.upsert(&mut chart, &first).unwrap(), Upsert::Created);
        let created = registry.curve(&first.title()).unwrap().clone();
        assert_eq!(created.points[0], DataPoint::new(4, FLOOR));
        assert_eq!(created.points[2], DataPoint::new(6, -50));

        let moved = network("a", 11, -70);
        assert_eq!(registry.upsert(&mut chart, &moved).unwrap(), Upsert::Updated);
        let updated = registry.curve(&first.title()).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.style, created.style);
        assert_eq!(updated.points[2], DataPoint::new(11, -70));
        assert_eq!(
            chart.series(created.id).unwrap().points[2],
            DataPoint::new(11, -70)
        );
        assert_eq!(chart.series_count(), 1);
    }

    #[test]
    fn connected_network_uses_reserved_style_without_consuming_palette() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), false);
        let connected = network("home", 6, -40).with_connected(true);
        let other = network("cafe", 1, -80);

        registry.upsert(&mut chart, &connected).unwrap();
        registry.upsert(&mut chart, &other).unwrap();

        let home = &registry.curve(&connected.title()).unwrap().style;
        assert_eq!(home.color, GraphColor::CONNECTED);
        assert_eq!(home.thickness, CONNECTED_THICKNESS);
        assert_eq!(home.title, "home (00:11) 6");

        let cafe = &registry.curve(&other.title()).unwrap().style;
        assert_eq!(cafe.color, PALETTE[0]);
        assert_eq!(cafe.thickness, THICKNESS);
        assert!(cafe.draw_background);
    }

    #[test]
    fn connected_style_ignores_palette_position() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), false);
        for (ssid, channel) in [("a", 1), ("b", 6), ("c", 11)] {
            registry
                .upsert(&mut chart, &network(ssid, channel, -70))
                .unwrap();
        }

        let home = network("home", 3, -40).with_connected(true);
        registry.upsert(&mut chart, &home).unwrap();
        let style = &registry.curve(&home.title()).unwrap().style;
        assert_eq!(style.color, GraphColor::CONNECTED);
        assert_eq!(style.thickness, CONNECTED_THICKNESS);

        let late = network("d", 9, -75);
        registry.upsert(&mut chart, &late).unwrap();
        assert_eq!(registry.curve(&late.title()).unwrap().style.color, PALETTE[3]);
    }

    #[test]
    fn rejected_series_consumes_no_colour_or_id() {
        let mut chart = FlakyChart {
            inner: MemoryChart::new(),
            reject_adds: true,
        };
        let mut registry = SeriesRegistry::new(band(), false);
        let a = network("a", 1, -50);

        assert!(matches!(
            registry.upsert(&mut chart, &a),
            Err(GraphError::Backend(_))
        ));
        assert!(registry.ensure_baseline(&mut chart).is_err());
        assert!(registry.is_empty());
        assert!(!registry.has_baseline());

        chart.reject_adds = false;
        registry.upsert(&mut chart, &a).unwrap();
        let curve = registry.curve(&a.title()).unwrap();
        assert_eq!(curve.id, SeriesId(0));
        assert_eq!(curve.style.color, PALETTE[0]);
        assert_eq!(chart.inner.series_count(), 1);
    }

    #[test]
    fn connected_flag_flip_keeps_first_style() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), false);
        let plain = network("a", 6, -50);
        registry.upsert(&mut chart, &plain).unwrap();

        registry
            .upsert(&mut chart, &plain.clone().with_connected(true))
            .unwrap();
        assert_eq!(registry.curve(&plain.title()).unwrap().style.color, PALETTE[0]);
    }

    #[test]
    fn reconcile_leaves_exactly_touched_identities() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), false);
        let a = network("a", 1, -50);
        let b = network("b", 6, -60);
        let c = network("c", 11, -70);
        for n in [&a, &b, &c] {
            registry.upsert(&mut chart, n).unwrap();
        }

        let removed = registry.reconcile(&mut chart, &touched(&[&b])).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec![b.title().as_str()]);
        assert_eq!(chart.series_count(), 1);

        let removed = registry.reconcile(&mut chart, &BTreeSet::new()).unwrap();
        assert_eq!(removed, 1);
        assert!(registry.is_empty());
        assert_eq!(chart.series_count(), 0);
    }

    #[test]
    fn ensure_baseline_is_idempotent_and_survives_reconcile() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), true);

        registry.ensure_baseline(&mut chart).unwrap();
        registry.ensure_baseline(&mut chart).unwrap();
        assert_eq!(chart.series_count(), 1);

        registry.reconcile(&mut chart, &BTreeSet::new()).unwrap();
        let baseline = chart.series(registry.baseline_id().unwrap()).unwrap();
        assert_eq!(
            baseline.points,
            vec![DataPoint::new(-1, FLOOR), DataPoint::new(16, FLOOR)]
        );
        assert_eq!(baseline.style.thickness, 0);
        assert_eq!(baseline.style.color, GraphColor::TRANSPARENT);
        assert!(!baseline.style.draw_background);
    }

    #[test]
    fn legend_excludes_baseline() {
        let mut chart = MemoryChart::new();
        let mut registry = SeriesRegistry::new(band(), false);
        registry.ensure_baseline(&mut chart).unwrap();
        registry.upsert(&mut chart, &network("b", 6, -60)).unwrap();
        registry.upsert(&mut chart, &network("a", 1, -50)).unwrap();

        let titles: Vec<String> = registry
            .legend_entries()
            .into_iter()
            .map(|entry| entry.title)
            .collect();
        assert_eq!(titles, vec!["a (00:11) 1", "b (00:11) 6"]);
    }
}
