use crate::prelude::DataPoint;
use crate::scan::band::BandConfig;

/// Y value meaning "no measurable signal", in dBm.
pub const FLOOR: i32 = -100;

/// Builds plot geometry for channel curves.
pub struct CurveGeometry;

impl CurveGeometry {
    /// Flat-topped trapezoid centred on `channel`, `spread` channels wide on
    /// each side, resting on [`FLOOR`].
    pub fn curve_points(channel: i32, level: i32, spread: i32) -> [DataPoint; 5] {
        let half = spread / 2;
        [
            DataPoint::new(channel - spread, FLOOR),
            DataPoint::new(channel - half, level),
            DataPoint::new(channel, level),
            DataPoint::new(channel + half, level),
            DataPoint::new(channel + spread, FLOOR),
        ]
    }

    /// Invisible floor line pinning the X extents of the band.
    pub fn baseline_points(band: &BandConfig, even_only: bool) -> [DataPoint; 2] {
        let min_x = band.first_channel - band.spread;
        let mut max_x = band.last_channel + band.spread;
        if even_only && max_x % 2 != 0 {
            max_x += 1;
        }
        [DataPoint::new(min_x, FLOOR), DataPoint::new(max_x, FLOOR)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_points_form_trapezoid_around_channel() {
        let points = CurveGeometry::curve_points(6, -50, 2);
        assert_eq!(
            points,
            [
                DataPoint::new(4, FLOOR),
                DataPoint::new(5, -50),
                DataPoint::new(6, -50),
                DataPoint::new(7, -50),
                DataPoint::new(8, FLOOR),
            ]
        );
    }

    #[test]
    fn curve_points_are_monotonic_with_floor_edges() {
        for channel in [-3, 1, 14, 36, 165] {
            for level in [-99, -70, -30, 0] {
                for spread in [0, 1, 2, 3, 4, 7] {
                    let points = CurveGeometry::curve_points(channel, level, spread);
                    assert!(points.windows(2).all(|pair| pair[0].x <= pair[1].x));
                    assert_eq!(points[0].y, FLOOR);
                    assert_eq!(points[4].y, FLOOR);
                    assert!(points[1..4].iter().all(|point| point.y == level));
                }
            }
        }
    }

    #[test]
    fn odd_spread_truncates_half_offsets() {
        let points = CurveGeometry::curve_points(10, -60, 3);
        assert_eq!(points[1].x, 9);
        assert_eq!(points[3].x, 11);
        assert_eq!(points[0].x, 7);
        assert_eq!(points[4].x, 13);
    }

    #[test]
    fn baseline_rounds_upper_bound_only_for_even_labels() {
        let band = BandConfig {
            first_channel: 1,
            last_channel: 13,
            spread: 2,
        };
        assert_eq!(
            CurveGeometry::baseline_points(&band, false),
            [DataPoint::new(-1, FLOOR), DataPoint::new(15, FLOOR)]
        );
        assert_eq!(
            CurveGeometry::baseline_points(&band, true),
            [DataPoint::new(-1, FLOOR), DataPoint::new(16, FLOOR)]
        );
    }
}
