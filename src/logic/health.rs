use crate::models::{HealthScore, SubScore};

/// Combine sub-scores into the weighted 0-100 site health score.
///
/// `total` is the sum of weighted contributions, rounded to two decimals and
/// clamped to [0, 100].
pub fn aggregate(subscores: &[SubScore]) -> HealthScore {
    let sum: f64 = subscores.iter().map(|s| s.weighted_contribution).sum();

    HealthScore {
        total: round2(sum).clamp(0.0, 100.0),
        breakdown: subscores.to_vec(),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::normalizer::normalize;
    use crate::models::{EnvironmentalReading, HealthCalculation, MetricName};

    fn reading_with_ndvi(ndvi: f64) -> EnvironmentalReading {
        EnvironmentalReading {
            ndvi,
            moisture_index_pct: 50.0,
            temperature_c: 25.0,
            aqi: 30.0,
            forest_cover_pct: 100.0,
            soil_ph: 7.0,
            humidity_pct: 60.0,
            rainfall_mm: 10.0,
        }
    }

    #[test]
    fn total_is_weighted_sum() {
        let health = aggregate(&normalize(&reading_with_ndvi(0.6)));
        assert_eq!(health.total, 100.0);
        assert_eq!(health.breakdown.len(), 6);

        let health = aggregate(&normalize(&reading_with_ndvi(0.2)));
        // 35 × 0.25 + 75 (remaining at 100)
        assert!((health.total - 83.75).abs() < 0.001);
    }

    #[test]
    fn total_rounds_to_two_decimals() {
        let subscores = [
            SubScore::new(MetricName::Vegetation, 0.0, 33.333),
            SubScore::new(MetricName::Moisture, 0.0, 0.0),
        ];
        let health = aggregate(&subscores);
        assert_eq!(health.total, 8.33);
    }

    #[test]
    fn total_stays_in_range_for_extremes() {
        let extremes = [
            (-1.0, 0.0, -40.0, 500.0, 0.0, 2.0),
            (1.0, 100.0, 60.0, 0.0, 100.0, 14.0),
            (0.35, 10.0, 5.0, 151.0, 12.0, 5.0),
        ];
        for (ndvi, moisture, temp, aqi, cover, ph) in extremes {
            let reading = EnvironmentalReading {
                ndvi,
                moisture_index_pct: moisture,
                temperature_c: temp,
                aqi,
                forest_cover_pct: cover,
                soil_ph: ph,
                humidity_pct: 50.0,
                rainfall_mm: 0.0,
            };
            let total = aggregate(&normalize(&reading)).total;
            assert!((0.0..=100.0).contains(&total), "total {} out of range", total);
        }
    }

    #[test]
    fn total_non_decreasing_in_ndvi() {
        let mut previous = f64::MIN;
        for step in -10..=10 {
            let ndvi = step as f64 / 10.0;
            let total = aggregate(&normalize(&reading_with_ndvi(ndvi))).total;
            assert!(total >= previous, "total dropped at ndvi {}", ndvi);
            previous = total;
        }
    }

    #[test]
    fn ndvi_threshold_is_a_step() {
        let below = aggregate(&normalize(&reading_with_ndvi(0.599))).total;
        let at = aggregate(&normalize(&reading_with_ndvi(0.6))).total;
        assert!(at > below);
        assert_eq!(at, 100.0);
    }

    #[test]
    fn calculation_lists_all_weights() {
        let calc = HealthCalculation::describe();
        assert_eq!(calc.weights.len(), 6);
        assert!(calc.formula.contains("vegetation × 0.25"));
        assert!(calc.formula.contains("soil_health × 0.10"));
        let sum: f64 = calc.weights.iter().map(|w| w.weight).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}
