use crate::models::{EnvironmentalReading, MetricName, SubScore};

/// Convert a reading into the six 0-100 sub-scores, in `MetricName::ALL` order.
///
/// Every rule is a fixed band or piecewise-linear table. Out-of-range input is
/// never rejected; it falls into the lowest band and the result is clamped.
pub fn normalize(reading: &EnvironmentalReading) -> [SubScore; 6] {
    MetricName::ALL.map(|metric| {
        let raw = raw_value(reading, metric);
        SubScore::new(metric, raw, score_metric(metric, raw))
    })
}

pub fn raw_value(reading: &EnvironmentalReading, metric: MetricName) -> f64 {
    match metric {
        MetricName::Vegetation => reading.ndvi,
        MetricName::Moisture => reading.moisture_index_pct,
        MetricName::Temperature => reading.temperature_c,
        MetricName::AirQuality => reading.aqi,
        MetricName::ForestCover => reading.forest_cover_pct,
        MetricName::SoilHealth => reading.soil_ph,
    }
}

pub fn score_metric(metric: MetricName, raw: f64) -> f64 {
    let score = match metric {
        MetricName::Vegetation => score_vegetation(raw),
        MetricName::Moisture => score_moisture(raw),
        MetricName::Temperature => score_temperature(raw),
        MetricName::AirQuality => score_air_quality(raw),
        MetricName::ForestCover => score_forest_cover(raw),
        MetricName::SoilHealth => score_soil_ph(raw),
    };
    score.clamp(0.0, 100.0)
}

pub fn score_vegetation(ndvi: f64) -> f64 {
    if ndvi >= 0.6 {
        100.0
    } else if ndvi >= 0.4 {
        70.0 + (ndvi - 0.4) * 150.0
    } else {
        ndvi * 175.0
    }
}

pub fn score_moisture(pct: f64) -> f64 {
    banded(pct, &[(40.0, 60.0, 100.0), (25.0, 75.0, 75.0), (15.0, 85.0, 50.0)], 25.0)
}

pub fn score_temperature(celsius: f64) -> f64 {
    banded(celsius, &[(20.0, 30.0, 100.0), (15.0, 35.0, 75.0), (10.0, 40.0, 50.0)], 25.0)
}

/// Lower AQI is better.
pub fn score_air_quality(aqi: f64) -> f64 {
    if aqi <= 50.0 {
        100.0
    } else if aqi <= 100.0 {
        80.0
    } else if aqi <= 150.0 {
        50.0
    } else {
        25.0
    }
}

/// 33% is the national forest cover target; meeting it scores 60.
pub fn score_forest_cover(pct: f64) -> f64 {
    if pct >= 33.0 {
        60.0 + (pct - 33.0) * 0.6
    } else {
        pct * 1.8
    }
}

pub fn score_soil_ph(ph: f64) -> f64 {
    banded(ph, &[(6.0, 7.5, 100.0), (5.5, 8.0, 70.0)], 40.0)
}

/// First inclusive `(low, high, score)` band containing `value`, else `otherwise`.
fn banded(value: f64, bands: &[(f64, f64, f64)], otherwise: f64) -> f64 {
    bands
        .iter()
        .find(|(low, high, _)| (*low..=*high).contains(&value))
        .map(|(_, _, score)| *score)
        .unwrap_or(otherwise)
}
