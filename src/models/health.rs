use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    Vegetation,
    Moisture,
    Temperature,
    AirQuality,
    ForestCover,
    SoilHealth,
}

impl MetricName {
    /// Scoring order. Every breakdown lists metrics in this order.
    pub const ALL: [MetricName; 6] = [
        MetricName::Vegetation,
        MetricName::Moisture,
        MetricName::Temperature,
        MetricName::AirQuality,
        MetricName::ForestCover,
        MetricName::SoilHealth,
    ];

    pub fn weight(&self) -> f64 {
        match self {
            MetricName::Vegetation => 0.25,
            MetricName::Moisture => 0.20,
            MetricName::Temperature => 0.15,
            MetricName::AirQuality => 0.10,
            MetricName::ForestCover => 0.20,
            MetricName::SoilHealth => 0.10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Vegetation => "vegetation",
            MetricName::Moisture => "moisture",
            MetricName::Temperature => "temperature",
            MetricName::AirQuality => "air_quality",
            MetricName::ForestCover => "forest_cover",
            MetricName::SoilHealth => "soil_health",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricName::Vegetation => "Vegetation health (NDVI)",
            MetricName::Moisture => "Moisture index",
            MetricName::Temperature => "Temperature",
            MetricName::AirQuality => "Air quality",
            MetricName::ForestCover => "Forest cover",
            MetricName::SoilHealth => "Soil health (pH)",
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    Good,
    Moderate,
    Poor,
}

impl StatusLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            StatusLabel::Good
        } else if score >= 40.0 {
            StatusLabel::Moderate
        } else {
            StatusLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Good => "good",
            StatusLabel::Moderate => "moderate",
            StatusLabel::Poor => "poor",
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub metric: MetricName,
    pub raw_value: f64,
    pub score: f64,
    pub weighted_contribution: f64,
    pub status: StatusLabel,
}

impl SubScore {
    pub fn new(metric: MetricName, raw_value: f64, score: f64) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            metric,
            raw_value,
            score,
            weighted_contribution: score * metric.weight(),
            status: StatusLabel::from_score(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub total: f64,
    pub breakdown: Vec<SubScore>,
}

impl HealthScore {
    pub fn status(&self) -> StatusLabel {
        StatusLabel::from_score(self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub metric: MetricName,
    pub label: String,
    pub weight: f64,
}

/// Human-readable account of how the health score is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCalculation {
    pub formula: String,
    pub weights: Vec<WeightEntry>,
    pub description: String,
}

impl HealthCalculation {
    pub fn describe() -> Self {
        let terms: Vec<String> = MetricName::ALL
            .iter()
            .map(|m| format!("{} × {:.2}", m.as_str(), m.weight()))
            .collect();

        let weights = MetricName::ALL
            .iter()
            .map(|m| WeightEntry {
                metric: *m,
                label: m.label().to_string(),
                weight: m.weight(),
            })
            .collect();

        Self {
            formula: format!("health_score = {}", terms.join(" + ")),
            weights,
            description: "Each indicator is normalized to a 0-100 sub-score using fixed \
                          agronomic bands (NDVI, moisture index, air temperature, AQI, forest \
                          cover against the 33% national target, and soil pH). Sub-scores of \
                          70 or more are rated good, 40 or more moderate, and the rest poor. \
                          The overall score is the weighted sum of the sub-scores."
                .to_string(),
        }
    }
}
