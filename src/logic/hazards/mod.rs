pub mod drought;
pub mod engine;
pub mod flood;
pub mod heat_stress;

pub use engine::RiskEstimator;

use crate::models::{EnvironmentalReading, RiskType};

/// The subset of a reading the hazard models look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub ndvi: f64,
    pub moisture_pct: f64,
}

impl From<&EnvironmentalReading> for RiskInputs {
    fn from(reading: &EnvironmentalReading) -> Self {
        Self {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
            rainfall_mm: reading.rainfall_mm,
            ndvi: reading.ndvi,
            moisture_pct: reading.moisture_index_pct,
        }
    }
}

/// Additive severity with the phrases for each factor that fired.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardScore {
    pub probability: f64,
    pub factors: Vec<&'static str>,
}

impl HazardScore {
    pub const CAP: f64 = 100.0;

    pub fn add(&mut self, points: f64, factor: &'static str) {
        self.probability = (self.probability + points).min(Self::CAP);
        if !factor.is_empty() {
            self.factors.push(factor);
        }
    }

    /// Factor phrases joined for display, or "Normal conditions".
    pub fn description(&self) -> String {
        if self.factors.is_empty() {
            return "Normal conditions".to_string();
        }
        let joined = self.factors.join(", ");
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => joined,
        }
    }
}

/// Trait for hazard severity models
pub trait HazardModel: Send + Sync {
    fn risk_type(&self) -> RiskType;

    /// Score the hazard. Must be total over finite inputs.
    fn score(&self, inputs: &RiskInputs) -> HazardScore;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_caps_at_one_hundred() {
        let mut score = HazardScore::default();
        score.add(60.0, "a");
        score.add(60.0, "b");
        assert_eq!(score.probability, 100.0);
        assert_eq!(score.factors, vec!["a", "b"]);
    }

    #[test]
    fn description_capitalizes_and_joins() {
        let mut score = HazardScore::default();
        assert_eq!(score.description(), "Normal conditions");

        score.add(35.0, "very low precipitation");
        score.add(30.0, "extreme heat");
        assert_eq!(score.description(), "Very low precipitation, extreme heat");
    }
}
