use super::{HazardModel, HazardScore, RiskInputs};
use crate::models::RiskType;

/// Drought severity from precipitation, heat, dryness of air and soil, and canopy stress.
///
/// | factor                 | points |
/// |------------------------|--------|
/// | rainfall < 2 mm        | 35     |
/// | rainfall 2-5 mm        | 20     |
/// | temp > 38 °C           | 30     |
/// | temp 33-38 °C          | 20     |
/// | humidity < 30%         | 25     |
/// | humidity 30-45%        | 15     |
/// | moisture < 25%         | 20     |
/// | moisture 25-40%        | 10     |
/// | NDVI < 0.3             | 15     |
pub struct DroughtModel;

impl HazardModel for DroughtModel {
    fn risk_type(&self) -> RiskType {
        RiskType::Drought
    }

    fn score(&self, inputs: &RiskInputs) -> HazardScore {
        let mut score = HazardScore::default();

        if inputs.rainfall_mm < 2.0 {
            score.add(35.0, "very low precipitation");
        } else if inputs.rainfall_mm < 5.0 {
            score.add(20.0, "low precipitation");
        }

        if inputs.temperature_c > 38.0 {
            score.add(30.0, "extreme heat");
        } else if inputs.temperature_c > 33.0 {
            score.add(20.0, "high temperatures");
        }

        if inputs.humidity_pct < 30.0 {
            score.add(25.0, "very low humidity");
        } else if inputs.humidity_pct < 45.0 {
            score.add(15.0, "low humidity");
        }

        if inputs.moisture_pct < 25.0 {
            score.add(20.0, "soil moisture deficit");
        } else if inputs.moisture_pct < 40.0 {
            score.add(10.0, "below-optimal soil moisture");
        }

        if inputs.ndvi < 0.3 {
            score.add(15.0, "vegetation stress detected");
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(temp: f64, humidity: f64, rainfall: f64, ndvi: f64, moisture: f64) -> RiskInputs {
        RiskInputs {
            temperature_c: temp,
            humidity_pct: humidity,
            rainfall_mm: rainfall,
            ndvi,
            moisture_pct: moisture,
        }
    }

    #[test]
    fn mild_wet_conditions_score_zero() {
        let score = DroughtModel.score(&inputs(25.0, 70.0, 10.0, 0.6, 50.0));
        assert_eq!(score.probability, 0.0);
        assert_eq!(score.description(), "Normal conditions");
    }

    #[test]
    fn severe_drought_caps() {
        let score = DroughtModel.score(&inputs(40.0, 25.0, 1.0, 0.2, 20.0));
        assert_eq!(score.probability, 100.0);
        assert_eq!(score.factors.len(), 5);
        assert!(score.description().starts_with("Very low precipitation"));
    }

    #[test]
    fn rainfall_bands() {
        let base = |rain| DroughtModel.score(&inputs(25.0, 70.0, rain, 0.6, 50.0)).probability;
        assert_eq!(base(1.0), 35.0);
        assert_eq!(base(2.0), 20.0);
        assert_eq!(base(4.9), 20.0);
        assert_eq!(base(5.0), 0.0);
    }

    #[test]
    fn monotonic_as_rainfall_drops() {
        let at = |rain| DroughtModel.score(&inputs(30.0, 50.0, rain, 0.5, 45.0)).probability;
        assert!(at(1.0) >= at(3.0));
        assert!(at(3.0) >= at(8.0));
    }

    #[test]
    fn monotonic_as_heat_rises() {
        let at = |temp| DroughtModel.score(&inputs(temp, 50.0, 8.0, 0.5, 45.0)).probability;
        assert!(at(39.0) >= at(35.0));
        assert!(at(35.0) >= at(30.0));
    }

    #[test]
    fn moisture_partial_band_has_phrase() {
        let score = DroughtModel.score(&inputs(25.0, 70.0, 10.0, 0.6, 30.0));
        assert_eq!(score.probability, 10.0);
        assert_eq!(score.description(), "Below-optimal soil moisture");
    }
}
