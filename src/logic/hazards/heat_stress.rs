use super::{HazardModel, HazardScore, RiskInputs};
use crate::models::RiskType;

/// Heat stress severity for vegetation and planting work.
///
/// Conditions:
/// - Air temperature above 35°C, in three bands
/// - Dry heat (above 32°C with humidity under 40%) adds on top of the band
///
/// Points:
/// - >42°C: 60
/// - 38-42°C: 40
/// - 35-38°C: 25
/// - dry heat: +20
pub struct HeatStressModel;

impl HazardModel for HeatStressModel {
    fn risk_type(&self) -> RiskType {
        RiskType::HeatStress
    }

    fn score(&self, inputs: &RiskInputs) -> HazardScore {
        let mut score = HazardScore::default();
        let temp = inputs.temperature_c;

        if temp > 42.0 {
            score.add(60.0, "extreme heat wave conditions");
        } else if temp > 38.0 {
            score.add(40.0, "severe heat");
        } else if temp > 35.0 {
            score.add(25.0, "high temperatures");
        }

        // Low humidity raises transpiration demand at the same temperature
        if temp > 32.0 && inputs.humidity_pct < 40.0 {
            score.add(20.0, "dry heat stress");
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(temp: f64, humidity: f64) -> RiskInputs {
        RiskInputs {
            temperature_c: temp,
            humidity_pct: humidity,
            rainfall_mm: 0.0,
            ndvi: 0.5,
            moisture_pct: 50.0,
        }
    }

    #[test]
    fn mild_weather_has_no_heat_stress() {
        assert_eq!(HeatStressModel.score(&inputs(25.0, 20.0)).probability, 0.0);
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(HeatStressModel.score(&inputs(43.0, 60.0)).probability, 60.0);
        assert_eq!(HeatStressModel.score(&inputs(42.0, 60.0)).probability, 40.0);
        assert_eq!(HeatStressModel.score(&inputs(38.0, 60.0)).probability, 25.0);
        assert_eq!(HeatStressModel.score(&inputs(35.0, 60.0)).probability, 0.0);
    }

    #[test]
    fn dry_heat_adds_on_top() {
        let score = HeatStressModel.score(&inputs(40.0, 25.0));
        assert_eq!(score.probability, 60.0);
        assert_eq!(score.description(), "Severe heat, dry heat stress");

        // Dry heat alone below the first band
        let score = HeatStressModel.score(&inputs(33.0, 30.0));
        assert_eq!(score.probability, 20.0);
    }

    #[test]
    fn monotonic_as_temperature_rises() {
        let mut previous = 0.0;
        for temp in [30.0, 33.0, 36.0, 39.0, 43.0, 48.0] {
            let p = HeatStressModel.score(&inputs(temp, 35.0)).probability;
            assert!(p >= previous, "dropped at {}°C", temp);
            previous = p;
        }
    }
}
