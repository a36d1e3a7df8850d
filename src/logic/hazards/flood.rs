use super::{HazardModel, HazardScore, RiskInputs};
use crate::models::RiskType;

/// Flood severity from rainfall intensity and soil saturation.
///
/// Conditions:
/// - rainfall > 50 mm: +45, 25-50 mm: +25
/// - humidity > 85% while rainfall > 10 mm: +20
/// - moisture > 80%: +25, 65-80%: +10
pub struct FloodModel;

impl HazardModel for FloodModel {
    fn risk_type(&self) -> RiskType {
        RiskType::Flood
    }

    fn score(&self, inputs: &RiskInputs) -> HazardScore {
        let mut score = HazardScore::default();

        if inputs.rainfall_mm > 50.0 {
            score.add(45.0, "heavy rainfall");
        } else if inputs.rainfall_mm > 25.0 {
            score.add(25.0, "moderate to heavy rainfall");
        }

        if inputs.humidity_pct > 85.0 && inputs.rainfall_mm > 10.0 {
            score.add(20.0, "saturated conditions");
        }

        if inputs.moisture_pct > 80.0 {
            score.add(25.0, "waterlogged soil");
        } else if inputs.moisture_pct > 65.0 {
            score.add(10.0, "elevated soil moisture");
        }

        score
    }
}
