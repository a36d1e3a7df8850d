use super::{
    drought::DroughtModel, flood::FloodModel, heat_stress::HeatStressModel, HazardModel,
    RiskInputs,
};
use crate::models::RiskAssessment;

pub struct RiskEstimator {
    models: Vec<Box<dyn HazardModel>>,
}

impl RiskEstimator {
    pub fn new() -> Self {
        let models: Vec<Box<dyn HazardModel>> = vec![
            Box::new(DroughtModel),
            Box::new(FloodModel),
            Box::new(HeatStressModel),
        ];

        Self { models }
    }

    /// Assessments for every hazard, including those below the reporting threshold.
    fn assess_all(&self, inputs: &RiskInputs) -> Vec<RiskAssessment> {
        self.models
            .iter()
            .map(|model| {
                let score = model.score(inputs);
                RiskAssessment::new(model.risk_type(), score.probability, score.description())
            })
            .collect()
    }

    /// Assessments whose probability exceeds the reporting threshold.
    pub fn estimate(&self, inputs: &RiskInputs) -> Vec<RiskAssessment> {
        self.assess_all(inputs)
            .into_iter()
            .filter(RiskAssessment::is_reportable)
            .collect()
    }
}

impl Default for RiskEstimator {
    fn default() -> Self {
        Self::new()
    }
}
