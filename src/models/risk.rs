use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    Drought,
    Flood,
    HeatStress,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::Drought => "drought",
            RiskType::Flood => "flood",
            RiskType::HeatStress => "heat_stress",
        }
    }
}

impl std::fmt::Display for RiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 70.0 {
            RiskLevel::Critical
        } else if probability > 50.0 {
            RiskLevel::High
        } else if probability > 30.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of one hazard at a site.
///
/// `probability` is an additive rule-based severity index bounded to 0-100.
/// It is not a calibrated statistical probability and carries no
/// meteorological meaning beyond ranking how many stress factors are present.
/// The name is kept because clients already read this field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(rename = "type")]
    pub risk_type: RiskType,
    pub probability: f64,
    pub level: RiskLevel,
    pub description: String,
}

impl RiskAssessment {
    /// Probabilities at or below this are not surfaced to users.
    pub const REPORTING_THRESHOLD: f64 = 20.0;

    pub fn new(risk_type: RiskType, probability: f64, description: impl Into<String>) -> Self {
        let probability = probability.clamp(0.0, 100.0);
        Self {
            risk_type,
            probability,
            level: RiskLevel::from_probability(probability),
            description: description.into(),
        }
    }

    pub fn is_reportable(&self) -> bool {
        self.probability > Self::REPORTING_THRESHOLD
    }
}
