use super::risk::RiskAssessment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecommendation {
    pub name: String,
    pub scientific_name: String,
    pub reason: String,
    pub suitability_pct: u8,
}

impl SpeciesRecommendation {
    pub fn new(name: &str, scientific_name: &str, reason: &str, suitability_pct: u8) -> Self {
        Self {
            name: name.to_string(),
            scientific_name: scientific_name.to_string(),
            reason: reason.to_string(),
            suitability_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "short-term")]
    ShortTerm,
    #[serde(rename = "long-term")]
    LongTerm,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Immediate => "immediate",
            Priority::ShortTerm => "short-term",
            Priority::LongTerm => "long-term",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionCategory {
    Irrigation,
    Soil,
    Planting,
    Protection,
}

impl SolutionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolutionCategory::Irrigation => "irrigation",
            SolutionCategory::Soil => "soil",
            SolutionCategory::Planting => "planting",
            SolutionCategory::Protection => "protection",
        }
    }
}

impl std::fmt::Display for SolutionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: SolutionCategory,
}

impl Solution {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        category: SolutionCategory,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            category,
        }
    }
}

/// Species shortlist plus mitigation actions for a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub species: Vec<SpeciesRecommendation>,
    pub solutions: Vec<Solution>,
}

/// The `risk_advisory` block of a monitoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdvisory {
    pub risks: Vec<RiskAssessment>,
    #[serde(rename = "recommendedSpecies")]
    pub recommended_species: Vec<SpeciesRecommendation>,
    pub solutions: Vec<Solution>,
}

impl RiskAdvisory {
    pub fn new(risks: Vec<RiskAssessment>, advisory: Advisory) -> Self {
        Self {
            risks,
            recommended_species: advisory.species,
            solutions: advisory.solutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_serializes_hyphenated() {
        assert_eq!(
            serde_json::to_string(&Priority::ShortTerm).unwrap(),
            "\"short-term\""
        );
        assert_eq!(
            serde_json::to_string(&Priority::LongTerm).unwrap(),
            "\"long-term\""
        );
        assert_eq!(Priority::Immediate.as_str(), "immediate");
    }

    #[test]
    fn priority_orders_most_urgent_first() {
        assert!(Priority::Immediate < Priority::ShortTerm);
        assert!(Priority::ShortTerm < Priority::LongTerm);
    }

    #[test]
    fn risk_advisory_uses_client_field_names() {
        let advisory = RiskAdvisory::new(
            Vec::new(),
            Advisory {
                species: vec![SpeciesRecommendation::new("Neem", "Azadirachta indica", "", 95)],
                solutions: Vec::new(),
            },
        );
        let json = serde_json::to_value(&advisory).unwrap();
        assert_eq!(json["recommendedSpecies"][0]["name"], "Neem");
        assert!(json["solutions"].as_array().unwrap().is_empty());
    }
}
