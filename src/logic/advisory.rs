use crate::models::{
    Advisory, Priority, RiskAssessment, RiskType, SoilProfile, Solution, SolutionCategory,
    SpeciesRecommendation, WeatherConditions,
};

pub const MAX_SPECIES: usize = 5;
pub const MAX_SOLUTIONS: usize = 6;

/// Risk probability above which a species group is recommended.
const SPECIES_TRIGGER: f64 = 40.0;
/// Risk probability above which mitigation actions are recommended.
const SOLUTION_TRIGGER: f64 = 30.0;
/// Risk probability above which the first actions of a group become urgent.
const URGENT_TRIGGER: f64 = 60.0;
const HEAT_TOLERANT_TEMP_C: f64 = 35.0;
const LOW_SOIL_MOISTURE_PCT: f64 = 35.0;

/// Build the species shortlist and mitigation plan for a site.
///
/// `risks` is the reported list from `RiskEstimator::estimate`; every trigger
/// here sits above the reporting threshold, so withheld hazards never matter. A
/// hazard missing from the list counts as probability 0.
pub fn compose_advisory(
    risks: &[RiskAssessment],
    weather: &WeatherConditions,
    soil: &SoilProfile,
) -> Advisory {
    Advisory {
        species: recommend_species(risks, weather),
        solutions: recommend_solutions(risks, soil),
    }
}

fn probability_of(risks: &[RiskAssessment], risk_type: RiskType) -> f64 {
    risks
        .iter()
        .filter(|r| r.risk_type == risk_type)
        .map(|r| r.probability)
        .fold(0.0, f64::max)
}

pub fn recommend_species(
    risks: &[RiskAssessment],
    weather: &WeatherConditions,
) -> Vec<SpeciesRecommendation> {
    let mut species = Vec::new();

    if probability_of(risks, RiskType::Drought) > SPECIES_TRIGGER {
        species.extend(drought_tolerant());
    }
    if probability_of(risks, RiskType::Flood) > SPECIES_TRIGGER {
        species.extend(flood_tolerant());
    }
    if weather.temperature_c > HEAT_TOLERANT_TEMP_C {
        species.extend(heat_tolerant());
    }
    if species.is_empty() {
        species.extend(general_purpose());
    }

    species.truncate(MAX_SPECIES);
    species
}

pub fn recommend_solutions(risks: &[RiskAssessment], soil: &SoilProfile) -> Vec<Solution> {
    let mut solutions = Vec::new();

    let drought = probability_of(risks, RiskType::Drought);
    if drought > SOLUTION_TRIGGER {
        let priority = urgency(drought);
        solutions.push(Solution::new(
            "Drip Irrigation",
            "Install drip lines at the root zone to cut evaporation losses by 30-50% \
             compared with flood irrigation.",
            priority,
            SolutionCategory::Irrigation,
        ));
        solutions.push(Solution::new(
            "Mulching",
            "Apply 5-8 cm of organic mulch around saplings to hold soil moisture and \
             lower soil temperature.",
            priority,
            SolutionCategory::Soil,
        ));
        solutions.push(Solution::new(
            "Rainwater Harvesting",
            "Build farm ponds or recharge pits to store monsoon runoff for the dry season.",
            Priority::LongTerm,
            SolutionCategory::Irrigation,
        ));
    }

    let flood = probability_of(risks, RiskType::Flood);
    if flood > SOLUTION_TRIGGER {
        solutions.push(Solution::new(
            "Drainage Improvement",
            "Clear and deepen field drains so standing water leaves the root zone within \
             48 hours.",
            urgency(flood),
            SolutionCategory::Protection,
        ));
        solutions.push(Solution::new(
            "Raised-Mound Planting",
            "Plant saplings on raised mounds or ridges to keep roots above waterlogged soil.",
            Priority::ShortTerm,
            SolutionCategory::Planting,
        ));
    }

    let heat = probability_of(risks, RiskType::HeatStress);
    if heat > SOLUTION_TRIGGER {
        solutions.push(Solution::new(
            "Shade Nets",
            "Cover young plants with 35-50% shade nets during peak afternoon heat.",
            urgency(heat),
            SolutionCategory::Protection,
        ));
        solutions.push(Solution::new(
            "Evening Watering",
            "Shift irrigation to late evening or early morning to reduce evaporation.",
            Priority::ShortTerm,
            SolutionCategory::Irrigation,
        ));
    }

    if soil.moisture_pct < LOW_SOIL_MOISTURE_PCT {
        solutions.push(Solution::new(
            "Organic Matter Addition",
            "Work compost or green manure into the topsoil to raise its water-holding capacity.",
            Priority::LongTerm,
            SolutionCategory::Soil,
        ));
    }

    if solutions.is_empty() {
        solutions.push(Solution::new(
            "Regular Monitoring",
            "Conditions are stable. Keep tracking vegetation and moisture indicators monthly.",
            Priority::LongTerm,
            SolutionCategory::Protection,
        ));
    }

    solutions.truncate(MAX_SOLUTIONS);
    solutions
}

fn urgency(probability: f64) -> Priority {
    if probability > URGENT_TRIGGER {
        Priority::Immediate
    } else {
        Priority::ShortTerm
    }
}

fn drought_tolerant() -> [SpeciesRecommendation; 3] {
    [
        SpeciesRecommendation::new(
            "Neem",
            "Azadirachta indica",
            "Deep taproot survives long dry spells and poor soils",
            95,
        ),
        SpeciesRecommendation::new(
            "Khejri",
            "Prosopis cineraria",
            "Native to arid zones and fixes nitrogen in sandy soil",
            92,
        ),
        SpeciesRecommendation::new(
            "Babul",
            "Vachellia nilotica",
            "Tolerates drought, heat and saline soil",
            88,
        ),
    ]
}

fn flood_tolerant() -> [SpeciesRecommendation; 3] {
    [
        SpeciesRecommendation::new(
            "Arjun",
            "Terminalia arjuna",
            "Riverbank species that withstands seasonal inundation",
            90,
        ),
        SpeciesRecommendation::new(
            "Jamun",
            "Syzygium cumini",
            "Tolerates waterlogging and stabilizes wet soils",
            88,
        ),
        SpeciesRecommendation::new(
            "Bamboo",
            "Bambusa vulgaris",
            "Dense root mat binds soil against flood erosion",
            85,
        ),
    ]
}

fn heat_tolerant() -> [SpeciesRecommendation; 2] {
    [
        SpeciesRecommendation::new(
            "Peepal",
            "Ficus religiosa",
            "Keeps a full canopy through extreme summer heat",
            87,
        ),
        SpeciesRecommendation::new(
            "Banyan",
            "Ficus benghalensis",
            "Broad canopy cools the surrounding microclimate",
            85,
        ),
    ]
}

fn general_purpose() -> [SpeciesRecommendation; 3] {
    [
        SpeciesRecommendation::new(
            "Mango",
            "Mangifera indica",
            "Well suited to stable tropical conditions",
            85,
        ),
        SpeciesRecommendation::new(
            "Sheesham",
            "Dalbergia sissoo",
            "Fast-growing native hardwood that improves soil",
            82,
        ),
        SpeciesRecommendation::new(
            "Amla",
            "Phyllanthus emblica",
            "Hardy fruit tree for mixed plantations",
            80,
        ),
    ]
}
