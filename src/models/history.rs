use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the display-only trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub ndvi: f64,
    pub moisture_index: f64,
    pub temperature: f64,
    pub health_score: f64,
}
