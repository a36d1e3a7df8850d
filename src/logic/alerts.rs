use crate::models::{
    Alert, AlertType, DeforestationSummary, StatusLabel, SubScore, WeatherConditions,
};
use chrono::{DateTime, Utc};

const DEFORESTATION_ALERT_LIMIT: u32 = 5;
const CRITICAL_HEAT_C: f64 = 38.0;
const HEAT_WARNING_C: f64 = 35.0;
const LOW_HUMIDITY_PCT: f64 = 30.0;

/// Collects alerts for one response and numbers them in order.
///
/// IDs are `{category}-{n}` with `n` counting from 1, so they are unique
/// within a response regardless of how fast alerts are produced.
struct AlertLog {
    timestamp: DateTime<Utc>,
    alerts: Vec<Alert>,
}

impl AlertLog {
    fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            alerts: Vec::new(),
        }
    }

    fn push(&mut self, category: &str, alert_type: AlertType, message: String) {
        let id = format!("{}-{}", category, self.alerts.len() + 1);
        self.alerts.push(Alert {
            id,
            alert_type,
            message,
            timestamp: self.timestamp,
        });
    }

    fn finish(mut self) -> Vec<Alert> {
        if self.alerts.is_empty() {
            self.push(
                "normal",
                AlertType::Info,
                "All environmental indicators are within normal ranges".to_string(),
            );
        }
        self.alerts
    }
}

/// Derive user-facing alerts from raw upstream data and the health breakdown.
///
/// Never returns an empty list.
pub fn generate_alerts(
    deforestation: &DeforestationSummary,
    weather: &WeatherConditions,
    breakdown: &[SubScore],
    timestamp: DateTime<Utc>,
) -> Vec<Alert> {
    let mut log = AlertLog::new(timestamp);

    if deforestation.recent_alerts > DEFORESTATION_ALERT_LIMIT {
        log.push(
            "deforestation",
            AlertType::Critical,
            format!(
                "{} deforestation alerts detected nearby in the last {} days",
                deforestation.recent_alerts, deforestation.lookback_days
            ),
        );
    }

    if weather.temperature_c > CRITICAL_HEAT_C {
        log.push(
            "temperature",
            AlertType::Critical,
            format!(
                "Extreme heat: {:.1}°C. Protect saplings and postpone planting",
                weather.temperature_c
            ),
        );
    } else if weather.temperature_c > HEAT_WARNING_C {
        log.push(
            "temperature",
            AlertType::Warning,
            format!(
                "High temperature: {:.1}°C. Increase watering frequency",
                weather.temperature_c
            ),
        );
    }

    if weather.humidity_pct < LOW_HUMIDITY_PCT {
        log.push(
            "humidity",
            AlertType::Warning,
            format!(
                "Low humidity: {:.0}%. Elevated fire and desiccation risk",
                weather.humidity_pct
            ),
        );
    }

    for sub in breakdown.iter().filter(|s| s.status == StatusLabel::Poor) {
        log.push(
            sub.metric.as_str(),
            AlertType::Warning,
            format!(
                "{} is poor (score {:.0}/100)",
                sub.metric.label(),
                sub.score
            ),
        );
    }

    log.finish()
}
