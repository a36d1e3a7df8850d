use crate::config::GlobalForestWatchConfig;
use crate::error::{HabitatError, Result};
use crate::models::{Coordinates, DeforestationSummary};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

const API_BASE_URL: &str = "https://data-api.globalforestwatch.org";
const ALERTS_DATASET: &str = "gfw_integrated_alerts";
/// Half-width of the query box in degrees (roughly 5 km at the equator).
const SEARCH_RADIUS_DEG: f64 = 0.05;

pub struct GlobalForestWatchClient {
    client: reqwest::Client,
    config: GlobalForestWatchConfig,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    data: Vec<AlertRow>,
}

#[derive(Debug, Deserialize)]
struct AlertRow {
    #[serde(default)]
    alert_count: Option<u32>,
    #[serde(default)]
    area_ha: Option<f64>,
}

impl GlobalForestWatchClient {
    pub fn new(client: reqwest::Client, config: GlobalForestWatchConfig) -> Self {
        Self { client, config }
    }

    /// Count integrated deforestation alerts around a point over the lookback window
    pub async fn fetch_summary(&self, coords: Coordinates) -> Result<DeforestationSummary> {
        let lookback = chrono::Duration::days(self.config.lookback_days as i64);
        let since = Utc::now().date_naive() - lookback;
        let url = format!("{}/dataset/{}/latest/query/json", API_BASE_URL, ALERTS_DATASET);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&query_body(coords, since))
            .send()
            .await
            .map_err(|e| {
                HabitatError::DataSourceUnavailable(format!("Global Forest Watch: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HabitatError::DataSourceUnavailable(format!(
                "Global Forest Watch returned {}: {}",
                status, body
            )));
        }

        let body: QueryResponse = response.json().await.map_err(|e| {
            HabitatError::DataSourceUnavailable(format!(
                "Failed to parse Global Forest Watch response: {}",
                e
            ))
        })?;

        Ok(summarize(body, self.config.lookback_days))
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/dataset/{}", API_BASE_URL, ALERTS_DATASET);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                HabitatError::DataSourceUnavailable(format!("Global Forest Watch: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

fn query_body(coords: Coordinates, since: NaiveDate) -> serde_json::Value {
    let (west, east) = (coords.lng - SEARCH_RADIUS_DEG, coords.lng + SEARCH_RADIUS_DEG);
    let (south, north) = (coords.lat - SEARCH_RADIUS_DEG, coords.lat + SEARCH_RADIUS_DEG);

    json!({
        "sql": format!(
            "SELECT COUNT(*) AS alert_count, SUM(area__ha) AS area_ha FROM results \
             WHERE gfw_integrated_alerts__date >= '{}'",
            since.format("%Y-%m-%d")
        ),
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [west, south],
                [east, south],
                [east, north],
                [west, north],
                [west, south]
            ]]
        }
    })
}

fn summarize(body: QueryResponse, lookback_days: u32) -> DeforestationSummary {
    let row = body.data.into_iter().next();

    DeforestationSummary {
        recent_alerts: row.as_ref().and_then(|r| r.alert_count).unwrap_or(0),
        alert_area_ha: row.and_then(|r| r.area_ha).unwrap_or(0.0),
        forest_cover_pct: DeforestationSummary::DEFAULT_FOREST_COVER_PCT,
        lookback_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_box_surrounds_point() {
        let coords = Coordinates::new(21.0, 79.0).unwrap();
        let since = NaiveDate::from_ymd_opt(2026, 9, 16).unwrap();
        let body = query_body(coords, since);

        assert!(body["sql"].as_str().unwrap().contains("'2026-09-16'"));
        let ring = body["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
        assert!((ring[0][0].as_f64().unwrap() - 78.95).abs() < 1e-9);
        assert!((ring[2][1].as_f64().unwrap() - 21.05).abs() < 1e-9);
    }

    #[test]
    fn summarizes_alert_rows() {
        let json = r#"{"data": [{"alert_count": 14, "area_ha": 3.75}], "status": "success"}"#;
        let body: QueryResponse = serde_json::from_str(json).unwrap();
        let summary = summarize(body, 30);

        assert_eq!(summary.recent_alerts, 14);
        assert_eq!(summary.alert_area_ha, 3.75);
        assert_eq!(summary.lookback_days, 30);
    }

    #[test]
    fn empty_result_means_no_alerts() {
        let json = r#"{"data": [{"alert_count": 0, "area_ha": null}], "status": "success"}"#;
        let body: QueryResponse = serde_json::from_str(json).unwrap();
        let summary = summarize(body, 30);
        assert_eq!(summary.recent_alerts, 0);
        assert_eq!(summary.alert_area_ha, 0.0);

        let body: QueryResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert_eq!(summarize(body, 7).recent_alerts, 0);
    }
}
