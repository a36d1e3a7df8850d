use crate::config::OpenWeatherMapConfig;
use crate::error::{HabitatError, Result};
use crate::models::{Coordinates, WeatherConditions};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    three_hour: Option<f64>,
}

impl OwmPrecipitation {
    fn amount_mm(&self) -> f64 {
        self.one_hour.or(self.three_hour).unwrap_or(0.0)
    }
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionResponse {
    list: Vec<OwmAirPollutionItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionItem {
    components: OwmComponents,
}

#[derive(Debug, Deserialize)]
struct OwmComponents {
    pm2_5: f64,
}

impl OpenWeatherMapClient {
    pub fn new(client: reqwest::Client, config: OpenWeatherMapConfig) -> Self {
        Self { client, config }
    }

    /// Fetch current conditions in metric units
    pub async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherConditions> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, coords.lat, coords.lng, self.config.api_key
        );

        let owm: OwmCurrentResponse = self.get_json(&url).await?;
        Ok(convert_current(owm))
    }

    /// Fetch current PM2.5 and convert it to a US AQI value
    pub async fn fetch_air_quality(&self, coords: Coordinates) -> Result<f64> {
        let url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            API_BASE_URL, coords.lat, coords.lng, self.config.api_key
        );

        let owm: OwmAirPollutionResponse = self.get_json(&url).await?;
        let item = owm.list.first().ok_or_else(|| {
            HabitatError::DataSourceUnavailable(
                "OpenWeatherMap returned no air quality data".into(),
            )
        })?;

        Ok(pm25_to_us_aqi(item.components.pm2_5))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/weather?lat=0&lon=0&appid={}",
            API_BASE_URL, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                HabitatError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response =
            self.client.get(url).send().await.map_err(|e| {
                HabitatError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HabitatError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            HabitatError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }
}

fn convert_current(owm: OwmCurrentResponse) -> WeatherConditions {
    let rain_mm = owm.rain.as_ref().map(|r| r.amount_mm()).unwrap_or(0.0);

    WeatherConditions {
        temperature_c: owm.main.temp,
        humidity_pct: owm.main.humidity,
        rainfall_mm: rain_mm,
        wind_speed_ms: owm.wind.map(|w| w.speed).unwrap_or(0.0),
        description: owm
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default(),
    }
}

/// EPA PM2.5 breakpoints (2024 revision): (C_low, C_high, I_low, I_high).
const PM25_BREAKPOINTS: [(f64, f64, f64, f64); 6] = [
    (0.0, 9.0, 0.0, 50.0),
    (9.1, 35.4, 51.0, 100.0),
    (35.5, 55.4, 101.0, 150.0),
    (55.5, 125.4, 151.0, 200.0),
    (125.5, 225.4, 201.0, 300.0),
    (225.5, 325.4, 301.0, 500.0),
];

/// Convert a 24h-style PM2.5 concentration (µg/m³) to the US AQI scale.
pub fn pm25_to_us_aqi(pm25: f64) -> f64 {
    // EPA truncates to one decimal before lookup
    let c = (pm25.max(0.0) * 10.0).floor() / 10.0;

    PM25_BREAKPOINTS
        .iter()
        .find(|(lo, hi, _, _)| c >= *lo && c <= *hi)
        .map(|(c_lo, c_hi, i_lo, i_hi)| {
            ((i_hi - i_lo) / (c_hi - c_lo) * (c - c_lo) + i_lo).round()
        })
        .unwrap_or(500.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_weather_with_rain() {
        let json = r#"{
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain"}],
            "main": {"temp": 29.4, "feels_like": 33.0, "humidity": 84},
            "wind": {"speed": 4.1},
            "rain": {"1h": 3.2}
        }"#;
        let owm: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        let weather = convert_current(owm);

        assert_eq!(weather.temperature_c, 29.4);
        assert_eq!(weather.humidity_pct, 84.0);
        assert!((weather.rainfall_mm - 3.2).abs() < 0.001);
        assert_eq!(weather.description, "moderate rain");
    }

    #[test]
    fn dry_weather_has_zero_rainfall() {
        let json = r#"{"main": {"temp": 41.0, "humidity": 18}}"#;
        let owm: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        let weather = convert_current(owm);
        assert_eq!(weather.rainfall_mm, 0.0);
        assert_eq!(weather.wind_speed_ms, 0.0);
    }

    #[test]
    fn three_hour_rain_used_when_no_hourly() {
        let json = r#"{"main": {"temp": 25.0, "humidity": 90}, "rain": {"3h": 12.5}}"#;
        let owm: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        assert!((convert_current(owm).rainfall_mm - 12.5).abs() < 0.001);
    }

    #[test]
    fn snowfall_is_not_rainfall() {
        let json = r#"{"main": {"temp": -2.0, "humidity": 95}, "snow": {"1h": 2.0}}"#;
        let owm: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(convert_current(owm).rainfall_mm, 0.0);
    }

    #[test]
    fn pm25_conversion_known_values() {
        assert_eq!(pm25_to_us_aqi(0.0), 0.0);
        assert_eq!(pm25_to_us_aqi(9.0), 50.0);
        assert_eq!(pm25_to_us_aqi(35.4), 100.0);
        assert_eq!(pm25_to_us_aqi(55.5), 151.0);
        assert_eq!(pm25_to_us_aqi(400.0), 500.0);
    }

    #[test]
    fn pm25_conversion_is_monotonic() {
        let mut previous = 0.0;
        for step in 0..400 {
            let aqi = pm25_to_us_aqi(step as f64);
            assert!(aqi >= previous);
            previous = aqi;
        }
    }

    #[test]
    fn parses_air_pollution() {
        let json = r#"{"coord": {"lon": 77.2, "lat": 28.6},
            "list": [{"main": {"aqi": 4}, "components": {"pm2_5": 62.3}, "dt": 1}]}"#;
        let owm: OwmAirPollutionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(owm.list[0].components.pm2_5, 62.3);
    }
}
