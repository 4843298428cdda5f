use serde::{Deserialize, Serialize};

/// One forecast time slot, flattened from the upstream weather elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    pub start_time: String,
    pub end_time: String,
    pub weather: String,
    pub rain: String,
    pub min_temp: String,
    pub max_temp: String,
    pub comfort: String,
    /// Only present for routes that report wind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<String>,
}

/// The simplified forecast returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub city: String,
    pub update_time: String,
    pub forecasts: Vec<ForecastEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<String>,
}

impl WeatherResponse {
    pub fn with_sun_times(mut self, sun: SunTimes) -> Self {
        self.sunrise = Some(sun.sunrise);
        self.sunset = Some(sun.sunset);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}

/// Which optional fields a forecast route reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastFields {
    Basic,
    WithWind,
}

// Upstream CWA payloads. Only the fields we read are modelled; everything else is ignored.

/// `F-C0032-001`: 36-hour forecast by location name.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    pub records: ForecastRecords,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecords {
    #[serde(default)]
    pub dataset_description: String,
    #[serde(default)]
    pub location: Vec<ForecastLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastLocation {
    pub location_name: String,
    #[serde(default)]
    pub weather_element: Vec<WeatherElement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherElement {
    pub element_name: String,
    #[serde(default)]
    pub time: Vec<ElementTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTime {
    pub start_time: String,
    pub end_time: String,
    pub parameter: ElementParameter,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementParameter {
    pub parameter_name: String,
}

/// `A-B0062-001`: sunrise and sunset by county name.
#[derive(Debug, Clone, Deserialize)]
pub struct SunPayload {
    pub records: SunRecords,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunRecords {
    pub locations: SunLocations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunLocations {
    #[serde(default)]
    pub location: Vec<SunLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunLocation {
    #[serde(default)]
    pub time: Vec<SunDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunDay {
    #[serde(rename = "SunRiseTime")]
    pub sunrise_time: String,
    #[serde(rename = "SunSetTime")]
    pub sunset_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_speed_is_omitted_when_not_reported() {
        let entry = ForecastEntry { weather: "晴天".into(), ..Default::default() };
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("windSpeed").is_none());
        assert_eq!(json["weather"], "晴天");
        assert_eq!(json["minTemp"], "");
    }

    #[test]
    fn sun_times_are_serialized_only_when_set() {
        let resp = WeatherResponse {
            city: "臺北市".into(),
            update_time: "三十六小時天氣預報".into(),
            forecasts: vec![],
            sunrise: None,
            sunset: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("sunrise").is_none());
        assert_eq!(json["updateTime"], "三十六小時天氣預報");

        let json = serde_json::to_value(resp.with_sun_times(SunTimes {
            sunrise: "05:30".into(),
            sunset: "18:10".into(),
        }))
        .unwrap();
        assert_eq!(json["sunrise"], "05:30");
        assert_eq!(json["sunset"], "18:10");
    }
}
