use crate::{
    WeatherError, WeatherProvider,
    model::{SunPayload, SunTimes},
};

/// Value reported for sunrise and sunset when they can't be fetched.
pub const UNKNOWN_SUN_TIME: &str = "未知";

impl SunTimes {
    pub fn unknown() -> Self {
        Self { sunrise: UNKNOWN_SUN_TIME.to_string(), sunset: UNKNOWN_SUN_TIME.to_string() }
    }
}

/// Fetch today's sunrise and sunset for `county`.
///
/// Never fails: any upstream or decoding problem is logged and replaced by
/// [`SunTimes::unknown`].
pub async fn sun_times_or_unknown(provider: &dyn WeatherProvider, county: &str) -> SunTimes {
    let result = provider.sun_times(county).await.and_then(first_day);

    match result {
        Ok(times) => times,
        Err(err) => {
            tracing::warn!(county, error = %err, "Failed to fetch sunrise/sunset, using fallback");
            SunTimes::unknown()
        }
    }
}

/// Sunrise and sunset of the first day of the first location.
pub fn first_day(payload: SunPayload) -> Result<SunTimes, WeatherError> {
    let day = payload
        .records
        .locations
        .location
        .into_iter()
        .next()
        .and_then(|loc| loc.time.into_iter().next())
        .ok_or_else(|| WeatherError::Parse("sunrise/sunset response contained no days".into()))?;

    Ok(SunTimes { sunrise: day.sunrise_time, sunset: day.sunset_time })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForecastPayload;
    use async_trait::async_trait;
    use serde_json::json;

    #[derive(Debug)]
    struct StubProvider {
        sun: Option<serde_json::Value>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn forecast(&self, _location: &str) -> Result<ForecastPayload, WeatherError> {
            Err(WeatherError::Parse("not used".into()))
        }

        async fn sun_times(&self, _county: &str) -> Result<SunPayload, WeatherError> {
            match &self.sun {
                Some(v) => serde_json::from_value(v.clone())
                    .map_err(|e| WeatherError::Parse(e.to_string())),
                None => Err(WeatherError::upstream(
                    reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    "down",
                )),
            }
        }
    }

    #[tokio::test]
    async fn returns_first_day_times() {
        let provider = StubProvider {
            sun: Some(json!({
                "records": { "locations": { "location": [{ "time": [
                    { "SunRiseTime": "05:41", "SunSetTime": "17:22" },
                    { "SunRiseTime": "05:42", "SunSetTime": "17:21" }
                ]}]}}
            })),
        };

        let times = sun_times_or_unknown(&provider, "臺北市").await;
        assert_eq!(times, SunTimes { sunrise: "05:41".into(), sunset: "17:22".into() });
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_to_unknown() {
        let provider = StubProvider { sun: None };

        let times = sun_times_or_unknown(&provider, "臺北市").await;
        assert_eq!(times, SunTimes::unknown());
    }

    #[tokio::test]
    async fn empty_location_list_falls_back_to_unknown() {
        let provider = StubProvider {
            sun: Some(json!({ "records": { "locations": { "location": [] } } })),
        };

        let times = sun_times_or_unknown(&provider, "臺北市").await;
        assert_eq!(times.sunrise, UNKNOWN_SUN_TIME);
        assert_eq!(times.sunset, UNKNOWN_SUN_TIME);
    }

    #[tokio::test]
    async fn malformed_payload_falls_back_to_unknown() {
        let provider = StubProvider { sun: Some(json!({ "records": {} })) };

        assert_eq!(sun_times_or_unknown(&provider, "臺北市").await, SunTimes::unknown());
    }
}
