//! Reshapes the CWA 36-hour forecast into a flat list of time slots.

use crate::{
    WeatherError,
    model::{ForecastEntry, ForecastFields, ForecastLocation, ForecastPayload, WeatherResponse},
};

/// Build the simplified response for `city` from an upstream forecast payload.
///
/// Returns [`WeatherError::LocationNotFound`] when the upstream has no record for the city.
pub fn build_response(
    payload: ForecastPayload,
    city: &str,
    fields: ForecastFields,
) -> Result<WeatherResponse, WeatherError> {
    let records = payload.records;
    let location = records
        .location
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::LocationNotFound { city: city.to_string() })?;

    let forecasts = forecast_entries(&location, fields);

    Ok(WeatherResponse {
        city: location.location_name,
        update_time: records.dataset_description,
        forecasts,
        sunrise: None,
        sunset: None,
    })
}

/// One entry per time slot of the first element.
fn forecast_entries(location: &ForecastLocation, fields: ForecastFields) -> Vec<ForecastEntry> {
    let elements = &location.weather_element;
    let Some(first) = elements.first() else {
        return Vec::new();
    };

    first
        .time
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let mut entry = ForecastEntry {
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                wind_speed: match fields {
                    ForecastFields::WithWind => Some(String::new()),
                    ForecastFields::Basic => None,
                },
                ..Default::default()
            };

            for element in elements {
                // Elements shorter than the first one simply don't contribute to later slots.
                if let Some(value) = element.time.get(i) {
                    apply_element(&mut entry, &element.element_name, &value.parameter.parameter_name);
                }
            }

            entry
        })
        .collect()
}

fn apply_element(entry: &mut ForecastEntry, name: &str, value: &str) {
    match name {
        "Wx" => entry.weather = value.to_string(),
        "PoP" => entry.rain = format!("{value}%"),
        "MinT" => entry.min_temp = format!("{value}°C"),
        "MaxT" => entry.max_temp = format!("{value}°C"),
        "CI" => entry.comfort = value.to_string(),
        "WS" => {
            if let Some(wind) = entry.wind_speed.as_mut() {
                *wind = value.to_string();
            }
        }
        _ => {}
    }
}
