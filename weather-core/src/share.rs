use serde::Deserialize;

/// Query parameters of the share endpoint. Empty values count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareRequest {
    pub city: Option<String>,
    pub weather: Option<String>,
    pub temperature: Option<String>,
}

impl ShareRequest {
    /// Format the share sentence, or return the names of the missing parameters.
    pub fn share_text(&self) -> Result<String, Vec<&'static str>> {
        match (present(&self.city), present(&self.weather), present(&self.temperature)) {
            (Some(city), Some(weather), Some(temperature)) => {
                Ok(format!("目前在 {city} 的天氣是 {weather}，氣溫 {temperature}。快來看看吧！"))
            }
            _ => Err(self.missing()),
        }
    }

    pub fn missing(&self) -> Vec<&'static str> {
        [("city", &self.city), ("weather", &self.weather), ("temperature", &self.temperature)]
            .into_iter()
            .filter(|(_, value)| present(value).is_none())
            .map(|(name, _)| name)
            .collect()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(city: Option<&str>, weather: Option<&str>, temperature: Option<&str>) -> ShareRequest {
        ShareRequest {
            city: city.map(Into::into),
            weather: weather.map(Into::into),
            temperature: temperature.map(Into::into),
        }
    }

    #[test]
    fn formats_sentence_with_values_verbatim() {
        let text = request(Some("臺南市"), Some("晴時多雲"), Some("28°C")).share_text().unwrap();

        assert_eq!(text, "目前在 臺南市 的天氣是 晴時多雲，氣溫 28°C。快來看看吧！");
    }

    #[test]
    fn reports_each_missing_parameter() {
        let missing = request(Some("臺南市"), None, Some("")).share_text().unwrap_err();
        assert_eq!(missing, vec!["weather", "temperature"]);

        let missing = ShareRequest::default().share_text().unwrap_err();
        assert_eq!(missing, vec!["city", "weather", "temperature"]);
    }
}
