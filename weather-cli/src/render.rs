use chrono::DateTime;
use serde_json::Value;
use weather_core::WeatherPayload;

pub fn json(payload: &WeatherPayload) -> serde_json::Result<String> {
    serde_json::to_string_pretty(payload)
}

/// One-line summary from the OpenWeatherMap fields we know about.
///
/// Missing fields are left out. A payload with none of them is printed as
/// compact JSON.
pub fn summary(payload: &WeatherPayload) -> String {
    let v = payload.as_value();

    let place = v["name"].as_str().filter(|s| !s.is_empty()).map(|name| {
        match v["sys"]["country"].as_str() {
            Some(country) => format!("{name}, {country}"),
            None => name.to_string(),
        }
    });

    let mut details = Vec::new();

    if let Some(temp) = v["main"]["temp"].as_f64() {
        match v["main"]["feels_like"].as_f64() {
            Some(feels) => details.push(format!("{temp:.1}°F (feels like {feels:.1}°F)")),
            None => details.push(format!("{temp:.1}°F")),
        }
    }
    if let Some(description) = first_description(v) {
        details.push(description.to_string());
    }
    if let Some(humidity) = v["main"]["humidity"].as_f64() {
        details.push(format!("humidity {humidity:.0}%"));
    }
    if let Some(speed) = v["wind"]["speed"].as_f64() {
        details.push(format!("wind {speed:.1} mph"));
    }
    if let Some(observed) = v["dt"]
        .as_i64()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
    {
        details.push(format!("observed {}", observed.format("%Y-%m-%d %H:%M UTC")));
    }

    match (place, details.is_empty()) {
        (Some(place), true) => place,
        (Some(place), false) => format!("{place}: {}", details.join(", ")),
        (None, false) => details.join(", "),
        (None, true) => v.to_string(),
    }
}

fn first_description(v: &Value) -> Option<&str> {
    v["weather"].as_array()?.first()?["description"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_payload_summary() {
        let payload = WeatherPayload::from(json!({
            "name": "Boston",
            "sys": {"country": "US"},
            "main": {"temp": 48.3, "feels_like": 44.0, "humidity": 71},
            "weather": [{"description": "light rain"}],
            "wind": {"speed": 12.66},
            "dt": 1700000000
        }));

        assert_eq!(
            summary(&payload),
            "Boston, US: 48.3°F (feels like 44.0°F), light rain, humidity 71%, \
             wind 12.7 mph, observed 2023-11-14 22:13 UTC"
        );
    }

    #[test]
    fn missing_fields_are_skipped() {
        let payload = WeatherPayload::from(json!({
            "name": "Tokyo",
            "main": {"temp": 60.0}
        }));

        assert_eq!(summary(&payload), "Tokyo: 60.0°F");
    }

    #[test]
    fn unknown_payload_falls_back_to_json() {
        let payload = WeatherPayload::from(json!({"cod": "404"}));

        assert_eq!(summary(&payload), r#"{"cod":"404"}"#);
    }

    #[test]
    fn json_output_is_the_payload() {
        let value = json!({"name": "Paris", "extra": [1, 2, 3]});
        let payload = WeatherPayload::from(value.clone());

        let printed = json(&payload).unwrap();
        let parsed: Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(parsed, value);
    }
}
