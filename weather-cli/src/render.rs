use chrono::{DateTime, Local, Utc};
use weather_core::{Condition, LookupError, WeatherSnapshot};

pub const LOADING: &str = "Loading...";

fn icon(condition: Condition) -> &'static str {
    match condition {
        Condition::Clear => "☀",
        Condition::Rain => "🌧",
        Condition::Clouds => "☁",
        Condition::Snow => "❄",
        Condition::Thunderstorm => "⚡",
        Condition::Other => "🌡",
    }
}

/// Plain-text weather card.
pub fn card(snapshot: &WeatherSnapshot, received_at: DateTime<Utc>) -> String {
    let updated = received_at.with_timezone(&Local).format("%H:%M");

    format!(
        "{place}\n\
         {icon} {temp}°C  {condition}\n\
         Wind {wind} km/h | Humidity {humidity}%\n\
         updated {updated}",
        place = snapshot.place(),
        icon = icon(snapshot.condition()),
        temp = snapshot.temperature_celsius(),
        condition = snapshot.condition().as_str().to_uppercase(),
        wind = snapshot.wind_kph(),
        humidity = snapshot.humidity_percent(),
    )
}

pub fn error_message(err: &LookupError) -> String {
    match err {
        LookupError::NotFound => "City not found".to_string(),
        LookupError::PermissionDenied => "Location access denied".to_string(),
        LookupError::Unsupported => "Location is not available on this system".to_string(),
        LookupError::NetworkFailure(reason) => format!("Could not reach the weather service: {reason}"),
        LookupError::InvalidQuery(reason) => format!("Invalid query: {reason}"),
    }
}
