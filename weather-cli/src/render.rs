use chrono::{DateTime, FixedOffset};
use weather_core::WeatherSnapshot;

pub fn loading() -> &'static str {
    "Fetching weather..."
}

pub fn failure(notice: &str, message: &str) -> String {
    if message.is_empty() {
        notice.to_string()
    } else {
        format!("{notice}: {message}")
    }
}

pub fn snapshot(s: &WeatherSnapshot) -> String {
    let place = if s.country.is_empty() {
        s.location_name.clone()
    } else {
        format!("{}, {}", s.location_name, s.country)
    };

    let mut lines = vec![
        format!("City: {place}"),
        format!("Latitude: {:.4}  Longitude: {:.4}", s.coordinates.lat, s.coordinates.lon),
        format!(
            "Temperature: {:.1}°C  (min {:.1}°C, max {:.1}°C)",
            s.temperature.current, s.temperature.min, s.temperature.max
        ),
    ];

    if let Some(condition) = s.primary_condition() {
        lines.push(format!("Current weather: {}", condition.description));
    }
    if let Some(icon) = s.icon_url() {
        lines.push(format!("Icon: {icon}"));
    }

    lines.push(format!("Wind: {:.1} m/s at {}°", s.wind_speed, s.wind_degrees));
    lines.push(format!("Clouds: {}%  Humidity: {}%", s.cloudiness, s.humidity));

    if let (Some(rise), Some(set)) = (s.sunrise_local(), s.sunset_local()) {
        lines.push(format!("Sunrise: {}  Sunset: {}", clock(rise), clock(set)));
    }

    lines.join("\n")
}

fn clock(t: DateTime<FixedOffset>) -> String {
    t.format("%H:%M").to_string()
}
