use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

const ICON_URL_PREFIX: &str = "https://openweathermap.org/img/wn/";

/// What to look up: a city by name, or a point on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

/// Raw `/weather` response body.
///
/// Every field is optional on the wire; anything missing or `null` falls
/// back to zero or an empty string so a sparse payload still parses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub base: String,
    #[serde(deserialize_with = "null_as_default")]
    pub clouds: Clouds,
    #[serde(deserialize_with = "null_as_default")]
    pub cod: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub coord: Coord,
    #[serde(deserialize_with = "null_as_default")]
    pub dt: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub main: Main,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sys: Sys,
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub visibility: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub weather: Vec<Condition>,
    #[serde(deserialize_with = "null_as_default")]
    pub wind: Wind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Main {
    #[serde(deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub feels_like: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_min: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_max: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub pressure: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub humidity: i64,
}

/// One entry of the `weather` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub main: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    #[serde(deserialize_with = "null_as_default")]
    pub deg: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    #[serde(deserialize_with = "null_as_default")]
    pub all: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sunrise: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sunset: i64,
}

/// Temperatures in degrees Celsius (requests ask for metric units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub feels_like: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub description: String,
    pub icon_code: String,
}

/// Parsed weather for one location at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub coordinates: Coord,
    pub temperature: Temperature,
    pub conditions: Vec<ConditionSummary>,
    pub wind_speed: f64,
    pub wind_degrees: i64,
    pub cloudiness: i64,
    pub humidity: i64,
    pub pressure: i64,
    pub timezone_offset_seconds: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub observed_at: i64,
}

impl From<WeatherResponse> for WeatherSnapshot {
    fn from(raw: WeatherResponse) -> Self {
        let conditions = raw
            .weather
            .into_iter()
            .map(|c| ConditionSummary {
                description: c.description,
                icon_code: c.icon,
            })
            .collect();

        Self {
            location_name: raw.name,
            coordinates: raw.coord,
            temperature: Temperature {
                current: raw.main.temp,
                min: raw.main.temp_min,
                max: raw.main.temp_max,
                feels_like: raw.main.feels_like,
            },
            conditions,
            wind_speed: raw.wind.speed,
            wind_degrees: raw.wind.deg,
            cloudiness: raw.clouds.all,
            humidity: raw.main.humidity,
            pressure: raw.main.pressure,
            timezone_offset_seconds: raw.timezone,
            country: raw.sys.country,
            sunrise: raw.sys.sunrise,
            sunset: raw.sys.sunset,
            observed_at: raw.dt,
        }
    }
}

impl WeatherSnapshot {
    pub fn primary_condition(&self) -> Option<&ConditionSummary> {
        self.conditions.first()
    }

    /// Icon for the first reported condition.
    pub fn icon_url(&self) -> Option<String> {
        self.primary_condition().map(|c| icon_url(&c.icon_code))
    }

    pub fn sunrise_local(&self) -> Option<DateTime<FixedOffset>> {
        self.local_time(self.sunrise)
    }

    pub fn sunset_local(&self) -> Option<DateTime<FixedOffset>> {
        self.local_time(self.sunset)
    }

    pub fn observed_local(&self) -> Option<DateTime<FixedOffset>> {
        self.local_time(self.observed_at)
    }

    /// Epoch seconds shifted into the location's own UTC offset.
    /// Zero means "not reported".
    fn local_time(&self, epoch: i64) -> Option<DateTime<FixedOffset>> {
        if epoch == 0 {
            return None;
        }
        let offset = i32::try_from(self.timezone_offset_seconds)
            .ok()
            .and_then(FixedOffset::east_opt)?;
        DateTime::from_timestamp(epoch, 0).map(|utc| utc.with_timezone(&offset))
    }
}

/// Reads an explicit JSON `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_URL_PREFIX}{icon_code}@2x.png")
}
