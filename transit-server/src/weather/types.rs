//! Weather API wire types and their flattened views.

use serde::{Deserialize, Serialize};

// ============================================================================
// Wire DTOs (WeatherAPI.com response shapes)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub location: LocationDto,
    pub current: CurrentDto,
}

#[derive(Debug, Deserialize)]
pub struct LocationDto {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentDto {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: ConditionDto,
    pub humidity: u32,
    pub wind_kph: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub last_updated: String,
}

#[derive(Debug, Deserialize)]
pub struct ConditionDto {
    pub text: String,
    /// Protocol-relative icon URL, e.g. `//cdn.weatherapi.com/...`
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub location: LocationDto,
    pub forecast: ForecastDaysDto,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDaysDto {
    pub forecastday: Vec<ForecastDayDto>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastDayDto {
    pub date: String,
    pub day: DayDto,
}

#[derive(Debug, Deserialize)]
pub struct DayDto {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub condition: ConditionDto,
    pub daily_chance_of_rain: u32,
}

// ============================================================================
// Flattened views returned to callers
// ============================================================================

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: String,
    pub icon: String,
    pub humidity: u32,
    pub wind_kph: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub last_updated: String,
}

impl From<CurrentResponse> for CurrentConditions {
    fn from(r: CurrentResponse) -> Self {
        Self {
            location: r.location.name,
            temp_c: r.current.temp_c,
            temp_f: r.current.temp_f,
            condition: r.current.condition.text,
            icon: r.current.condition.icon,
            humidity: r.current.humidity,
            wind_kph: r.current.wind_kph,
            feelslike_c: r.current.feelslike_c,
            feelslike_f: r.current.feelslike_f,
            last_updated: r.current.last_updated,
        }
    }
}

/// Multi-day forecast for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub days: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: String,
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub condition: String,
    pub icon: String,
    pub chance_of_rain: u32,
}

impl From<ForecastResponse> for Forecast {
    fn from(r: ForecastResponse) -> Self {
        Self {
            location: r.location.name,
            days: r
                .forecast
                .forecastday
                .into_iter()
                .map(|d| DayForecast {
                    date: d.date,
                    maxtemp_c: d.day.maxtemp_c,
                    mintemp_c: d.day.mintemp_c,
                    condition: d.day.condition.text,
                    icon: d.day.condition.icon,
                    chance_of_rain: d.day.daily_chance_of_rain,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_response_flattens() {
        let json = r#"{
            "location": { "name": "Accra", "country": "Ghana" },
            "current": {
                "temp_c": 29.0,
                "temp_f": 84.2,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png"
                },
                "humidity": 75,
                "wind_kph": 15.1,
                "feelslike_c": 33.2,
                "feelslike_f": 91.8,
                "last_updated": "2024-06-01 09:00"
            }
        }"#;

        let response: CurrentResponse = serde_json::from_str(json).unwrap();
        let conditions = CurrentConditions::from(response);

        assert_eq!(conditions.location, "Accra");
        assert_eq!(conditions.temp_c, 29.0);
        assert_eq!(conditions.condition, "Partly cloudy");
        assert!(conditions.icon.starts_with("//cdn.weatherapi.com"));
        assert_eq!(conditions.humidity, 75);
    }

    #[test]
    fn forecast_response_flattens() {
        let json = r#"{
            "location": { "name": "Kumasi" },
            "forecast": {
                "forecastday": [
                    {
                        "date": "2024-06-01",
                        "day": {
                            "maxtemp_c": 31.0,
                            "mintemp_c": 22.5,
                            "condition": { "text": "Moderate rain", "icon": "//icon" },
                            "daily_chance_of_rain": 85
                        }
                    },
                    {
                        "date": "2024-06-02",
                        "day": {
                            "maxtemp_c": 30.1,
                            "mintemp_c": 22.0,
                            "condition": { "text": "Sunny", "icon": "//icon2" },
                            "daily_chance_of_rain": 10
                        }
                    }
                ]
            }
        }"#;

        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        let forecast = Forecast::from(response);

        assert_eq!(forecast.location, "Kumasi");
        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].chance_of_rain, 85);
        assert_eq!(forecast.days[1].condition, "Sunny");
    }

    #[test]
    fn extra_wire_fields_are_ignored() {
        let json = r#"{
            "location": { "name": "Accra", "region": "Greater Accra", "lat": 5.55 },
            "current": {
                "temp_c": 29.0,
                "temp_f": 84.2,
                "condition": { "text": "Clear", "icon": "//i", "code": 1000 },
                "humidity": 75,
                "wind_kph": 15.1,
                "wind_dir": "SW",
                "feelslike_c": 33.2,
                "feelslike_f": 91.8,
                "last_updated": "2024-06-01 09:00"
            }
        }"#;

        assert!(serde_json::from_str::<CurrentResponse>(json).is_ok());
    }
}
