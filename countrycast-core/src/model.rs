use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one selection.
///
/// Replaced wholesale on every successful fetch, never merged or patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub temp_c: f64,
    pub feelslike_c: f64,
    pub condition: String,
    /// Icon image URL as returned by the provider, e.g.
    /// `//cdn.weatherapi.com/weather/64x64/day/113.png`.
    pub condition_icon: String,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub observation_time: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Condition code embedded in the icon URL's file stem, if present.
    ///
    /// WeatherAPI.com names its icon files after the condition code, so this
    /// is what terminal frontends key their glyph choice on.
    pub fn icon_code(&self) -> Option<u32> {
        let file = self.condition_icon.rsplit('/').next()?;
        let stem = file.split('.').next()?;
        stem.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_icon(icon: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "Lahore".to_string(),
            temp_c: 30.0,
            feelslike_c: 33.0,
            condition: "Sunny".to_string(),
            condition_icon: icon.to_string(),
            humidity_pct: 40,
            wind_kph: 10.0,
            observation_time: Utc::now(),
        }
    }

    #[test]
    fn icon_code_parses_file_stem() {
        let snap = snapshot_with_icon("//cdn.weatherapi.com/weather/64x64/day/113.png");
        assert_eq!(snap.icon_code(), Some(113));
    }

    #[test]
    fn icon_code_is_none_for_non_numeric_stem() {
        let snap = snapshot_with_icon("//x.png");
        assert_eq!(snap.icon_code(), None);
    }

    #[test]
    fn icon_code_is_none_for_empty_url() {
        let snap = snapshot_with_icon("");
        assert_eq!(snap.icon_code(), None);
    }
}
