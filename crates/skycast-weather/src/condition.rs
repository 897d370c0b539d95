//! WMO weather code classification.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Condition label and icon key for a weather code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub description: &'static str,
    pub icon_key: String,
}

impl Classification {
    /// OpenWeatherMap artwork for this icon key
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon_key)
    }
}

/// OpenWeatherMap artwork URL for an icon key such as `"03d"`
pub fn icon_url(icon_key: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@4x.png", icon_key)
}

/// Map a weather code and day/night flag to a label and icon key.
///
/// Total over all integers; unrecognized codes map to "Unknown" with a
/// generic cloud icon. The day flag only selects the icon suffix.
pub fn classify(code: i32, is_day: bool) -> Classification {
    let (description, icon_base) = match code {
        0 => ("Clear Sky", "01"),
        1 => ("Mainly Clear", "02"),
        2 => ("Partly Cloudy", "03"),
        3 => ("Overcast", "04"),
        45..=48 => ("Fog", "50"),
        51..=57 => ("Drizzle", "09"),
        61..=67 => ("Rain", "10"),
        71..=77 => ("Snow", "13"),
        80..=82 => ("Rain Showers", "09"),
        95..=99 => ("Thunderstorm", "11"),
        _ => ("Unknown", "03"),
    };

    let suffix = if is_day { 'd' } else { 'n' };

    Classification {
        description,
        icon_key: format!("{}{}", icon_base, suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_total() {
        for code in -1000..=1000 {
            for is_day in [true, false] {
                let c = classify(code, is_day);
                assert!(!c.description.is_empty(), "code {}", code);
                assert!(!c.icon_key.is_empty(), "code {}", code);
            }
        }
    }

    #[test]
    fn test_representative_codes() {
        let expected = [
            (0, "Clear Sky"),
            (1, "Mainly Clear"),
            (2, "Partly Cloudy"),
            (3, "Overcast"),
            (46, "Fog"),
            (53, "Drizzle"),
            (64, "Rain"),
            (75, "Snow"),
            (81, "Rain Showers"),
            (97, "Thunderstorm"),
        ];
        for (code, description) in expected {
            assert_eq!(classify(code, true).description, description, "code {}", code);
        }
    }

    #[test]
    fn test_band_edges_are_inclusive() {
        assert_eq!(classify(45, true).description, "Fog");
        assert_eq!(classify(48, true).description, "Fog");
        assert_eq!(classify(51, true).description, "Drizzle");
        assert_eq!(classify(57, true).description, "Drizzle");
        assert_eq!(classify(80, true).description, "Rain Showers");
        assert_eq!(classify(82, true).description, "Rain Showers");
        assert_eq!(classify(99, true).description, "Thunderstorm");
    }

    #[test]
    fn test_gaps_between_bands_are_unknown() {
        for code in [4, 44, 49, 50, 58, 60, 68, 70, 78, 79, 83, 94, 100, -1] {
            assert_eq!(classify(code, true).description, "Unknown", "code {}", code);
        }
    }

    #[test]
    fn test_day_flag_only_changes_icon_suffix() {
        let day = classify(2, true);
        let night = classify(2, false);
        assert_eq!(day.description, night.description);
        assert_eq!(day.icon_key, "03d");
        assert_eq!(night.icon_key, "03n");
    }

    #[test]
    fn test_unknown_uses_generic_cloud_icon() {
        assert_eq!(classify(1234, false).icon_key, "03n");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            classify(0, true).icon_url(),
            "https://openweathermap.org/img/wn/01d@4x.png"
        );
    }
}
