use anyhow::Context;
use lazy_static::lazy_static;
use serde::Deserialize;
use shared_kernel::configuration::config;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocodingSettings {
    pub host: String,
    pub user_agent: String,
    pub city: String,
    pub country: String,
    /// Pause after every request, Nominatim allows one request per second.
    pub delay_millis: u64,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            host: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "torun-budzet-visualization".to_string(),
            city: "Toruń".to_string(),
            country: "Poland".to_string(),
            delay_millis: 1000,
        }
    }
}

impl GeocodingSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_millis)
    }

    pub fn query_for(&self, address: &str) -> String {
        format!("{address}, {}, {}", self.city, self.country)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub geocoding: GeocodingSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to geocoding settings")
    }
}

lazy_static! {
    pub static ref SETTINGS_CONFIG: Settings = Settings::parse().unwrap();
}

#[cfg(test)]
mod tests {
    use super::GeocodingSettings;

    #[test]
    fn test_query_carries_city_and_country() {
        let settings = GeocodingSettings::default();
        assert_eq!(settings.query_for("Reja 1"), "Reja 1, Toruń, Poland");
        assert_eq!(settings.delay().as_secs(), 1);
    }
}
