use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key
    pub openweathermap_api_key: String,

    /// The one city this dashboard shows
    #[serde(default = "default_city")]
    pub city: String,

    /// Temperature units sent to the provider
    #[serde(default = "default_units")]
    pub units: String,

    /// Provider language code (zh_cn, ja, en, ...)
    #[serde(default = "default_lang")]
    pub lang: String,

    /// IANA timezone used for calendar days, hour labels and classification
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// OpenWeatherMap 2.5 base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Refresh schedule configuration
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshConfig {
    /// Seconds between forecast refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub interval_secs: u64,

    /// Seconds between time-of-day re-classifications
    #[serde(default = "default_time_check_interval_secs")]
    pub time_check_interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_refresh_interval_secs(),
            time_check_interval_secs: default_time_check_interval_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_city() -> String {
    "Tokyo".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "zh_cn".to_string()
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    10 * 60
}

fn default_time_check_interval_secs() -> u64 {
    60
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("city", default_city())?
            .set_default("units", default_units())?
            .set_default("lang", default_lang())?
            .set_default("timezone", default_timezone())?
            // Load from config file if present
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // Override with environment variables (prefixed with SEASONSKY_)
            // SEASONSKY_REFRESH__INTERVAL_SECS maps to refresh.interval_secs
            .add_source(
                Environment::with_prefix("SEASONSKY")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parsed timezone. Only valid after `validate` has passed.
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::Message(format!(
                "Invalid timezone: {}",
                self.timezone
            )));
        }
        if self.refresh.interval_secs == 0 || self.refresh.time_check_interval_secs == 0 {
            return Err(ConfigError::Message(
                "Refresh intervals must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(r#"openweathermap_api_key = "abc""#).unwrap();
        assert_eq!(config.city, "Tokyo");
        assert_eq!(config.units, "metric");
        assert_eq!(config.lang, "zh_cn");
        assert_eq!(config.port, 3000);
        assert_eq!(config.refresh.interval_secs, 600);
        assert_eq!(config.refresh.time_check_interval_secs, 60);
        assert_eq!(config.tz(), chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            openweathermap_api_key = "abc"
            city = "Osaka"
            lang = "ja"
            timezone = "UTC"

            [refresh]
            interval_secs = 300
            "#,
        )
        .unwrap();
        assert_eq!(config.city, "Osaka");
        assert_eq!(config.lang, "ja");
        assert_eq!(config.tz(), chrono_tz::UTC);
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.refresh.time_check_interval_secs, 60);
    }

    #[test]
    fn test_missing_api_key_rejected() {
        assert!(from_toml(r#"city = "Tokyo""#).is_err());
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let result = from_toml(
            r#"
            openweathermap_api_key = "abc"
            timezone = "Mars/Olympus"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = from_toml(
            r#"
            openweathermap_api_key = "abc"

            [refresh]
            time_check_interval_secs = 0
            "#,
        );
        assert!(result.is_err());
    }
}
