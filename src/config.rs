use crate::error::ConfigError;
use crate::locale::{LabelOverrides, Locale};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const LOCALE_ENV: &str = "REQUESTS_GUI_LOCALE";

const DEFAULT_HEADER_ROWS: usize = 3;
const MAX_HEADER_ROWS: usize = 32;
const MIN_WINDOW_WIDTH: u32 = 480;
const MIN_WINDOW_HEIGHT: u32 = 360;

/// Initial window placement in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            x: 100,
            y: 100,
            width: 1000,
            height: 800,
        }
    }
}

/// Application configuration. Read at startup, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locale: Locale,
    pub default_url: Option<String>,
    pub header_rows: usize,
    pub labels: LabelOverrides,
    pub window: WindowGeometry,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            default_url: None,
            header_rows: DEFAULT_HEADER_ROWS,
            labels: LabelOverrides::new(),
            window: WindowGeometry::default(),
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("requests-gui")
            .join("config.json")
    }

    /// Config file plus environment overrides. Problems with the file fall back
    /// to defaults.
    pub fn load() -> Self {
        let path = Self::path();
        let mut config = if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        config.apply_locale_override(std::env::var(LOCALE_ENV).ok().as_deref());
        config
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(content)?;
        config.header_rows = config.header_rows.clamp(1, MAX_HEADER_ROWS);
        config.window.width = config.window.width.max(MIN_WINDOW_WIDTH);
        config.window.height = config.window.height.max(MIN_WINDOW_HEIGHT);
        Ok(config)
    }

    pub fn apply_locale_override(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        match value.parse::<Locale>() {
            Ok(locale) => self.locale = locale,
            Err(e) => tracing::warn!(variable = LOCALE_ENV, error = %e, "ignoring locale override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Slot;

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn fields_are_read() {
        let config = AppConfig::from_json(
            r#"{
                "locale": "en",
                "default_url": "https://httpbin.org/get",
                "header_rows": 5,
                "labels": {"zh": {"send_btn": "发送"}}
            }"#,
        )
        .unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.default_url.as_deref(), Some("https://httpbin.org/get"));
        assert_eq!(config.header_rows, 5);
        assert_eq!(config.labels[&Locale::Zh][&Slot::SendButton], "发送");
    }

    #[test]
    fn window_opens_at_1000_by_800_unless_configured() {
        let window = AppConfig::default().window;
        assert_eq!((window.x, window.y), (100, 100));
        assert_eq!((window.width, window.height), (1000, 800));

        let config = AppConfig::from_json(r#"{"window": {"width": 1280}}"#).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 800);

        let tiny = AppConfig::from_json(r#"{"window": {"width": 10, "height": 10}}"#).unwrap();
        assert_eq!((tiny.window.width, tiny.window.height), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
    }

    #[test]
    fn header_rows_are_clamped() {
        assert_eq!(AppConfig::from_json(r#"{"header_rows": 0}"#).unwrap().header_rows, 1);
        assert_eq!(
            AppConfig::from_json(r#"{"header_rows": 1000}"#).unwrap().header_rows,
            MAX_HEADER_ROWS
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            AppConfig::from_json(r#"{"locale": "fr"}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("requests-gui-missing-config.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn locale_override_wins_when_valid() {
        let mut config = AppConfig::default();
        config.apply_locale_override(Some("en"));
        assert_eq!(config.locale, Locale::En);
        config.apply_locale_override(Some("klingon"));
        assert_eq!(config.locale, Locale::En);
        config.apply_locale_override(None);
        assert_eq!(config.locale, Locale::En);
    }
}
