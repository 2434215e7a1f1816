use log::warn;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// Base URL used when none is configured at build time.
pub const DEFAULT_API_BASE_URL: &str = "/api";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
}

impl Settings {
    /// Absolute URL of a backend resource, `path` starting with a slash.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("RUTINA_API_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
        }
    }
}

/// Settings stored on this device, or the defaults if they cannot be read.
pub async fn load_settings(service: &impl SettingsService) -> Settings {
    service.get_settings().await.unwrap_or_else(|err| {
        warn!("failed to read settings: {err}");
        Settings::default()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/api", "/routines/r1", "/api/routines/r1")]
    #[case("https://example.com/api/", "/users", "https://example.com/api/users")]
    fn test_settings_endpoint(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        let settings = Settings {
            api_base_url: base.to_string(),
        };
        assert_eq!(settings.endpoint(path), expected);
    }

    #[test]
    fn test_settings_default() {
        assert!(!Settings::default().api_base_url.is_empty());
    }
}
