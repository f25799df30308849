use std::path::PathBuf;

use config::{
    builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat,
};
use serde::Deserialize;

/// Prefix of environment variables overriding file based settings,
/// e.g. `GATEWAY__REDIRECT_PAGE__TITLE`.
pub const ENV_PREFIX: &str = "GATEWAY";

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub redirect_page: RedirectPageSettings,
}

/// Text and behaviour of the auto-submitting form used for POST redirects.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RedirectPageSettings {
    pub title: String,
    pub message: String,
    pub submit_label: String,
    /// Submit the form as soon as the page loads. The submit button stays available for
    /// browsers without scripting.
    pub auto_submit: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config_path(None)
    }

    /// Loads settings from an optional TOML file, then applies environment overrides.
    ///
    /// The merged settings are validated before they are returned.
    pub fn with_config_path(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        Self::build(builder)
    }

    /// Loads settings from TOML contents, then applies environment overrides.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(contents, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings
            .validate()
            .map_err(|error| ConfigError::Message(error.to_string()))?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_when_section_is_missing() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.redirect_page.auto_submit);
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let settings = Settings::from_toml(
            r#"
            [redirect_page]
            title = "Just a moment"
            auto_submit = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.redirect_page.title, "Just a moment");
        assert!(!settings.redirect_page.auto_submit);
        assert_eq!(
            settings.redirect_page.submit_label,
            RedirectPageSettings::default().submit_label
        );
    }

    #[test]
    fn empty_title_fails_to_load() {
        let error = Settings::from_toml(
            r#"
            [redirect_page]
            title = ""
            "#,
        )
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Invalid configuration value provided: redirect page title must not be empty"
        );
    }
}
