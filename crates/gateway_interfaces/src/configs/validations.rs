use crate::errors::SettingsError;

impl super::settings::Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.redirect_page.validate()
    }
}

impl super::settings::RedirectPageSettings {
    /// Validates the configuration values of the redirect page.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.title.trim().is_empty() {
            return Err(SettingsError::InvalidConfigurationValue(
                "redirect page title must not be empty".into(),
            ));
        }

        if self.submit_label.trim().is_empty() {
            return Err(SettingsError::InvalidConfigurationValue(
                "redirect page submit label must not be empty".into(),
            ));
        }

        Ok(())
    }
}
