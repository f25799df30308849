//! Errors raised while resolving and emitting redirects.

pub use gateway_common::errors::CustomResult;

/// Redirect protocol errors.
///
/// Any of these means the gateway implementation produced an inconsistent response; they
/// are meant for the integrator, not the end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedirectError {
    #[error("This response does not support redirection.")]
    RedirectNotSupported,
    #[error("The given redirectUrl cannot be empty.")]
    EmptyRedirectUrl,
    #[error("Invalid redirect method \"{method}\".")]
    InvalidRedirectMethod { method: String },
    #[error("Failed to construct the redirect response")]
    ResponseConstructionFailed,
    #[error("Failed to write the redirect response")]
    ResponseEmissionFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid configuration value provided: {0}")]
    InvalidConfigurationValue(String),
}
