use serde::Serialize;

use super::types::Provider;

/// Source of truth for whether a provider can be called
///
/// Only presence is checked; key values are never read into the catalog.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource {
    fn has_credentials(&self, provider: Provider) -> bool;
}

/// Looks up provider API keys in the process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn has_credentials(&self, provider: Provider) -> bool {
        let is_set = |var: &str| {
            std::env::var(var)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false)
        };

        // Gemini keys are also accepted for Google
        is_set(provider.api_key_env()) || (provider == Provider::Google && is_set("GEMINI_API_KEY"))
    }
}

/// Whether a provider has credentials configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Configured,
    Missing,
}

/// Provider summary as reported by `status` and `models`
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub provider: Provider,
    pub api_key_env: &'static str,
    pub auth_status: AuthStatus,
    pub model_count: usize,
}
