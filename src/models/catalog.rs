use once_cell::sync::Lazy;

use crate::utils::{MorningPodError, Result};

use super::credentials::{AuthStatus, CredentialSource, ProviderStatus};
use super::types::{
    AIModel, ModelFeature, ModelKind, ModelPricing, Provider, QualityTier, SpeedTier,
};

static BUILTIN: Lazy<ModelCatalog> = Lazy::new(|| ModelCatalog::new(builtin_models()));

/// Read-only registry of summarization and TTS models
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<AIModel>,
}

impl ModelCatalog {
    /// Create a catalog from an explicit model list
    pub fn new(models: Vec<AIModel>) -> Self {
        Self { models }
    }

    /// The built-in catalog, initialised once and shared
    pub fn builtin() -> &'static ModelCatalog {
        &BUILTIN
    }

    /// All models in catalog order
    pub fn all(&self) -> &[AIModel] {
        &self.models
    }

    pub fn by_kind(&self, kind: ModelKind) -> Vec<&AIModel> {
        self.models.iter().filter(|m| m.kind == kind).collect()
    }

    pub fn by_provider(&self, provider: Provider) -> Vec<&AIModel> {
        self.models.iter().filter(|m| m.provider == provider).collect()
    }

    /// Find a model by id or `provider/id`, ignoring case
    pub fn find(&self, id: &str) -> Option<&AIModel> {
        let lower = id.trim().to_lowercase();
        self.models.iter().find(|m| {
            m.id.to_lowercase() == lower || m.qualified_id().to_lowercase() == lower
        })
    }

    /// Like [`find`](Self::find), but an unknown id is an error
    pub fn get(&self, id: &str) -> Result<&AIModel> {
        self.find(id)
            .ok_or_else(|| MorningPodError::UnknownModel(id.to_string()))
    }

    /// Providers with their credential status and model counts
    pub fn providers(&self, credentials: &dyn CredentialSource) -> Vec<ProviderStatus> {
        Provider::ALL
            .iter()
            .map(|&provider| ProviderStatus {
                provider,
                api_key_env: provider.api_key_env(),
                auth_status: if credentials.has_credentials(provider) {
                    AuthStatus::Configured
                } else {
                    AuthStatus::Missing
                },
                model_count: self.models.iter().filter(|m| m.provider == provider).count(),
            })
            .collect()
    }
}

fn builtin_models() -> Vec<AIModel> {
    use ModelFeature::*;

    vec![
        // Summarization
        AIModel {
            id: "gpt-4o-mini",
            provider: Provider::OpenAI,
            name: "GPT-4o mini",
            kind: ModelKind::Summarization,
            pricing: ModelPricing::Tokens {
                input_per_million: 0.15,
                output_per_million: 0.60,
            },
            quality: QualityTier::High,
            speed: SpeedTier::Fast,
            features: &[CostEffective, LowLatency, Streaming, LongContext],
            context_window: Some(128_000),
        },
        AIModel {
            id: "gpt-4o",
            provider: Provider::OpenAI,
            name: "GPT-4o",
            kind: ModelKind::Summarization,
            pricing: ModelPricing::Tokens {
                input_per_million: 2.50,
                output_per_million: 10.00,
            },
            quality: QualityTier::Premium,
            speed: SpeedTier::Medium,
            features: &[HighQuality, Streaming, LongContext],
            context_window: Some(128_000),
        },
        AIModel {
            id: "claude-3-5-haiku-latest",
            provider: Provider::Anthropic,
            name: "Claude 3.5 Haiku",
            kind: ModelKind::Summarization,
            pricing: ModelPricing::Tokens {
                input_per_million: 0.80,
                output_per_million: 4.00,
            },
            quality: QualityTier::High,
            speed: SpeedTier::Fast,
            features: &[LowLatency, Streaming, LongContext],
            context_window: Some(200_000),
        },
        AIModel {
            id: "claude-3-5-sonnet-latest",
            provider: Provider::Anthropic,
            name: "Claude 3.5 Sonnet",
            kind: ModelKind::Summarization,
            pricing: ModelPricing::Tokens {
                input_per_million: 3.00,
                output_per_million: 15.00,
            },
            quality: QualityTier::Premium,
            speed: SpeedTier::Medium,
            features: &[HighQuality, Streaming, LongContext],
            context_window: Some(200_000),
        },
        AIModel {
            id: "gemini-1.5-flash",
            provider: Provider::Google,
            name: "Gemini 1.5 Flash",
            kind: ModelKind::Summarization,
            pricing: ModelPricing::Tokens {
                input_per_million: 0.075,
                output_per_million: 0.30,
            },
            quality: QualityTier::Standard,
            speed: SpeedTier::Fast,
            features: &[CostEffective, LowLatency, LongContext],
            context_window: Some(1_048_576),
        },
        AIModel {
            id: "gemini-1.5-pro",
            provider: Provider::Google,
            name: "Gemini 1.5 Pro",
            kind: ModelKind::Summarization,
            pricing: ModelPricing::Tokens {
                input_per_million: 1.25,
                output_per_million: 5.00,
            },
            quality: QualityTier::High,
            speed: SpeedTier::Medium,
            features: &[HighQuality, LongContext],
            context_window: Some(2_097_152),
        },
        // Text to speech
        AIModel {
            id: "tts-1",
            provider: Provider::OpenAI,
            name: "OpenAI TTS",
            kind: ModelKind::Tts,
            pricing: ModelPricing::Characters { per_million: 15.00 },
            quality: QualityTier::Standard,
            speed: SpeedTier::Fast,
            features: &[LowLatency, Streaming, MultiVoice],
            context_window: None,
        },
        AIModel {
            id: "tts-1-hd",
            provider: Provider::OpenAI,
            name: "OpenAI TTS HD",
            kind: ModelKind::Tts,
            pricing: ModelPricing::Characters { per_million: 30.00 },
            quality: QualityTier::High,
            speed: SpeedTier::Medium,
            features: &[HighQuality, NaturalVoice, MultiVoice],
            context_window: None,
        },
        AIModel {
            id: "google-tts-standard",
            provider: Provider::Google,
            name: "Google Cloud TTS Standard",
            kind: ModelKind::Tts,
            pricing: ModelPricing::Characters { per_million: 4.00 },
            quality: QualityTier::Standard,
            speed: SpeedTier::Fast,
            features: &[CostEffective, LowLatency, MultiVoice],
            context_window: None,
        },
        AIModel {
            id: "google-tts-neural2",
            provider: Provider::Google,
            name: "Google Cloud TTS Neural2",
            kind: ModelKind::Tts,
            pricing: ModelPricing::Characters { per_million: 16.00 },
            quality: QualityTier::High,
            speed: SpeedTier::Medium,
            features: &[NaturalVoice, MultiVoice],
            context_window: None,
        },
        AIModel {
            id: "google-tts-studio",
            provider: Provider::Google,
            name: "Google Cloud TTS Studio",
            kind: ModelKind::Tts,
            pricing: ModelPricing::Characters { per_million: 160.00 },
            quality: QualityTier::Premium,
            speed: SpeedTier::Slow,
            features: &[HighQuality, NaturalVoice],
            context_window: None,
        },
    ]
}
