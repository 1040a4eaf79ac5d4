use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::MorningPodError;

/// What a model is used for in the episode pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Turns scraped articles into a spoken-word script
    Summarization,
    /// Synthesizes the script into audio
    Tts,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Summarization => write!(f, "summarization"),
            ModelKind::Tts => write!(f, "tts"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = MorningPodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "summarization" | "summary" => Ok(ModelKind::Summarization),
            "tts" | "speech" => Ok(ModelKind::Tts),
            _ => Err(MorningPodError::InvalidModelKind(s.to_string())),
        }
    }
}

/// AI backends the catalog knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
    Google,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAI, Provider::Anthropic, Provider::Google];

    /// Short identifier used in model ids (`openai/gpt-4o-mini`)
    pub fn id(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
        }
    }

    /// Environment variable holding the provider's API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Google => "GOOGLE_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Provider {
    type Err = MorningPodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            "google" | "gemini" => Ok(Provider::Google),
            _ => Err(MorningPodError::UnknownProvider(s.to_string())),
        }
    }
}

/// Output quality tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Standard,
    High,
    Premium,
}

/// Generation speed tier, ordered from slowest to fastest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Slow,
    Medium,
    Fast,
}

/// Feature tags attached to catalog entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFeature {
    CostEffective,
    HighQuality,
    LowLatency,
    LongContext,
    NaturalVoice,
    MultiVoice,
    Streaming,
}

impl fmt::Display for ModelFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ModelFeature::CostEffective => "cost-effective",
            ModelFeature::HighQuality => "high-quality",
            ModelFeature::LowLatency => "low-latency",
            ModelFeature::LongContext => "long-context",
            ModelFeature::NaturalVoice => "natural-voice",
            ModelFeature::MultiVoice => "multi-voice",
            ModelFeature::Streaming => "streaming",
        };
        write!(f, "{}", tag)
    }
}

/// Published list prices in USD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum ModelPricing {
    /// Summarization models bill per million input and output tokens
    Tokens {
        input_per_million: f64,
        output_per_million: f64,
    },
    /// TTS models bill per million input characters
    Characters { per_million: f64 },
}

impl ModelPricing {
    /// Single comparable unit price, used to rank models of the same kind by cost
    pub fn unit_price(&self) -> f64 {
        match self {
            ModelPricing::Tokens {
                input_per_million,
                output_per_million,
            } => input_per_million + output_per_million,
            ModelPricing::Characters { per_million } => *per_million,
        }
    }
}

/// Static catalog entry for a provider model
#[derive(Debug, Clone, Serialize)]
pub struct AIModel {
    pub id: &'static str,
    pub provider: Provider,
    pub name: &'static str,
    pub kind: ModelKind,
    pub pricing: ModelPricing,
    pub quality: QualityTier,
    pub speed: SpeedTier,
    pub features: &'static [ModelFeature],
    pub context_window: Option<usize>,
}

impl AIModel {
    /// Fully qualified id (`provider/model`)
    pub fn qualified_id(&self) -> String {
        format!("{}/{}", self.provider.id(), self.id)
    }

    pub fn has_feature(&self, feature: ModelFeature) -> bool {
        self.features.contains(&feature)
    }
}

/// What the caller cares about most when picking a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Cost,
    #[default]
    Quality,
    Speed,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Cost => write!(f, "cost"),
            Priority::Quality => write!(f, "quality"),
            Priority::Speed => write!(f, "speed"),
        }
    }
}

impl FromStr for Priority {
    type Err = MorningPodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cost" => Ok(Priority::Cost),
            "quality" => Ok(Priority::Quality),
            "speed" => Ok(Priority::Speed),
            _ => Err(MorningPodError::InvalidPriority(s.to_string())),
        }
    }
}

/// A scored catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation<'a> {
    pub model: &'a AIModel,
    pub score: u32,
    /// Estimated USD cost for the requested content length (0 when none given)
    pub estimated_cost: f64,
    /// Why points were awarded, in scoring order
    pub reasons: Vec<String>,
}
