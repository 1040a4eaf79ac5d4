// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod catalog;
mod cost;
mod credentials;
mod recommender;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use catalog::ModelCatalog;
pub use cost::{estimate_cost, estimate_tokens};
pub use credentials::{AuthStatus, CredentialSource, EnvCredentials, ProviderStatus};
pub use recommender::{recommend, recommend_models, RecommendationRequest};
pub use types::{
    AIModel, ModelFeature, ModelKind, ModelPricing, Priority, Provider, QualityTier,
    Recommendation, SpeedTier,
};
