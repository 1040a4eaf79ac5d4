pub mod app;
pub mod cli;
pub mod constants;
pub mod models;
pub mod output;
pub mod templates;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{estimate_cost, recommend, recommend_models, ModelCatalog, Priority, RecommendationRequest};
pub use templates::{detect_project, generate_template, ConfigLoader, ProjectDetection, ProjectTemplate};
pub use utils::{MorningPodError, Result};
