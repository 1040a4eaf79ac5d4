// Gateway module for output - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod formatter;

// Public re-exports - the ONLY way to access output functionality
pub use formatter::{
    render_detection, render_estimate, render_models, render_providers,
    render_recommendations, render_template, EstimateReport, OutputFormat, RecommendationReport,
};
