use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::models::{
    AIModel, AuthStatus, ModelKind, ModelPricing, Priority, ProviderStatus, Recommendation,
};
use crate::templates::{LoadedTemplate, ProjectDetection, TemplateSource};

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}

/// Recommendation run plus the parameters that produced it
#[derive(Debug, Serialize)]
pub struct RecommendationReport<'a> {
    pub priority: Priority,
    pub kind: Option<ModelKind>,
    pub content_length: Option<usize>,
    pub recommendations: Vec<Recommendation<'a>>,
}

/// Cost estimate for a single model
#[derive(Debug, Serialize)]
pub struct EstimateReport<'a> {
    pub model: &'a AIModel,
    pub content_length: usize,
    pub estimated_tokens: Option<usize>,
    pub estimated_cost: f64,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize result: {}\"}}", e))
}

fn format_cost(cost: f64) -> String {
    if cost == 0.0 {
        "-".to_string()
    } else if cost < 0.01 {
        format!("${:.6}", cost)
    } else {
        format!("${:.4}", cost)
    }
}

fn format_pricing(pricing: &ModelPricing) -> String {
    match pricing {
        ModelPricing::Tokens {
            input_per_million,
            output_per_million,
        } => format!("${:.3} in / ${:.3} out per 1M tokens", input_per_million, output_per_million),
        ModelPricing::Characters { per_million } => format!("${:.2} per 1M chars", per_million),
    }
}

fn tier_label(model: &AIModel) -> String {
    format!("{:?} quality, {:?} speed", model.quality, model.speed).to_lowercase()
}

fn yes_no(on: bool) -> &'static str {
    if on {
        "yes"
    } else {
        "no"
    }
}

/// Render ranked recommendations
pub fn render_recommendations(report: &RecommendationReport<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Text => {
            let mut output = String::new();
            let scope = report
                .kind
                .map(|k| format!("{} ", k))
                .unwrap_or_default();
            output.push_str(&format!(
                "Top {}models for {}:\n",
                scope,
                report.priority.to_string().bold()
            ));

            if report.recommendations.is_empty() {
                output.push_str("  No models matched\n");
                return output;
            }

            for (rank, rec) in report.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "\n{}. {} ({}) score {}\n",
                    rank + 1,
                    rec.model.name.green().bold(),
                    rec.model.qualified_id(),
                    rec.score
                ));
                output.push_str(&format!("   {}\n", tier_label(rec.model)));
                if report.content_length.is_some() {
                    output.push_str(&format!(
                        "   Estimated cost: {}\n",
                        format_cost(rec.estimated_cost).yellow()
                    ));
                }
                for reason in &rec.reasons {
                    output.push_str(&format!("   • {}\n", reason));
                }
            }

            output
        }
        OutputFormat::Markdown => {
            let mut output = String::new();
            output.push_str(&format!("## Recommended models ({})\n\n", report.priority));
            output.push_str("| # | Model | Provider | Kind | Score | Est. cost |\n");
            output.push_str("|---|-------|----------|------|-------|-----------|\n");
            for (rank, rec) in report.recommendations.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    rank + 1,
                    rec.model.name,
                    rec.model.provider,
                    rec.model.kind,
                    rec.score,
                    format_cost(rec.estimated_cost)
                ));
            }
            output
        }
    }
}

/// Render catalog entries
pub fn render_models(models: &[&AIModel], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&models),
        OutputFormat::Text => {
            let mut output = String::new();
            for model in models {
                output.push_str(&format!(
                    "  • {} [{}] {}\n",
                    model.qualified_id().green(),
                    model.kind,
                    format_pricing(&model.pricing)
                ));
                let features: Vec<String> = model.features.iter().map(|f| f.to_string()).collect();
                output.push_str(&format!("      {}; {}\n", tier_label(model), features.join(", ")));
            }
            output
        }
        OutputFormat::Markdown => {
            let mut output = String::new();
            output.push_str("| Model | Kind | Pricing | Quality | Speed |\n");
            output.push_str("|-------|------|---------|---------|-------|\n");
            for model in models {
                output.push_str(&format!(
                    "| `{}` | {} | {} | {:?} | {:?} |\n",
                    model.qualified_id(),
                    model.kind,
                    format_pricing(&model.pricing),
                    model.quality,
                    model.speed
                ));
            }
            output
        }
    }
}

/// Render a single cost estimate
pub fn render_estimate(report: &EstimateReport<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Markdown => {
            let mut output = format!("## Cost estimate: `{}`\n\n", report.model.qualified_id());
            output.push_str("| Field | Value |\n");
            output.push_str("|-------|-------|\n");
            output.push_str(&format!("| Characters | {} |\n", report.content_length));
            if let Some(tokens) = report.estimated_tokens {
                output.push_str(&format!("| Input tokens | ~{} |\n", tokens));
            }
            output.push_str(&format!("| Pricing | {} |\n", format_pricing(&report.model.pricing)));
            output.push_str(&format!("| Estimated cost | {} |\n", format_cost(report.estimated_cost)));
            output
        }
        OutputFormat::Text => {
            let mut output = format!(
                "{} for {} characters",
                report.model.qualified_id(),
                report.content_length
            );
            if let Some(tokens) = report.estimated_tokens {
                output.push_str(&format!(" (~{} input tokens)", tokens));
            }
            output.push_str(&format!(": {}\n", format_cost(report.estimated_cost)));
            output
        }
    }
}

/// Render provider credential status
pub fn render_providers(statuses: &[ProviderStatus], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&statuses),
        OutputFormat::Markdown => {
            let mut output = String::new();
            output.push_str("| Provider | API key | Status | Models |\n");
            output.push_str("|----------|---------|--------|--------|\n");
            for status in statuses {
                let auth = match status.auth_status {
                    AuthStatus::Configured => "configured",
                    AuthStatus::Missing => "missing",
                };
                output.push_str(&format!(
                    "| {} | `{}` | {} | {} |\n",
                    status.provider, status.api_key_env, auth, status.model_count
                ));
            }
            output
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for status in statuses {
                let label = match status.auth_status {
                    AuthStatus::Configured => "[OK]".green(),
                    AuthStatus::Missing => "[MISSING]".yellow(),
                };
                output.push_str(&format!(
                    "  {} {}: {} ({} models)\n",
                    label, status.provider, status.api_key_env, status.model_count
                ));
            }
            output
        }
    }
}

/// Render a project detection
pub fn render_detection(detection: &ProjectDetection, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(detection),
        OutputFormat::Markdown => {
            let mut output = format!("## {} project\n\n", detection.project_type);
            output.push_str(&format!("- **Package manager:** {}\n", detection.package_manager));
            output.push_str(&format!("- **TypeScript:** {}\n", yes_no(detection.has_typescript)));
            output.push_str(&format!("- **Database:** {}\n", yes_no(detection.has_database)));
            output.push_str(&format!("- **Testing:** {}\n", yes_no(detection.has_testing)));
            output.push_str(&format!("- **Linting:** {}\n", yes_no(detection.has_linting)));
            output.push_str(&format!("- **Docker:** {}\n", yes_no(detection.has_docker)));
            output
        }
        OutputFormat::Text => {
            let flag = yes_no;
            let mut output = String::new();
            output.push_str(&format!("Project type:    {}\n", detection.project_type.to_string().bold()));
            output.push_str(&format!("Package manager: {}\n", detection.package_manager));
            output.push_str(&format!("TypeScript:      {}\n", flag(detection.has_typescript)));
            output.push_str(&format!("Database:        {}\n", flag(detection.has_database)));
            output.push_str(&format!("Testing:         {}\n", flag(detection.has_testing)));
            output.push_str(&format!("Linting:         {}\n", flag(detection.has_linting)));
            output.push_str(&format!("Docker:          {}\n", flag(detection.has_docker)));
            output
        }
    }
}

/// Render an effective template with its source
pub fn render_template(loaded: &LoadedTemplate, format: OutputFormat) -> String {
    let template = &loaded.template;
    let source = match &loaded.source {
        TemplateSource::File { path } => format!("from {}", path.display()),
        TemplateSource::Generated => "generated from project detection".to_string(),
        TemplateSource::Fallback { reason } => format!("generated (scripts file ignored: {})", reason),
    };

    match format {
        OutputFormat::Json => to_json(loaded),
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&format!(
                "{} [{}] {}\n",
                template.name.bold(),
                template.package_manager,
                source.dimmed()
            ));
            if !template.description.is_empty() {
                output.push_str(&format!("{}\n", template.description));
            }
            for category in &template.categories {
                output.push_str(&format!("\n{}", category.name.cyan().bold()));
                if !category.description.is_empty() {
                    output.push_str(&format!(" - {}", category.description));
                }
                output.push('\n');
                for command in &category.commands {
                    output.push_str(&format!(
                        "  {:<12} {}\n",
                        command.name,
                        command.command.green()
                    ));
                }
            }
            output
        }
        OutputFormat::Markdown => {
            let mut output = String::new();
            output.push_str(&format!("# {}\n\n", template.name));
            if !template.description.is_empty() {
                output.push_str(&format!("{}\n\n", template.description));
            }
            output.push_str(&format!("*Package manager: {} | Source: {}*\n", template.package_manager, source));
            for category in &template.categories {
                output.push_str(&format!("\n## {}\n\n", category.name));
                for command in &category.commands {
                    output.push_str(&format!(
                        "- **{}**: `{}`{}\n",
                        command.name,
                        command.command,
                        if command.description.is_empty() {
                            String::new()
                        } else {
                            format!(" - {}", command.description)
                        }
                    ));
                }
            }
            output
        }
    }
}
