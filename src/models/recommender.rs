use std::cmp::Ordering;
use tracing::debug;

use crate::constants::{
    BALANCE_BONUS_POINTS, MAX_RECOMMENDATIONS, PRIMARY_TAG_POINTS, SECONDARY_TAG_POINTS,
    TIER_POINTS_LOW, TIER_POINTS_MID, TIER_POINTS_TOP,
};

use super::catalog::ModelCatalog;
use super::cost::estimate_cost;
use super::credentials::{CredentialSource, EnvCredentials};
use super::types::{AIModel, ModelFeature, ModelKind, Priority, QualityTier, Recommendation, SpeedTier};

/// Parameters for a recommendation run
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub priority: Priority,
    /// Restrict to one kind of model; `None` scores the whole catalog
    pub kind: Option<ModelKind>,
    /// Characters of content to price; `None` leaves every estimate at zero
    pub content_length: Option<usize>,
    /// Requested result count, capped at three
    pub limit: usize,
    /// Skip providers without credentials
    pub only_configured: bool,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            priority: Priority::default(),
            kind: None,
            content_length: None,
            limit: MAX_RECOMMENDATIONS,
            only_configured: false,
        }
    }
}

/// Recommend models from the built-in catalog for a priority
pub fn recommend(priority: Priority, content_length: Option<usize>) -> Vec<Recommendation<'static>> {
    let request = RecommendationRequest {
        priority,
        content_length,
        ..Default::default()
    };
    recommend_models(ModelCatalog::builtin(), &request, &EnvCredentials)
}

/// Score, rank and truncate catalog entries for a request
///
/// Results are sorted by descending score and never exceed three entries.
pub fn recommend_models<'a>(
    catalog: &'a ModelCatalog,
    request: &RecommendationRequest,
    credentials: &dyn CredentialSource,
) -> Vec<Recommendation<'a>> {
    let candidates: Vec<&AIModel> = catalog
        .all()
        .iter()
        .filter(|m| request.kind.map_or(true, |kind| m.kind == kind))
        .filter(|m| !request.only_configured || credentials.has_credentials(m.provider))
        .collect();

    let mut scored: Vec<Recommendation<'a>> = candidates
        .iter()
        .map(|&model| {
            let (score, reasons) = score_model(model, request.priority, &candidates);
            Recommendation {
                model,
                score,
                estimated_cost: estimate_cost(model, request.content_length),
                reasons,
            }
        })
        .collect();

    // Stable sort keeps catalog order for full ties
    scored.sort_by(|a, b| {
        b.score.cmp(&a.score).then_with(|| {
            a.estimated_cost
                .partial_cmp(&b.estimated_cost)
                .unwrap_or(Ordering::Equal)
        })
    });

    let limit = request.limit.min(MAX_RECOMMENDATIONS);
    scored.truncate(limit);

    debug!(
        priority = %request.priority,
        candidates = candidates.len(),
        returned = scored.len(),
        "Scored model recommendations"
    );

    scored
}

/// Add up the fixed points a model earns under a priority
fn score_model(model: &AIModel, priority: Priority, candidates: &[&AIModel]) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();
    let mut award = |points: u32, reason: String| {
        score += points;
        reasons.push(format!("{} (+{})", reason, points));
    };

    match priority {
        Priority::Cost => {
            let (points, band) = cost_band(model, candidates);
            award(points, format!("{} price among {} models", band, model.kind));
            if model.has_feature(ModelFeature::CostEffective) {
                award(PRIMARY_TAG_POINTS, "cost-effective".to_string());
            }
        }
        Priority::Quality => {
            let points = match model.quality {
                QualityTier::Premium => TIER_POINTS_TOP,
                QualityTier::High => TIER_POINTS_MID,
                QualityTier::Standard => TIER_POINTS_LOW,
            };
            award(points, format!("{:?} quality", model.quality).to_lowercase());
            if model.has_feature(ModelFeature::HighQuality) {
                award(PRIMARY_TAG_POINTS, "high-quality output".to_string());
            }
            if model.has_feature(ModelFeature::NaturalVoice) {
                award(SECONDARY_TAG_POINTS, "natural voice".to_string());
            }
            if model.has_feature(ModelFeature::LongContext) {
                award(SECONDARY_TAG_POINTS, "long context".to_string());
            }
        }
        Priority::Speed => {
            let points = match model.speed {
                SpeedTier::Fast => TIER_POINTS_TOP,
                SpeedTier::Medium => TIER_POINTS_MID,
                SpeedTier::Slow => TIER_POINTS_LOW,
            };
            award(points, format!("{:?} generation", model.speed).to_lowercase());
            if model.has_feature(ModelFeature::LowLatency) {
                award(PRIMARY_TAG_POINTS, "low latency".to_string());
            }
            if model.has_feature(ModelFeature::Streaming) {
                award(SECONDARY_TAG_POINTS, "streaming".to_string());
            }
        }
    }

    if model.quality >= QualityTier::High && model.speed >= SpeedTier::Medium {
        award(BALANCE_BONUS_POINTS, "balanced quality and speed".to_string());
    }

    (score, reasons)
}

/// Place a model in the cheap, mid or expensive third of same-kind candidates
fn cost_band(model: &AIModel, candidates: &[&AIModel]) -> (u32, &'static str) {
    let price = model.pricing.unit_price();
    let same_kind: Vec<f64> = candidates
        .iter()
        .filter(|m| m.kind == model.kind)
        .map(|m| m.pricing.unit_price())
        .collect();

    let total = same_kind.len().max(1);
    let cheaper = same_kind.iter().filter(|&&p| p < price).count();

    if cheaper * 3 < total {
        (TIER_POINTS_TOP, "lowest")
    } else if cheaper * 3 < total * 2 {
        (TIER_POINTS_MID, "mid-range")
    } else {
        (TIER_POINTS_LOW, "highest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credentials::MockCredentialSource;
    use crate::models::Provider;

    fn no_credentials() -> MockCredentialSource {
        let mut credentials = MockCredentialSource::new();
        credentials.expect_has_credentials().returning(|_| false);
        credentials
    }

    fn run(request: &RecommendationRequest) -> Vec<Recommendation<'static>> {
        recommend_models(ModelCatalog::builtin(), request, &no_credentials())
    }

    #[test]
    fn test_never_more_than_three() {
        for priority in [Priority::Cost, Priority::Quality, Priority::Speed] {
            let request = RecommendationRequest {
                priority,
                limit: 50,
                ..Default::default()
            };
            assert!(run(&request).len() <= 3);
        }
    }

    #[test]
    fn test_sorted_by_descending_score() {
        for priority in [Priority::Cost, Priority::Quality, Priority::Speed] {
            for kind in [None, Some(ModelKind::Summarization), Some(ModelKind::Tts)] {
                let request = RecommendationRequest {
                    priority,
                    kind,
                    ..Default::default()
                };
                let results = run(&request);
                assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }

    #[test]
    fn test_cost_priority_prefers_cheap_models() {
        let request = RecommendationRequest {
            priority: Priority::Cost,
            kind: Some(ModelKind::Summarization),
            ..Default::default()
        };
        let results = run(&request);
        let top = results.first().unwrap();
        assert!(top.model.has_feature(ModelFeature::CostEffective));
        // Cheap and balanced beats merely cheap
        assert_eq!(top.model.id, "gpt-4o-mini");
    }

    #[test]
    fn test_quality_priority_prefers_premium_tts() {
        let request = RecommendationRequest {
            priority: Priority::Quality,
            kind: Some(ModelKind::Tts),
            ..Default::default()
        };
        let results = run(&request);
        assert!(results.iter().all(|r| r.model.kind == ModelKind::Tts));
        assert!(results[0].model.has_feature(ModelFeature::HighQuality));
        assert!(results.iter().any(|r| r.model.quality == QualityTier::Premium));
    }

    #[test]
    fn test_estimates_zero_without_content_length() {
        let results = recommend(Priority::Speed, None);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.estimated_cost == 0.0));
    }

    #[test]
    fn test_estimates_with_content_length() {
        let request = RecommendationRequest {
            priority: Priority::Speed,
            content_length: Some(20_000),
            ..Default::default()
        };
        assert!(run(&request).iter().all(|r| r.estimated_cost > 0.0));
    }

    #[test]
    fn test_limit_below_cap_is_respected() {
        let request = RecommendationRequest {
            limit: 1,
            ..Default::default()
        };
        assert_eq!(run(&request).len(), 1);

        let request = RecommendationRequest {
            limit: 0,
            ..Default::default()
        };
        assert!(run(&request).is_empty());
    }

    #[test]
    fn test_only_configured_filters_providers() {
        let mut credentials = MockCredentialSource::new();
        credentials
            .expect_has_credentials()
            .returning(|provider| provider == Provider::OpenAI);

        let request = RecommendationRequest {
            only_configured: true,
            ..Default::default()
        };
        let results = recommend_models(ModelCatalog::builtin(), &request, &credentials);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.model.provider == Provider::OpenAI));

        let results = recommend_models(ModelCatalog::builtin(), &request, &no_credentials());
        assert!(results.is_empty());
    }

    #[test]
    fn test_reasons_account_for_score() {
        let results = recommend(Priority::Quality, None);
        for rec in results {
            let total: u32 = rec
                .reasons
                .iter()
                .filter_map(|r| r.rsplit("(+").next())
                .filter_map(|r| r.trim_end_matches(')').parse::<u32>().ok())
                .sum();
            assert_eq!(total, rec.score);
        }
    }
}
