use crate::constants::{CHARS_PER_TOKEN, SUMMARY_OUTPUT_RATIO, UNITS_PER_MILLION};

use super::types::{AIModel, ModelPricing};

/// Estimate the USD cost of running `content_length` characters through a model
///
/// Returns `0.0` when no content length is given. Summarization models are
/// billed for the input tokens plus a summary a quarter of that size; TTS
/// models are billed per character.
pub fn estimate_cost(model: &AIModel, content_length: Option<usize>) -> f64 {
    let chars = match content_length {
        Some(chars) if chars > 0 => chars,
        _ => return 0.0,
    };

    let cost = match model.pricing {
        ModelPricing::Tokens {
            input_per_million,
            output_per_million,
        } => {
            let input_tokens = estimate_tokens(chars);
            let output_tokens = (input_tokens as f64 * SUMMARY_OUTPUT_RATIO).ceil();
            input_tokens as f64 * input_per_million / UNITS_PER_MILLION
                + output_tokens * output_per_million / UNITS_PER_MILLION
        }
        ModelPricing::Characters { per_million } => chars as f64 * per_million / UNITS_PER_MILLION,
    };

    cost.max(0.0)
}

/// Rough token count for English prose
pub fn estimate_tokens(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}
