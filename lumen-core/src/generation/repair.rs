//! Single-shot repair of invalid structured output

use super::phrases::{validate_phrases, ValidationError};
use super::GenerationError;
use crate::protocol::GenerationParams;
use crate::providers::FallbackRouter;
use tracing::{info, warn};

/// Temperature used for the corrective call
pub const REPAIR_TEMPERATURE: f64 = 0.2;

/// Corrective prompt asking the model to turn `invalid_output` into a bare
/// phrase array
pub fn build_repair_prompt(invalid_output: &str) -> String {
    format!(
        "Fix the following so it is ONLY a valid JSON array.\n\
         Each object must include EXACTLY these keys: text, translation, category, difficulty.\n\
         No markdown, no code fences.\n\n\
         INPUT:\n{}",
        invalid_output
    )
}

/// Validate `text` as a phrase list, making exactly one repair attempt
/// through `router` when it is invalid.
///
/// The repair call reuses the router's chain with the request's token limit
/// and task at [`REPAIR_TEMPERATURE`]. Its output is validated once more and
/// a second failure is returned as is.
pub async fn ensure_phrases(
    router: &FallbackRouter,
    text: String,
    params: &GenerationParams,
) -> Result<String, GenerationError> {
    let reason = match validate_phrases(&text) {
        Ok(canonical) => return Ok(canonical),
        Err(reason) => reason,
    };

    warn!("invalid_phrases_json error={}", reason);
    let repair_prompt = build_repair_prompt(&text);
    let repair_params = params.with_temperature(REPAIR_TEMPERATURE);

    let repaired = router.generate(&repair_prompt, &repair_params).await?;
    let canonical = validate_phrases(&repaired).map_err(|err: ValidationError| {
        warn!("repaired_phrases_invalid error={}", err);
        GenerationError::Validation(err)
    })?;

    info!("Phrase output repaired after validation failure");
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_prompt_embeds_input() {
        let prompt = build_repair_prompt("not json at all");
        assert!(prompt.starts_with("Fix the following so it is ONLY a valid JSON array."));
        assert!(prompt.contains("text, translation, category, difficulty"));
        assert!(prompt.contains("No markdown, no code fences."));
        assert!(prompt.ends_with("INPUT:\nnot json at all"));
    }
}
