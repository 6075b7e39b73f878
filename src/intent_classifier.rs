use crate::errors::*;
use crate::models::{IntentMetadata, Metadata};
use crate::posteriors::{PosteriorBuffer, Probability};

#[derive(Debug, Clone, PartialEq)]
pub struct IntentClassifierResult<'a> {
    pub intent: &'a IntentMetadata,
    pub confidence_score: Probability,
}

/// Picks the top scoring intent. Scores are expected to be normalized already
/// and the winning score is returned as is.
pub fn classify_intent(
    mut intent_posteriors: PosteriorBuffer,
    metadata: &Metadata,
) -> Result<IntentClassifierResult<'_>> {
    let prediction = intent_posteriors.read_argmax(metadata.nb_intents())?;
    Ok(IntentClassifierResult {
        intent: &metadata.intents[prediction.index],
        confidence_score: prediction.score,
    })
}
