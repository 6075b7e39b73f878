use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::errors::*;
use crate::intent_classifier::classify_intent;
use crate::models::Metadata;
use crate::ontology::NluResult;
use crate::posteriors::PosteriorBuffer;
use crate::slot_filler::get_raw_slots;
use crate::slot_parser::SlotParserRegistry;
use crate::slot_utils::resolve_slots;
use crate::tokens::EncodedTokens;

/// Turns the outputs of an intent and slot tagging model into NLU results.
///
/// The metadata and the slot parsers are shared and never mutated, so a single
/// decoder can serve concurrent decode calls.
#[derive(Debug, Clone)]
pub struct NluDecoder {
    metadata: Arc<Metadata>,
    slot_parsers: Arc<SlotParserRegistry>,
}

impl NluDecoder {
    pub fn new(metadata: Arc<Metadata>, slot_parsers: Arc<SlotParserRegistry>) -> Self {
        Self {
            metadata,
            slot_parsers,
        }
    }

    /// Loads the model metadata file and decodes slots with the builtin parsers.
    pub fn from_path<P: AsRef<Path>>(metadata_path: P) -> Result<Self> {
        let metadata = Metadata::from_path(metadata_path)?;
        Ok(Self::new(
            Arc::new(metadata),
            Arc::new(SlotParserRegistry::with_builtin_parsers()),
        ))
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn slot_parsers(&self) -> &SlotParserRegistry {
        &self.slot_parsers
    }

    /// Decodes one utterance. `intent_posteriors` holds one score per intent and
    /// `tag_posteriors` one score per tag for each of the `tokens`.
    pub fn decode<T: EncodedTokens + ?Sized>(
        &self,
        intent_posteriors: PosteriorBuffer,
        tag_posteriors: PosteriorBuffer,
        tokens: &T,
    ) -> Result<NluResult> {
        let intent_result = classify_intent(intent_posteriors, &self.metadata)?;
        let intent = intent_result.intent;
        debug!(
            "Intent found: '{}' ({})",
            intent.name, intent_result.confidence_score
        );
        let raw_slots = get_raw_slots(tag_posteriors, tokens, &self.metadata)?;
        debug!("{} raw slots extracted", raw_slots.len());
        let slots = resolve_slots(intent, raw_slots, &self.slot_parsers)?;
        Ok(NluResult {
            intent: intent.name.clone(),
            confidence: intent_result.confidence_score,
            slots,
        })
    }
}
