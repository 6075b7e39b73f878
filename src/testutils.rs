use failure::format_err;

use crate::errors::*;
use crate::models::{Facets, IntentMetadata, Metadata, SlotMetadata};
use crate::ontology::SlotValue;
use crate::posteriors::{PosteriorBuffer, Probability};
use crate::slot_parser::SlotParser;
use crate::utils::TagLabel;

pub fn epsilon_eq(a: f32, b: f32, epsilon: f32) -> bool {
    let diff = a - b;
    diff < epsilon && diff > -epsilon
}

pub fn to_labels(labels: &[&str]) -> Vec<TagLabel> {
    labels.iter().map(|label| label.to_string()).collect()
}

#[derive(Default)]
pub struct MetadataBuilder {
    intents: Vec<IntentMetadata>,
    tags: Vec<TagLabel>,
}

impl MetadataBuilder {
    pub fn intent(mut self, intent: IntentBuilder) -> Self {
        self.intents.push(intent.build());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = to_labels(tags);
        self
    }

    pub fn build(self) -> Metadata {
        Metadata {
            intents: self.intents,
            tags: self.tags,
        }
    }
}

pub struct IntentBuilder {
    intent: IntentMetadata,
}

impl IntentBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            intent: IntentMetadata {
                name: name.to_string(),
                slots: vec![],
                implicit_slots: vec![],
            },
        }
    }

    pub fn slot(mut self, name: &str, slot_type: &str) -> Self {
        self.intent.slots.push(slot_metadata(name, slot_type, None));
        self
    }

    pub fn slot_with_value(mut self, name: &str, slot_type: &str, value: SlotValue) -> Self {
        self.intent
            .slots
            .push(slot_metadata(name, slot_type, Some(value)));
        self
    }

    pub fn implicit_slot(mut self, name: &str, slot_type: &str, value: SlotValue) -> Self {
        self.intent
            .implicit_slots
            .push(slot_metadata(name, slot_type, Some(value)));
        self
    }

    pub fn slot_facets(mut self, name: &str, facets: SlotValue) -> Self {
        let facets = facets.as_object().cloned().unwrap_or_else(Facets::new);
        for slot in self
            .intent
            .slots
            .iter_mut()
            .chain(self.intent.implicit_slots.iter_mut())
            .filter(|slot| slot.name == name)
        {
            slot.facets = facets.clone();
        }
        self
    }

    pub fn build(self) -> IntentMetadata {
        self.intent
    }
}

fn slot_metadata(name: &str, slot_type: &str, value: Option<SlotValue>) -> SlotMetadata {
    SlotMetadata {
        name: name.to_string(),
        slot_type: slot_type.to_string(),
        facets: Facets::new(),
        value,
    }
}

/// Intent scores where `intent` wins with `confidence` and every other intent
/// scores below it.
pub fn intent_scores(metadata: &Metadata, intent: &str, confidence: Probability) -> PosteriorBuffer {
    let scores: Vec<Probability> = metadata
        .intents
        .iter()
        .map(|candidate| {
            if candidate.name == intent {
                confidence
            } else {
                confidence / 10.0
            }
        })
        .collect();
    assert!(
        scores.iter().any(|score| *score == confidence),
        "unknown intent '{}'",
        intent
    );
    PosteriorBuffer::from(scores)
}

/// Token-major tag scores that decode to `labels`.
pub fn tag_scores(metadata: &Metadata, labels: &[&str]) -> PosteriorBuffer {
    let scores: Vec<Probability> = labels
        .iter()
        .flat_map(|label| {
            assert!(
                metadata.tags.iter().any(|tag| tag == label),
                "unknown tag '{}'",
                label
            );
            metadata
                .tags
                .iter()
                .map(move |tag| if tag == label { 0.8 } else { 0.1 })
        })
        .collect();
    PosteriorBuffer::from(scores)
}

pub enum MockedSlotParser {
    Uppercase,
    Rejecting,
}

impl MockedSlotParser {
    pub fn uppercase() -> Self {
        MockedSlotParser::Uppercase
    }

    pub fn rejecting() -> Self {
        MockedSlotParser::Rejecting
    }
}

impl SlotParser for MockedSlotParser {
    fn parse(&self, _facets: &Facets, raw_value: &str) -> Result<SlotValue> {
        match self {
            MockedSlotParser::Uppercase => Ok(SlotValue::String(raw_value.to_uppercase())),
            MockedSlotParser::Rejecting => Err(format_err!("Cannot parse '{}'", raw_value)),
        }
    }
}
