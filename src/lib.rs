pub mod errors;
mod intent_classifier;
pub mod models;
mod nlu_decoder;
pub mod ontology;
mod posteriors;
pub mod slot_filler;
pub mod slot_parser;
mod slot_utils;
#[cfg(test)]
mod testutils;
pub mod tokens;
mod utils;

pub use crate::errors::*;
pub use crate::intent_classifier::{classify_intent, IntentClassifierResult};
pub use crate::models::*;
pub use crate::nlu_decoder::NluDecoder;
pub use crate::ontology::{NluResult, Slot, SlotValue};
pub use crate::posteriors::{PosteriorBuffer, Prediction, Probability};
pub use crate::slot_parser::{SlotParser, SlotParserRegistry};
pub use crate::slot_utils::{get_implicit_slots, resolve_slots, Slots};
pub use crate::tokens::{AlignedTokens, EncodedTokens, TokenId, TokenOrigin};
pub use crate::utils::{IntentName, SlotName, SlotType, TagLabel};
