use std::collections::BTreeMap;

use serde_derive::Serialize;

use crate::posteriors::Probability;
use crate::utils::{value_to_text, IntentName, SlotName};

/// Parsed slot value. Parsers are free to produce any JSON shape, and implicit
/// values are copied verbatim from the model metadata.
pub type SlotValue = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub name: SlotName,
    pub raw_value: String,
    pub value: SlotValue,
}

impl Slot {
    pub fn new(name: SlotName, raw_value: String, value: SlotValue) -> Self {
        Self {
            name,
            raw_value,
            value,
        }
    }

    /// A slot that was not parsed: its value is its raw text.
    pub fn unparsed(name: SlotName, raw_value: String) -> Self {
        let value = SlotValue::String(raw_value.clone());
        Self::new(name, raw_value, value)
    }

    pub fn implicit(name: SlotName, value: SlotValue) -> Self {
        Self::new(name, value_to_text(&value), value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NluResult {
    pub intent: IntentName,
    pub confidence: Probability,
    pub slots: BTreeMap<SlotName, Slot>,
}
