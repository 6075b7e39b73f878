use crate::errors::*;
use crate::models::Facets;
use crate::ontology::SlotValue;

use super::SlotParser;

/// Keeps the raw text as the slot value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityParser;

impl SlotParser for EntityParser {
    fn parse(&self, _facets: &Facets, raw_value: &str) -> Result<SlotValue> {
        Ok(SlotValue::String(raw_value.to_string()))
    }
}
