use serde_derive::Deserialize;

use crate::errors::*;
use crate::models::Facets;
use crate::ontology::SlotValue;

use super::{deserialize_facets, SlotParser};

#[derive(Debug, Deserialize)]
struct SelsetFacets {
    #[serde(default)]
    selections: Vec<Selection>,
}

#[derive(Debug, Deserialize)]
struct Selection {
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
}

impl Selection {
    fn matches(&self, normalized_value: &str) -> bool {
        self.name.to_lowercase() == normalized_value
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase() == normalized_value)
    }
}

/// Maps the raw value onto one of a closed set of selections, by name or alias.
/// The value of the slot is the canonical name of the matched selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelsetParser;

impl SlotParser for SelsetParser {
    fn parse(&self, facets: &Facets, raw_value: &str) -> Result<SlotValue> {
        let facets: SelsetFacets = deserialize_facets(facets)?;
        let normalized_value = raw_value.trim().to_lowercase();
        Ok(facets
            .selections
            .into_iter()
            .find(|selection| selection.matches(&normalized_value))
            .map(|selection| SlotValue::String(selection.name))
            .unwrap_or(SlotValue::Null))
    }
}
