use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use failure::ResultExt;
use log::info;
use serde::de::{self, Deserializer};
use serde_derive::Deserialize;

use crate::errors::*;
use crate::utils::{IntentName, SlotName, SlotType, TagLabel};

pub type Facets = serde_json::Map<String, serde_json::Value>;

/// Static description of a trained model's output space: the intents it can
/// predict, in score order, and the tag vocabulary of its slot tagger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metadata {
    pub intents: Vec<IntentMetadata>,
    pub tags: Vec<TagLabel>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntentMetadata {
    pub name: IntentName,
    #[serde(default)]
    pub slots: Vec<SlotMetadata>,
    #[serde(default)]
    pub implicit_slots: Vec<SlotMetadata>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotMetadata {
    pub name: SlotName,
    #[serde(rename = "type")]
    pub slot_type: SlotType,
    #[serde(default, deserialize_with = "deserialize_facets")]
    pub facets: Facets,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl Metadata {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading NLU metadata ({:?}) ...", path.as_ref());
        let metadata_file = File::open(&path).with_context(|_| {
            format!("Cannot open NLU metadata file '{:?}'", path.as_ref())
        })?;
        let metadata: Metadata = serde_json::from_reader(metadata_file)
            .with_context(|_| "Cannot deserialize NLU metadata json data")?;
        metadata.validate()?;
        info!(
            "NLU metadata loaded ({} intents, {} tags)",
            metadata.intents.len(),
            metadata.tags.len()
        );
        Ok(metadata)
    }

    pub fn nb_intents(&self) -> usize {
        self.intents.len()
    }

    pub fn nb_tags(&self) -> usize {
        self.tags.len()
    }

    pub fn get_intent(&self, name: &str) -> Option<&IntentMetadata> {
        self.intents.iter().find(|intent| intent.name == name)
    }

    fn validate(&self) -> Result<()> {
        if self.intents.is_empty() {
            return Err(NluDecodeError::InvalidMetadata("no intent declared".to_string()).into());
        }
        if self.tags.is_empty() {
            return Err(NluDecodeError::InvalidMetadata("no tag label declared".to_string()).into());
        }
        Ok(())
    }
}

impl FromStr for Metadata {
    type Err = failure::Error;

    fn from_str(s: &str) -> Result<Self> {
        let metadata: Metadata =
            serde_json::from_str(s).with_context(|_| "Cannot deserialize NLU metadata json data")?;
        metadata.validate()?;
        Ok(metadata)
    }
}

impl IntentMetadata {
    /// Looks a slot up among the declared slots first, then among the implicit
    /// ones.
    pub fn get_slot(&self, name: &str) -> Option<&SlotMetadata> {
        self.slots
            .iter()
            .chain(self.implicit_slots.iter())
            .find(|slot| slot.name == name)
    }

    /// Slots whose value is supplied by the metadata rather than the utterance.
    pub fn implicit_slot_values(&self) -> impl Iterator<Item = (&SlotMetadata, &serde_json::Value)> {
        self.slots
            .iter()
            .chain(self.implicit_slots.iter())
            .filter_map(|slot| slot.value.as_ref().map(|value| (slot, value)))
    }
}

// Exported models store facets as a JSON document embedded in a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFacets {
    Encoded(String),
    Decoded(Facets),
}

fn deserialize_facets<'de, D>(deserializer: D) -> ::std::result::Result<Facets, D::Error>
where
    D: Deserializer<'de>,
{
    match <Option<RawFacets> as serde::Deserialize>::deserialize(deserializer)? {
        None => Ok(Facets::new()),
        Some(RawFacets::Decoded(facets)) => Ok(facets),
        Some(RawFacets::Encoded(ref encoded)) if encoded.trim().is_empty() => Ok(Facets::new()),
        Some(RawFacets::Encoded(encoded)) => {
            serde_json::from_str(&encoded).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_load_from_path() {
        // Given
        let metadata_path = Path::new("data")
            .join("tests")
            .join("metadata")
            .join("nlu.json");

        // When
        let metadata = Metadata::from_path(metadata_path).unwrap();

        // Then
        assert_eq!(3, metadata.nb_intents());
        assert_eq!(
            vec!["o", "b_unit", "i_unit", "b_location", "i_location", "b_count", "i_count"],
            metadata.tags
        );
        let forecast = metadata.get_intent("weather.forecast").unwrap();
        let unit = forecast.get_slot("unit").unwrap();
        assert_eq!("selset", unit.slot_type);
        assert_eq!(Some(json!("celsius")), unit.value);
        assert!(unit.facets.contains_key("selections"));
    }

    #[test]
    fn test_facets_can_be_encoded_or_decoded() {
        // Given
        let encoded = r#"{
            "intents": [{"name": "count", "slots": [
                {"name": "n", "type": "integer", "facets": "{\"range\": [1, 10]}"}
            ]}],
            "tags": ["o"]
        }"#;
        let decoded = r#"{
            "intents": [{"name": "count", "slots": [
                {"name": "n", "type": "integer", "facets": {"range": [1, 10]}}
            ]}],
            "tags": ["o"]
        }"#;

        // When
        let from_encoded = Metadata::from_str(encoded).unwrap();
        let from_decoded = Metadata::from_str(decoded).unwrap();

        // Then
        assert_eq!(from_encoded, from_decoded);
        assert_eq!(
            Some(&json!([1, 10])),
            from_encoded.intents[0].slots[0].facets.get("range")
        );
    }

    #[test]
    fn test_missing_or_empty_facets_are_empty() {
        // Given
        let data = r#"{
            "intents": [{"name": "greet", "slots": [
                {"name": "who", "type": "entity"},
                {"name": "greeting", "type": "entity", "facets": ""},
                {"name": "mood", "type": "entity", "facets": null}
            ]}],
            "tags": ["o"]
        }"#;

        // When
        let metadata = Metadata::from_str(data).unwrap();

        // Then
        assert!(metadata.intents[0]
            .slots
            .iter()
            .all(|slot| slot.facets.is_empty()));
    }

    #[test]
    fn test_rejects_metadata_without_intents_or_tags() {
        let no_intents = r#"{"intents": [], "tags": ["o"]}"#;
        let no_tags = r#"{"intents": [{"name": "greet"}], "tags": []}"#;

        for data in &[no_intents, no_tags] {
            let error = Metadata::from_str(data).unwrap_err();
            match error.downcast_ref::<NluDecodeError>() {
                Some(NluDecodeError::InvalidMetadata(_)) => (),
                _ => panic!("unexpected error: {}", error),
            }
        }
    }

    #[test]
    fn test_implicit_slots_include_declared_defaults() {
        // Given
        let data = r#"{
            "intents": [{
                "name": "weather.forecast",
                "slots": [
                    {"name": "unit", "type": "entity", "value": "celsius"},
                    {"name": "location", "type": "entity"}
                ],
                "implicit_slots": [{"name": "scope", "type": "entity", "value": "today"}]
            }],
            "tags": ["o"]
        }"#;
        let metadata = Metadata::from_str(data).unwrap();

        // When
        let implicit_names: Vec<&str> = metadata.intents[0]
            .implicit_slot_values()
            .map(|(slot, _)| &*slot.name)
            .collect();

        // Then
        assert_eq!(vec!["unit", "scope"], implicit_names);
        assert!(metadata.intents[0].get_slot("scope").is_some());
        assert!(metadata.intents[0].get_slot("date").is_none());
    }
}
