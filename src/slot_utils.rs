use std::collections::BTreeMap;

use failure::format_err;
use log::warn;

use crate::errors::*;
use crate::models::{IntentMetadata, SlotMetadata};
use crate::ontology::{Slot, SlotValue};
use crate::slot_filler::RawSlots;
use crate::slot_parser::SlotParserRegistry;
use crate::utils::SlotName;

pub type Slots = BTreeMap<SlotName, Slot>;

/// Builds the typed slots of an intent. Slots extracted from the utterance
/// take precedence over the defaults declared in the intent metadata.
pub fn resolve_slots(
    intent: &IntentMetadata,
    raw_slots: RawSlots,
    registry: &SlotParserRegistry,
) -> Result<Slots> {
    let implicit_slots = get_implicit_slots(intent);
    let explicit_slots = raw_slots
        .into_iter()
        .map(|(slot_name, raw_value)| {
            let slot = resolve_slot(intent, slot_name, raw_value, registry)?;
            Ok((slot.name.clone(), slot))
        })
        .collect::<Result<Slots>>()?;
    Ok(implicit_slots.into_iter().chain(explicit_slots).collect())
}

pub fn get_implicit_slots(intent: &IntentMetadata) -> Slots {
    intent
        .implicit_slot_values()
        .map(|(slot, value)| (slot.name.clone(), Slot::implicit(slot.name.clone(), value.clone())))
        .collect()
}

fn resolve_slot(
    intent: &IntentMetadata,
    slot_name: SlotName,
    raw_value: String,
    registry: &SlotParserRegistry,
) -> Result<Slot> {
    match intent.get_slot(&slot_name) {
        Some(slot) => {
            let value = parse_slot_value(slot, &raw_value, registry).map_err(|cause| {
                NluDecodeError::SlotParsing {
                    slot_name: slot_name.clone(),
                    cause,
                }
            })?;
            Ok(Slot::new(slot_name, raw_value, value))
        }
        None => {
            warn!("No '{}' slot in '{}' intent", slot_name, intent.name);
            Ok(Slot::unparsed(slot_name, raw_value))
        }
    }
}

fn parse_slot_value(
    slot: &SlotMetadata,
    raw_value: &str,
    registry: &SlotParserRegistry,
) -> Result<SlotValue> {
    registry
        .get(&slot.slot_type)
        .ok_or_else(|| format_err!("No parser registered for slot type '{}'", slot.slot_type))?
        .parse(&slot.facets, raw_value)
}
