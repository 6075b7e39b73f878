pub mod tagging_utils;

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;

use crate::errors::*;
use crate::models::Metadata;
use crate::posteriors::PosteriorBuffer;
use crate::tokens::EncodedTokens;
use crate::utils::{SlotName, TagLabel};

pub use self::tagging_utils::{tag_name_to_slot_name, tags_to_slot_ranges, Tag};

pub type RawSlots = BTreeMap<SlotName, String>;

/// Picks the best tag of each token, reading one window of tag scores per
/// token.
pub fn decode_tags(
    mut tag_posteriors: PosteriorBuffer,
    nb_tokens: usize,
    metadata: &Metadata,
) -> Result<Vec<TagLabel>> {
    let nb_tags = metadata.nb_tags();
    let tags = (0..nb_tokens)
        .map(|_| {
            let prediction = tag_posteriors.read_argmax(nb_tags)?;
            Ok(metadata.tags[prediction.index].clone())
        })
        .collect::<Result<Vec<_>>>()?;
    debug!("Tag labels: [{}]", tags.iter().join(", "));
    Ok(tags)
}

/// Turns token spans into raw slot values. Spans are visited by increasing
/// start, and values of spans sharing a slot name are joined with a space.
pub fn assemble_raw_slots<T: EncodedTokens + ?Sized>(
    slot_ranges: &BTreeMap<usize, usize>,
    tags: &[TagLabel],
    tokens: &T,
) -> Result<RawSlots> {
    let mut slots = RawSlots::new();
    for (&start, &end) in slot_ranges {
        let value = tokens.decode_range(start..end, true)?;
        let slot_name = tag_name_to_slot_name(&tags[start]);
        match slots.entry(slot_name) {
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                current.push(' ');
                current.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(slots)
}

/// Decodes the tag scores of an utterance into its raw slot values.
pub fn get_raw_slots<T: EncodedTokens + ?Sized>(
    tag_posteriors: PosteriorBuffer,
    tokens: &T,
    metadata: &Metadata,
) -> Result<RawSlots> {
    let tags = decode_tags(tag_posteriors, tokens.len(), metadata)?;
    let slot_ranges = tags_to_slot_ranges(&tags);
    assemble_raw_slots(&slot_ranges, &tags, tokens)
}
