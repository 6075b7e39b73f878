use std::collections::BTreeMap;

use crate::utils::SlotName;

pub const OUTSIDE: &str = "o";
const BEGINNING_PREFIX: char = 'b';
const PREFIX_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Outside,
    Beginning,
    Inside,
}

impl Tag {
    /// Anything that is neither `o` nor a `b` label continues the current slot.
    pub fn from_label(label: &str) -> Tag {
        if label == OUTSIDE {
            Tag::Outside
        } else if label.starts_with(BEGINNING_PREFIX) {
            Tag::Beginning
        } else {
            Tag::Inside
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanState {
    Outside,
    Inside(usize),
}

pub fn tag_name_to_slot_name(tag: &str) -> SlotName {
    tag.chars().skip(PREFIX_LEN).collect()
}

/// Decodes a BIO label sequence into token spans, keyed by the index of their
/// first token and mapped to their exclusive end.
///
/// A continuation label with no open span is dropped, and a span keeps the
/// slot of its opening label whatever its continuation labels say.
pub fn tags_to_slot_ranges<S: AsRef<str>>(tags: &[S]) -> BTreeMap<usize, usize> {
    let mut ranges = BTreeMap::new();
    let mut state = SpanState::Outside;
    for (i, tag) in tags.iter().enumerate() {
        state = match (Tag::from_label(tag.as_ref()), state) {
            (Tag::Outside, _) => SpanState::Outside,
            (Tag::Beginning, _) => {
                ranges.insert(i, i + 1);
                SpanState::Inside(i)
            }
            (Tag::Inside, SpanState::Inside(start)) => {
                ranges.insert(start, i + 1);
                SpanState::Inside(start)
            }
            (Tag::Inside, SpanState::Outside) => SpanState::Outside,
        };
    }
    ranges
}
