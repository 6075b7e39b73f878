mod digits;
mod entity;
mod integer;
mod selset;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use failure::ResultExt;
use serde::de::DeserializeOwned;

use crate::errors::*;
use crate::models::Facets;
use crate::ontology::SlotValue;
use crate::utils::SlotType;

pub use self::digits::DigitsParser;
pub use self::entity::EntityParser;
pub use self::integer::IntegerParser;
pub use self::selset::SelsetParser;

pub const ENTITY_SLOT_TYPE: &str = "entity";
pub const INTEGER_SLOT_TYPE: &str = "integer";
pub const DIGITS_SLOT_TYPE: &str = "digits";
pub const SELSET_SLOT_TYPE: &str = "selset";

/// Interprets the raw text of a slot according to its type.
///
/// A parser returns `SlotValue::Null` when the text does not denote a value of
/// its type, and an error when it cannot do its job at all, typically because
/// of malformed facets.
pub trait SlotParser: Send + Sync {
    fn parse(&self, facets: &Facets, raw_value: &str) -> Result<SlotValue>;
}

impl<F> SlotParser for F
where
    F: Fn(&Facets, &str) -> Result<SlotValue> + Send + Sync,
{
    fn parse(&self, facets: &Facets, raw_value: &str) -> Result<SlotValue> {
        self(facets, raw_value)
    }
}

/// Slot parsers indexed by slot type. Built once, then only read.
#[derive(Clone, Default)]
pub struct SlotParserRegistry {
    parsers: HashMap<SlotType, Arc<dyn SlotParser>>,
}

impl SlotParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtin_parsers() -> Self {
        Self::new()
            .register(ENTITY_SLOT_TYPE, EntityParser)
            .register(INTEGER_SLOT_TYPE, IntegerParser)
            .register(DIGITS_SLOT_TYPE, DigitsParser)
            .register(SELSET_SLOT_TYPE, SelsetParser)
    }

    /// Adds a parser, replacing any parser already registered for `slot_type`.
    pub fn register<S, P>(mut self, slot_type: S, parser: P) -> Self
    where
        S: Into<SlotType>,
        P: SlotParser + 'static,
    {
        self.parsers.insert(slot_type.into(), Arc::new(parser) as _);
        self
    }

    pub fn get(&self, slot_type: &str) -> Option<&dyn SlotParser> {
        self.parsers.get(slot_type).map(|parser| &**parser)
    }

    pub fn slot_types(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(|slot_type| &**slot_type)
    }
}

impl fmt::Debug for SlotParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut slot_types: Vec<&str> = self.slot_types().collect();
        slot_types.sort();
        f.debug_struct("SlotParserRegistry")
            .field("slot_types", &slot_types)
            .finish()
    }
}

fn deserialize_facets<T: DeserializeOwned>(facets: &Facets) -> Result<T> {
    Ok(serde_json::from_value(SlotValue::Object(facets.clone()))
        .with_context(|_| format!("Invalid slot facets: {}", SlotValue::Object(facets.clone())))?)
}
