use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::Deserialize;

use crate::errors::*;
use crate::models::Facets;
use crate::ontology::SlotValue;

use super::{deserialize_facets, SlotParser};

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"^(-?\d+)(?:st|nd|rd|th)?$").unwrap();
    static ref NUMBER_WORDS: HashMap<&'static str, i64> = [
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
        ("first", 1),
        ("second", 2),
        ("third", 3),
        ("fourth", 4),
        ("fifth", 5),
        ("sixth", 6),
        ("seventh", 7),
        ("eighth", 8),
        ("ninth", 9),
        ("tenth", 10),
        ("eleventh", 11),
        ("twelfth", 12),
        ("thirteenth", 13),
        ("fourteenth", 14),
        ("fifteenth", 15),
        ("sixteenth", 16),
        ("seventeenth", 17),
        ("eighteenth", 18),
        ("nineteenth", 19),
        ("twentieth", 20),
        ("thirtieth", 30),
        ("fortieth", 40),
        ("fiftieth", 50),
        ("sixtieth", 60),
        ("seventieth", 70),
        ("eightieth", 80),
        ("ninetieth", 90),
    ]
    .iter()
    .cloned()
    .collect();
    static ref SCALES: HashMap<&'static str, i64> = [
        ("thousand", 1_000),
        ("thousandth", 1_000),
        ("million", 1_000_000),
        ("millionth", 1_000_000),
        ("billion", 1_000_000_000),
        ("billionth", 1_000_000_000),
    ]
    .iter()
    .cloned()
    .collect();
}

const HUNDRED: i64 = 100;

#[derive(Debug, Default, Deserialize)]
struct IntegerFacets {
    /// Accepted values, lower bound inclusive and upper bound exclusive
    #[serde(default)]
    range: Option<(i64, i64)>,
}

/// Parses whole numbers written with digits or spelled out in English,
/// cardinal or ordinal.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerParser;

impl SlotParser for IntegerParser {
    fn parse(&self, facets: &Facets, raw_value: &str) -> Result<SlotValue> {
        let facets: IntegerFacets = deserialize_facets(facets)?;
        let value = parse_integer(raw_value).filter(|value| {
            facets
                .range
                .map(|(min, max)| *value >= min && *value < max)
                .unwrap_or(true)
        });
        Ok(value.map(SlotValue::from).unwrap_or(SlotValue::Null))
    }
}

fn parse_integer(raw_value: &str) -> Option<i64> {
    let normalized = raw_value.trim().to_lowercase().replace(',', "");
    parse_numeric(&normalized).or_else(|| parse_number_words(&normalized))
}

fn parse_numeric(word: &str) -> Option<i64> {
    NUMERIC
        .captures(word)
        .and_then(|captures| captures[1].parse().ok())
}

/// Grammatical class of a number word, used to reject word sequences that do
/// not spell a single number, such as "one two" or "twenty thirty".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberWord {
    Zero,
    Unit(i64),
    Teen(i64),
    Tens(i64),
    Hundred,
    Scale(i64),
    Figure(i64),
}

impl NumberWord {
    fn from_word(word: &str) -> Option<NumberWord> {
        if let Some(&value) = NUMBER_WORDS.get(word) {
            return Some(match value {
                0 => NumberWord::Zero,
                1..=9 => NumberWord::Unit(value),
                10..=19 => NumberWord::Teen(value),
                _ => NumberWord::Tens(value),
            });
        }
        if word == "hundred" || word == "hundredth" {
            return Some(NumberWord::Hundred);
        }
        if let Some(&scale) = SCALES.get(word) {
            return Some(NumberWord::Scale(scale));
        }
        parse_numeric(word).map(NumberWord::Figure)
    }

    fn can_follow(self, previous: Option<NumberWord>) -> bool {
        use self::NumberWord::*;
        match (previous, self) {
            (None, _) => true,
            (Some(Zero), _) | (_, Zero) => false,
            (Some(Tens(_)), Unit(_)) => true,
            (Some(Hundred), Unit(_)) | (Some(Hundred), Teen(_)) | (Some(Hundred), Tens(_)) => {
                true
            }
            (Some(Scale(_)), Unit(_)) | (Some(Scale(_)), Teen(_)) | (Some(Scale(_)), Tens(_)) => {
                true
            }
            (Some(Unit(_)), Hundred)
            | (Some(Teen(_)), Hundred)
            | (Some(Tens(_)), Hundred)
            | (Some(Figure(_)), Hundred) => true,
            (Some(Scale(_)), Scale(_)) => false,
            (Some(_), Scale(_)) => true,
            _ => false,
        }
    }
}

fn parse_number_words(text: &str) -> Option<i64> {
    let mut words = text
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| !word.is_empty())
        .peekable();
    let sign = match words.peek() {
        Some(&"minus") | Some(&"negative") => {
            words.next();
            -1
        }
        _ => 1,
    };
    let mut total: i64 = 0;
    let mut current: i64 = 0;
    let mut previous: Option<NumberWord> = None;
    let mut last_scale: Option<i64> = None;
    for word in words {
        // "a hundred", "three hundred and five"
        if word == "a" || word == "and" {
            continue;
        }
        let number_word = NumberWord::from_word(word)?;
        if !number_word.can_follow(previous) {
            return None;
        }
        match number_word {
            NumberWord::Zero => {}
            NumberWord::Unit(value)
            | NumberWord::Teen(value)
            | NumberWord::Tens(value)
            | NumberWord::Figure(value) => current = current.checked_add(value)?,
            NumberWord::Hundred => {
                if current >= HUNDRED {
                    return None;
                }
                current = current.max(1).checked_mul(HUNDRED)?;
            }
            NumberWord::Scale(scale) => {
                // Scales only decrease: "two million three thousand"
                if last_scale.map(|last| scale >= last).unwrap_or(false) {
                    return None;
                }
                total = total.checked_add(current.max(1).checked_mul(scale)?)?;
                current = 0;
                last_scale = Some(scale);
            }
        }
        previous = Some(number_word);
    }
    if previous.is_none() {
        return None;
    }
    total.checked_add(current).map(|value| sign * value)
}
