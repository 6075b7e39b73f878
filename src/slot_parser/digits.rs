use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::Deserialize;

use crate::errors::*;
use crate::models::Facets;
use crate::ontology::SlotValue;

use super::{deserialize_facets, SlotParser};

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"^\d+$").unwrap();
}

#[derive(Debug, Deserialize)]
struct DigitsFacets {
    #[serde(default)]
    count: Option<usize>,
}

/// Reads a sequence of digits, such as a phone or a confirmation number, whether
/// the digits were transcribed as figures or as spoken words.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitsParser;

impl SlotParser for DigitsParser {
    fn parse(&self, facets: &Facets, raw_value: &str) -> Result<SlotValue> {
        let facets: DigitsFacets = deserialize_facets(facets)?;
        let digits = parse_digits(raw_value).filter(|digits| {
            facets
                .count
                .map(|count| digits.len() == count)
                .unwrap_or(true)
        });
        Ok(digits.map(SlotValue::String).unwrap_or(SlotValue::Null))
    }
}

fn parse_digits(raw_value: &str) -> Option<String> {
    let mut digits = String::new();
    for word in raw_value
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| !word.is_empty())
    {
        let word = word.to_lowercase();
        if DIGITS.is_match(&word) {
            digits.push_str(&word);
        } else {
            digits.push(spoken_digit(&word)?);
        }
    }
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

fn spoken_digit(word: &str) -> Option<char> {
    match word {
        "zero" | "oh" | "o" => Some('0'),
        "one" => Some('1'),
        "two" => Some('2'),
        "three" => Some('3'),
        "four" => Some('4'),
        "five" => Some('5'),
        "six" => Some('6'),
        "seven" => Some('7'),
        "eight" => Some('8'),
        "nine" => Some('9'),
        _ => None,
    }
}
