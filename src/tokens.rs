use std::ops::Range;

use failure::format_err;
use itertools::Itertools;

use crate::errors::*;

pub type TokenId = i32;

/// Tokenized form of one utterance, as fed to the model.
pub trait EncodedTokens {
    fn ids(&self) -> &[TokenId];

    fn len(&self) -> usize {
        self.ids().len()
    }

    fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    /// Rebuilds the original text covered by the tokens in `range`.
    fn decode_range(&self, range: Range<usize>, drop_special: bool) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Index of the original word the token was cut from
    Word(usize),
    /// Control token inserted by the encoder, with its surface text
    Special(String),
}

/// Tokens aligned on the whitespace-separated words of the utterance.
///
/// Sub-word pieces of one word share the same `TokenOrigin::Word`, so that any
/// token range decodes to whole words.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTokens {
    words: Vec<String>,
    ids: Vec<TokenId>,
    origins: Vec<TokenOrigin>,
}

impl AlignedTokens {
    pub fn new(words: Vec<String>, ids: Vec<TokenId>, origins: Vec<TokenOrigin>) -> Result<Self> {
        if ids.len() != origins.len() {
            return Err(format_err!(
                "Got {} token ids but {} token origins",
                ids.len(),
                origins.len()
            ));
        }
        if let Some(index) = origins.iter().find_map(|origin| match origin {
            TokenOrigin::Word(index) if *index >= words.len() => Some(*index),
            _ => None,
        }) {
            return Err(format_err!(
                "Token aligned on word {} but utterance only has {} words",
                index,
                words.len()
            ));
        }
        Ok(Self {
            words,
            ids,
            origins,
        })
    }

    /// One token per word, token ids being word positions.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(|word| word.into()).collect();
        let ids = (0..words.len() as TokenId).collect();
        let origins = (0..words.len()).map(TokenOrigin::Word).collect();
        Self {
            words,
            ids,
            origins,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl EncodedTokens for AlignedTokens {
    fn ids(&self) -> &[TokenId] {
        &self.ids
    }

    fn decode_range(&self, range: Range<usize>, drop_special: bool) -> Result<String> {
        if range.start > range.end || range.end > self.len() {
            return Err(NluDecodeError::TokenRange {
                num_tokens: self.len(),
                range,
            }
            .into());
        }
        Ok(self.origins[range]
            .iter()
            .filter(|origin| !drop_special || !is_special(origin))
            .dedup_by(|lhs, rhs| match (lhs, rhs) {
                (TokenOrigin::Word(lhs), TokenOrigin::Word(rhs)) => lhs == rhs,
                _ => false,
            })
            .map(|origin| match origin {
                TokenOrigin::Word(index) => &*self.words[*index],
                TokenOrigin::Special(text) => &**text,
            })
            .join(" "))
    }
}

fn is_special(origin: &TokenOrigin) -> bool {
    match origin {
        TokenOrigin::Special(_) => true,
        TokenOrigin::Word(_) => false,
    }
}
