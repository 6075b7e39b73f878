use std::ops::Range;

use failure::Fail;

use crate::utils::SlotName;

#[derive(Debug, Fail)]
pub enum NluDecodeError {
    #[fail(
        display = "Posterior buffer underflow: {} scores required but only {} remaining",
        required, remaining
    )]
    BufferUnderflow { required: usize, remaining: usize },
    #[fail(display = "Cannot compute arg-max over an empty window")]
    EmptyWindow,
    #[fail(display = "Error parsing slot '{}'", slot_name)]
    SlotParsing {
        slot_name: SlotName,
        #[cause]
        cause: failure::Error,
    },
    #[fail(
        display = "Token range {:?} is out of bounds for {} tokens",
        range, num_tokens
    )]
    TokenRange {
        range: Range<usize>,
        num_tokens: usize,
    },
    #[fail(display = "Invalid NLU metadata: {}", _0)]
    InvalidMetadata(String),
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
