use failure::format_err;
use ndarray::prelude::*;

use crate::errors::*;

pub type Probability = f32;

const SCORE_BYTES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub score: Probability,
}

/// Flat buffer of class scores consumed front to back.
///
/// The cursor only moves forward: every call to `read_argmax` consumes its
/// window, and stages of the decoder take the buffer by value so that a buffer
/// cannot outlive the decode call it was created for.
#[derive(Debug)]
pub struct PosteriorBuffer {
    scores: Array1<Probability>,
    cursor: usize,
}

impl PosteriorBuffer {
    pub fn new(scores: Array1<Probability>) -> Self {
        Self { scores, cursor: 0 }
    }

    /// Reads scores serialized as consecutive little-endian `f32` values, which
    /// is how tensor runtimes expose their output buffers.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % SCORE_BYTES != 0 {
            return Err(format_err!(
                "Posterior buffer of {} bytes is not a sequence of f32 values",
                bytes.len()
            ));
        }
        let scores = bytes
            .chunks_exact(SCORE_BYTES)
            .map(|chunk| Probability::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        Ok(Self::new(Array1::from_iter(scores)))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.scores.len() - self.cursor
    }

    /// Consumes the next `window` scores and returns the best one. Ties go to
    /// the lowest index.
    pub fn read_argmax(&mut self, window: usize) -> Result<Prediction> {
        if window == 0 {
            return Err(NluDecodeError::EmptyWindow.into());
        }
        let remaining = self.remaining();
        if remaining < window {
            return Err(NluDecodeError::BufferUnderflow {
                required: window,
                remaining,
            }
            .into());
        }
        let prediction = argmax(self.scores.slice(s![self.cursor..self.cursor + window]));
        self.cursor += window;
        Ok(prediction)
    }
}

fn argmax(scores: ArrayView1<Probability>) -> Prediction {
    let first = Prediction {
        index: 0,
        score: scores[0],
    };
    scores
        .indexed_iter()
        .skip(1)
        .fold(first, |best, (index, &score)| {
            if score > best.score {
                Prediction { index, score }
            } else {
                best
            }
        })
}

impl From<Array1<Probability>> for PosteriorBuffer {
    fn from(scores: Array1<Probability>) -> Self {
        Self::new(scores)
    }
}

impl From<Vec<Probability>> for PosteriorBuffer {
    fn from(scores: Vec<Probability>) -> Self {
        Self::new(Array1::from(scores))
    }
}

/// Rows are tokens and columns are tags, flattened token-major.
impl From<Array2<Probability>> for PosteriorBuffer {
    fn from(scores: Array2<Probability>) -> Self {
        Self::new(Array1::from_iter(scores.iter().cloned()))
    }
}
