//! Multiple-choice option generation
//!
//! Distractors sit within a few units of the answer and are always positive.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_DISTRACTOR_OFFSET, MAX_OPTIONS, OPTION_ATTEMPTS};

/// Shuffled answer choices. Holds the answer plus up to three distractors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(Vec<i64>);

impl OptionSet {
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.0.contains(&value)
    }
}

/// Build a shuffled option set around `answer`
///
/// Returns fewer than four entries when the attempt budget runs out, which
/// happens when the answer is near or below zero.
pub fn generate_options<R: Rng + ?Sized>(answer: i64, rng: &mut R) -> OptionSet {
    let mut options = Vec::with_capacity(MAX_OPTIONS);
    options.push(answer);

    let mut attempts = 0;
    while options.len() < MAX_OPTIONS && attempts < OPTION_ATTEMPTS {
        attempts += 1;

        let mut offset = rng.random_range(1..=MAX_DISTRACTOR_OFFSET);
        if rng.random_bool(0.5) {
            offset = -offset;
        }

        let candidate = answer + offset;
        if candidate > 0 && !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    if options.len() < MAX_OPTIONS {
        log::debug!(
            "Only {} options for answer {} after {} attempts",
            options.len(),
            answer,
            attempts
        );
    }

    options.shuffle(rng);
    OptionSet(options)
}
