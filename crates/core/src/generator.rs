//! Question generation: session sampling, option sets and word pools.
//!
//! Every function takes the random source as an argument so callers can pass a
//! seeded `StdRng` and replay a session exactly.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::VocabularyItem;

/// Random draws allowed per pool item while collecting distractors.
pub const DISTRACTOR_DRAWS_PER_ITEM: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("item pool is empty")]
    EmptyPool,

    #[error("need {required} distinct options but only found {found}")]
    InsufficientDistractors { required: usize, found: usize },

    #[error("option count must be > 0")]
    InvalidOptionCount,
}

/// Draws `min(sample_size, pool.len())` items without replacement, in random order.
///
/// Selection is by index, so equal values stored at different positions may both
/// be picked.
///
/// # Errors
///
/// Returns `GeneratorError::EmptyPool` if `pool` is empty and `sample_size > 0`.
pub fn build_sequence<T, R>(
    rng: &mut R,
    pool: &[T],
    sample_size: usize,
) -> Result<Vec<T>, GeneratorError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if sample_size == 0 {
        return Ok(Vec::new());
    }
    if pool.is_empty() {
        return Err(GeneratorError::EmptyPool);
    }

    let mut indices: Vec<usize> = (0..pool.len()).collect();
    indices.shuffle(rng);
    Ok(indices
        .into_iter()
        .take(sample_size)
        .map(|idx| pool[idx].clone())
        .collect())
}

/// Builds `count` distinct options for a question whose answer is `correct`.
///
/// The correct answer is always present. Other options are `original` values
/// drawn uniformly from `pool`; duplicates are dropped. The returned order is
/// shuffled.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidOptionCount` for `count == 0`, and
/// `GeneratorError::InsufficientDistractors` if the pool cannot supply enough
/// distinct values or the draw budget (`pool.len() * 10`) runs out.
pub fn build_distractors<R>(
    rng: &mut R,
    correct: &str,
    pool: &[VocabularyItem],
    count: usize,
) -> Result<Vec<String>, GeneratorError>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Err(GeneratorError::InvalidOptionCount);
    }

    let available: HashSet<&str> = pool
        .iter()
        .map(VocabularyItem::original)
        .chain(std::iter::once(correct))
        .collect();
    if available.len() < count {
        return Err(GeneratorError::InsufficientDistractors {
            required: count,
            found: available.len(),
        });
    }

    // A Vec keeps insertion order stable for a given seed; `count` is tiny.
    let mut options = vec![correct.to_owned()];
    let budget = pool.len().saturating_mul(DISTRACTOR_DRAWS_PER_ITEM);
    let mut draws = 0_usize;
    while options.len() < count {
        if draws >= budget {
            return Err(GeneratorError::InsufficientDistractors {
                required: count,
                found: options.len(),
            });
        }
        draws += 1;

        let candidate = pool[rng.random_range(0..pool.len())].original();
        if !options.iter().any(|option| option == candidate) {
            options.push(candidate.to_owned());
        }
    }

    options.shuffle(rng);
    Ok(options)
}

/// Returns the words of a sentence in shuffled order, ready to be picked.
#[must_use]
pub fn shuffled_tokens<R>(rng: &mut R, words: &[String]) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut tokens = words.to_vec();
    tokens.shuffle(rng);
    tokens
}
