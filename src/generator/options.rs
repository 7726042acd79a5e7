use std::collections::HashSet;

use crate::generator::random::Randomizer;

pub const MAX_OPTIONS: usize = 4;
pub const MIN_OPTIONS: usize = 2;

/// Builds a shuffled option list holding `correct` exactly once plus up to
/// `limit - 1` distinct distractors drawn from `pool`.
///
/// The pool is deduplicated before sampling, so duplicates never eat into the
/// option budget. Fewer than `limit` options come back when the pool runs dry.
pub fn build_options<I, R>(correct: &str, pool: I, limit: usize, rng: &mut R) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    R: Randomizer,
{
    let limit = limit.clamp(1, MAX_OPTIONS);
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(correct.to_string());

    let mut distractors: Vec<String> = pool
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect();
    rng.shuffle(&mut distractors);
    distractors.truncate(limit - 1);

    let mut options = distractors;
    options.push(correct.to_string());
    rng.shuffle(&mut options);
    options
}
