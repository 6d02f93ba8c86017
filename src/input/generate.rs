//! Seeded random inputs
//!
//! A seed is any string. It is hashed with `FxHasher` into a `StdRng`, so the
//! same seed and config always reproduce the same input.

use crate::config::MAX_INPUT_LEN;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// Arrangement of the generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    #[default]
    Random,
    Sorted,
    Reversed,
    /// Sorted, then a few adjacent pairs swapped
    NearlySorted,
    /// Drawn from at most four distinct values
    FewUnique,
    /// A bracket string, balanced when the length is even
    Brackets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub len: usize,
    pub min: i64,
    pub max: i64,
    pub shape: Shape,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            len: 10,
            min: 1,
            max: 99,
            shape: Shape::Random,
        }
    }
}

/// An input together with the seed that reproduces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedInput {
    pub input: Vec<i64>,
    pub seed: String,
}

#[derive(Debug, Clone, Default)]
pub struct InputGenerator {
    config: GeneratorConfig,
}

impl InputGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        InputGenerator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate from `seed`, or from a fresh seed when none is given
    pub fn generate(&self, seed: Option<&str>) -> GeneratedInput {
        let seed = match seed {
            Some(seed) => seed.to_string(),
            None => format!("{:016x}", rand::rng().random::<u64>()),
        };
        let mut rng = seeded_rng(&seed);
        let input = self.fill(&mut rng);
        tracing::debug!(seed = %seed, len = input.len(), shape = ?self.config.shape, "generated input");
        GeneratedInput { input, seed }
    }

    fn fill(&self, rng: &mut StdRng) -> Vec<i64> {
        let len = self.config.len.min(MAX_INPUT_LEN);
        let (min, max) = if self.config.min <= self.config.max {
            (self.config.min, self.config.max)
        } else {
            (self.config.max, self.config.min)
        };
        let mut values: Vec<i64> = (0..len).map(|_| rng.random_range(min..=max)).collect();

        match self.config.shape {
            Shape::Random => {}
            Shape::Sorted => values.sort_unstable(),
            Shape::Reversed => {
                values.sort_unstable();
                values.reverse();
            }
            Shape::NearlySorted => {
                values.sort_unstable();
                if len > 1 {
                    for _ in 0..(len / 8).max(1) {
                        let i = rng.random_range(0..len - 1);
                        values.swap(i, i + 1);
                    }
                }
            }
            Shape::FewUnique => {
                let pool: Vec<i64> = (0..(len / 4).clamp(1, 4))
                    .map(|_| rng.random_range(min..=max))
                    .collect();
                for value in values.iter_mut() {
                    *value = pool[rng.random_range(0..pool.len())];
                }
            }
            Shape::Brackets => values = brackets(rng, len),
        }
        values
    }
}

fn brackets(rng: &mut StdRng, len: usize) -> Vec<i64> {
    const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];
    let mut open: Vec<char> = Vec::new();
    let mut out = Vec::with_capacity(len);
    for remaining in (1..=len).rev() {
        let must_close = open.len() >= remaining;
        let may_close = !open.is_empty();
        if must_close || (may_close && rng.random_bool(0.5)) {
            if let Some(close) = open.pop() {
                out.push(close as i64);
                continue;
            }
        }
        let (l, r) = PAIRS[rng.random_range(0..PAIRS.len())];
        open.push(r);
        out.push(l as i64);
    }
    out
}

/// Deterministic RNG for an opaque seed string
pub fn seeded_rng(seed: &str) -> StdRng {
    let mut hasher = FxHasher::default();
    hasher.write(seed.as_bytes());
    StdRng::seed_from_u64(hasher.finish())
}
