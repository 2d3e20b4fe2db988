//! Fitness evaluation.
//!
//! A [`FitnessFunction`] scores single genomes; its provided
//! [`FitnessFunction::evaluate`] method scores a whole population and caches
//! the best member according to the function's [`Direction`].

use std::{cmp::Ordering, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{genome::Genome, population::Population};

/// Whether higher or lower fitness is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

impl Direction {
    /// Whether `candidate` beats `incumbent` in this direction. Ties never improve.
    #[must_use]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Maximize => candidate > incumbent,
            Self::Minimize => candidate < incumbent,
        }
    }

    fn pick<'a, G>(self, population: &'a Population<G>) -> Option<&'a Arc<Genome<G>>> {
        let cmp = |a: &&Arc<Genome<G>>, b: &&Arc<Genome<G>>| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .unwrap_or(Ordering::Equal)
        };
        match self {
            Self::Maximize => population.iter().max_by(cmp),
            Self::Minimize => population.iter().min_by(cmp),
        }
    }
}

pub trait FitnessFunction<G> {
    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    /// Scores one genome. Must be non-negative.
    fn evaluate_genome(&self, genes: &[G]) -> f64;

    /// Scores every member, then designates the best one.
    ///
    /// Scores that are negative or NaN are recorded as `0.0`.
    fn evaluate(&self, population: &mut Population<G>)
    where
        G: Clone,
    {
        population.rescore(|genes| {
            let fitness = self.evaluate_genome(genes);
            if fitness.is_nan() { 0.0 } else { fitness.max(0.0) }
        });
        if let Some(best) = self.direction().pick(population).cloned() {
            population.set_best(best);
        }
    }
}

/// Clamped linear map of `x` from `[min_x, max_x]` onto `[min_y, max_y]`.
///
/// The result is always clamped to `[0, 100]`. Bounds may be inverted
/// (`min_x > max_x`), in which case larger inputs map to smaller outputs. A
/// zero-width domain maps every input to `max_y`.
///
/// ```
/// # use pokeopt_ga::fitness::normalize;
/// assert_eq!(normalize(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
/// assert_eq!(normalize(3.0, 6.0, 0.0, 0.0, 100.0), 50.0);
/// assert_eq!(normalize(42.0, 1.0, 1.0, 0.0, 100.0), 100.0);
/// ```
#[must_use]
pub fn normalize(x: f64, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> f64 {
    let width = max_x - min_x;
    let y = if width == 0.0 {
        max_y
    } else {
        (x - min_x) / width * (max_y - min_y) + min_y
    };
    y.clamp(0.0, 100.0)
}
