//! The operator seam shared by selection, crossover and mutation.

use pokeopt_model::CatalogError;
use rand::{Rng as _, RngCore};

use crate::population::Population;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum OperatorError {
    #[display("catalog failure: {source}")]
    Catalog { source: CatalogError },
}

/// Transforms one generation into the next.
///
/// Implementations never modify their input; they return a fresh population
/// whose generation id is one past the input's.
pub trait GeneticOperator<G> {
    /// Short name used in run summaries and logs.
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        population: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, OperatorError>;
}

impl<G, T> GeneticOperator<G> for Box<T>
where
    T: GeneticOperator<G> + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn apply(
        &self,
        population: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, OperatorError> {
        (**self).apply(population, rng)
    }
}

/// Clamps a probability into `[0, 1]`; anything outside falls back to `1.0`.
#[must_use]
pub fn clamp_probability(probability: f64) -> f64 {
    if (0.0..=1.0).contains(&probability) {
        probability
    } else {
        1.0
    }
}

/// Draws once from `[0, 1)` and passes when the draw is at most `probability`.
///
/// A probability of zero never passes.
pub(crate) fn gate(probability: f64, rng: &mut dyn RngCore) -> bool {
    let draw = rng.random::<f64>();
    probability > 0.0 && draw <= probability
}

/// Cumulative selection wheel over `[0, 1)`.
///
/// Slot `i` covers `[bounds[i - 1], bounds[i])`, so a draw landing exactly on
/// a bound belongs to the slot that starts there.
#[derive(Debug)]
pub(crate) struct Wheel {
    bounds: Vec<f64>,
}

impl Wheel {
    /// Builds a wheel from non-negative weights with a positive sum.
    pub(crate) fn new<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let weights = weights.into_iter().collect::<Vec<_>>();
        let total = weights.iter().sum::<f64>();
        let mut acc = 0.0;
        let bounds = weights
            .iter()
            .map(|w| {
                acc += w / total;
                acc
            })
            .collect();
        Self { bounds }
    }

    /// Index of the slot containing `draw`.
    pub(crate) fn slot(&self, draw: f64) -> usize {
        let index = self.bounds.partition_point(|&bound| bound <= draw);
        index.min(self.bounds.len().saturating_sub(1))
    }

    pub(crate) fn spin(&self, rng: &mut dyn RngCore) -> usize {
        self.slot(rng.random::<f64>())
    }
}
