//! Selection operators.
//!
//! Each operator builds a mating pool the same size as its input. Every pool
//! member is a [`Genome::duplicate`] of an input genome: same genes and
//! fitness, fresh identity, so the same source can be picked more than once.
//!
//! - [`RouletteSelection`] - fitness-proportional
//! - [`RankSelection`] - proportional to fitness rank
//! - [`TournamentSelection`] - best (or weighted pick) of a random window

use std::sync::Arc;

use rand::{Rng as _, RngCore, seq::IndexedRandom as _};

use crate::{
    genome::Genome,
    operator::{GeneticOperator, OperatorError, Wheel},
    population::Population,
};

/// Pushes duplicates of `pick()` until the pool matches the source size.
fn fill_pool<G, F>(population: &Population<G>, mut pick: F) -> Population<G>
where
    G: Clone,
    F: FnMut() -> Arc<Genome<G>>,
{
    let mut pool = population.successor();
    for _ in 0..population.len() {
        pool.add(pick().duplicate());
    }
    pool
}

/// Fitness-proportional selection.
///
/// Falls back to uniform sampling when the total fitness is not positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteSelection;

impl<G> GeneticOperator<G> for RouletteSelection
where
    G: Clone,
{
    fn name(&self) -> &'static str {
        "roulette"
    }

    fn apply(
        &self,
        population: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, OperatorError> {
        let members = population.members();
        if members.is_empty() {
            return Ok(population.successor());
        }
        let total = members.iter().map(|g| g.fitness()).sum::<f64>();
        if total <= 0.0 {
            tracing::debug!(
                generation = population.generation(),
                "total fitness is not positive, sampling uniformly"
            );
            return Ok(fill_pool(population, || {
                let index = rng.random_range(0..members.len());
                Arc::clone(&members[index])
            }));
        }
        let wheel = Wheel::new(members.iter().map(|g| g.fitness()));
        Ok(fill_pool(population, || {
            Arc::clone(&members[wheel.spin(&mut *rng)])
        }))
    }
}

/// Rank-proportional selection.
///
/// Members are sorted by ascending fitness and weighted by rank, `1` for the
/// worst up to `N` for the best.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankSelection;

impl<G> GeneticOperator<G> for RankSelection
where
    G: Clone,
{
    fn name(&self) -> &'static str {
        "rank"
    }

    #[expect(clippy::cast_precision_loss)]
    fn apply(
        &self,
        population: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, OperatorError> {
        let mut sorted = population.members().to_vec();
        if sorted.is_empty() {
            return Ok(population.successor());
        }
        sorted.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
        let wheel = Wheel::new((1..=sorted.len()).map(|rank| rank as f64));
        Ok(fill_pool(population, || {
            Arc::clone(&sorted[wheel.spin(&mut *rng)])
        }))
    }
}

/// Tournament selection.
///
/// Each pick samples `size` distinct members (fewer if the population is
/// smaller) and keeps the fittest. In proportional mode the winner is instead
/// drawn from the window with probability proportional to fitness.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelection {
    pub size: usize,
    pub proportional: bool,
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            size: 5,
            proportional: false,
        }
    }
}

impl TournamentSelection {
    fn winner<'a, G>(
        &self,
        members: &'a [Arc<Genome<G>>],
        rng: &mut dyn RngCore,
    ) -> Option<&'a Arc<Genome<G>>> {
        let window = members
            .choose_multiple(rng, self.size.max(1))
            .collect::<Vec<_>>();
        let fittest = window
            .iter()
            .copied()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()));
        if !self.proportional {
            return fittest;
        }
        let total = window.iter().map(|g| g.fitness()).sum::<f64>();
        if total <= 0.0 {
            return fittest;
        }
        let wheel = Wheel::new(window.iter().map(|g| g.fitness()));
        Some(window[wheel.spin(rng)])
    }
}

impl<G> GeneticOperator<G> for TournamentSelection
where
    G: Clone,
{
    fn name(&self) -> &'static str {
        if self.proportional {
            "tournament-proportional"
        } else {
            "tournament"
        }
    }

    fn apply(
        &self,
        population: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, OperatorError> {
        let members = population.members();
        let mut pool = population.successor();
        for _ in 0..members.len() {
            if let Some(winner) = self.winner(members, rng) {
                pool.add(winner.duplicate());
            }
        }
        Ok(pool)
    }
}
