//! The evolutionary loop.
//!
//! # Cycle
//!
//! 1. **Initialize** - build generation 0 and evaluate it; it is the first
//!    best-so-far generation
//! 2. **Select** - build a mating pool from the latest generation
//! 3. **Crossover** - breed offspring from the pool
//! 4. **Mutate** - one draw against the algorithm-level probability decides
//!    whether the mutation operator runs on the offspring at all; the operator
//!    then applies its own per-genome probability
//! 5. **Evaluate** - score the offspring and compare its average fitness with
//!    the best-so-far generation
//!
//! Steps 2-5 repeat until the history holds `max_iterations` generations, or
//! until `max_no_improvements` consecutive generations failed to improve. A
//! `max_no_improvements` of 0 disables early stopping.
//!
//! The loop is synchronous and owns its history. All randomness comes from
//! the generator passed to [`GeneticAlgorithm::run`], so a seeded generator
//! reproduces a run exactly.

use rand::RngCore;
use serde::Serialize;

use crate::{
    fitness::FitnessFunction,
    initializer::Initializer,
    operator::{self, GeneticOperator, OperatorError},
    population::Population,
    results::{AlgorithmSummary, RunResult},
};

/// Loop-level parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlgorithmParams {
    mutation_probability: f64,
    max_iterations: usize,
    max_no_improvements: usize,
}

impl Default for AlgorithmParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MUTATION_PROBABILITY,
            Self::DEFAULT_MAX_ITERATIONS,
            Self::DEFAULT_MAX_NO_IMPROVEMENTS,
        )
    }
}

impl AlgorithmParams {
    pub const DEFAULT_MUTATION_PROBABILITY: f64 = 1.0;
    pub const DEFAULT_MAX_ITERATIONS: i64 = 40;
    pub const DEFAULT_MAX_NO_IMPROVEMENTS: i64 = 20;

    /// Creates loop parameters, clamping out-of-range values.
    ///
    /// - a mutation probability outside `[0, 1]` becomes `1.0`
    /// - `max_iterations` below 1 becomes 1
    /// - `max_no_improvements` below 0 becomes 0 (no early stop)
    #[must_use]
    pub fn new(mutation_probability: f64, max_iterations: i64, max_no_improvements: i64) -> Self {
        Self {
            mutation_probability: operator::clamp_probability(mutation_probability),
            max_iterations: usize::try_from(max_iterations.max(1)).unwrap_or(usize::MAX),
            max_no_improvements: usize::try_from(max_no_improvements.max(0)).unwrap_or(usize::MAX),
        }
    }

    #[must_use]
    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    #[must_use]
    pub fn max_no_improvements(&self) -> usize {
        self.max_no_improvements
    }
}

/// Step of the loop in which an operator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Stage {
    #[display("initialization")]
    Initialize,
    #[display("selection")]
    Selection,
    #[display("crossover")]
    Crossover,
    #[display("mutation")]
    Mutation,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("{stage} failed while producing generation {generation}: {source}")]
pub struct RunError {
    pub generation: u64,
    pub stage: Stage,
    pub source: OperatorError,
}

impl RunError {
    fn at(generation: u64, stage: Stage) -> impl FnOnce(OperatorError) -> Self {
        move |source| Self {
            generation,
            stage,
            source,
        }
    }
}

/// A configured genetic algorithm.
pub struct GeneticAlgorithm<G> {
    fitness: Box<dyn FitnessFunction<G>>,
    initializer: Box<dyn Initializer<G>>,
    selection: Box<dyn GeneticOperator<G>>,
    crossover: Box<dyn GeneticOperator<G>>,
    mutation: Box<dyn GeneticOperator<G>>,
    params: AlgorithmParams,
}

impl<G> GeneticAlgorithm<G>
where
    G: Clone,
{
    pub fn new(
        fitness: impl FitnessFunction<G> + 'static,
        initializer: impl Initializer<G> + 'static,
        selection: impl GeneticOperator<G> + 'static,
        crossover: impl GeneticOperator<G> + 'static,
        mutation: impl GeneticOperator<G> + 'static,
        params: AlgorithmParams,
    ) -> Self {
        Self {
            fitness: Box::new(fitness),
            initializer: Box::new(initializer),
            selection: Box::new(selection),
            crossover: Box::new(crossover),
            mutation: Box::new(mutation),
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &AlgorithmParams {
        &self.params
    }

    #[must_use]
    pub fn summary(&self) -> AlgorithmSummary {
        AlgorithmSummary {
            selection: self.selection.name(),
            crossover: self.crossover.name(),
            mutation: self.mutation.name(),
            params: self.params,
        }
    }

    /// Runs the loop to completion.
    ///
    /// Fails with the generation and stage of the first operator error.
    pub fn run(&self, rng: &mut dyn RngCore) -> Result<RunResult<G>, RunError> {
        let summary = self.summary();
        tracing::info!(
            selection = summary.selection,
            crossover = summary.crossover,
            max_iterations = self.params.max_iterations,
            max_no_improvements = self.params.max_no_improvements,
            "optimization started"
        );

        let mut initial = self
            .initializer
            .initialize(rng)
            .map_err(RunError::at(0, Stage::Initialize))?;
        self.fitness.evaluate(&mut initial);
        let mut best_average = initial.average_fitness();
        let mut result = RunResult::new(initial, summary);
        result.log_line(format!(
            "Gen 0) AvgFitness={best_average:.3}|BestSoFar={best_average:.3}"
        ));

        let direction = self.fitness.direction();
        let mut no_improvements = 0;
        while result.iterations() < self.params.max_iterations {
            let offspring = self.next_generation(result.latest(), rng)?;
            let iteration = result.iterations();
            let average = offspring.average_fitness();
            let improved = direction.improves(average, best_average);
            if improved {
                best_average = average;
                no_improvements = 0;
            } else {
                no_improvements += 1;
            }
            let early_stop = self.params.max_no_improvements > 0
                && no_improvements >= self.params.max_no_improvements;

            let spread = offspring.fitness_stats().map_or(0.0, |stats| stats.std_dev);
            tracing::debug!(
                iteration,
                generation = offspring.generation(),
                average,
                spread,
                best_average,
                improved,
                "generation evaluated"
            );
            let mut line =
                format!("Gen {iteration}) AvgFitness={average:.3}|BestSoFar={best_average:.3}");
            if improved {
                line.push_str(" ✅ Improvement");
            }
            if early_stop {
                line.push_str(" ⏹️ Early stop");
            }
            result.log_line(line);
            result.push(offspring, improved);

            if early_stop {
                tracing::info!(iteration, no_improvements, "no improvement, stopping early");
                break;
            }
        }

        tracing::info!(
            iterations = result.iterations(),
            best_generation = result.best_generation_index(),
            best_average,
            "optimization finished"
        );
        Ok(result)
    }

    fn next_generation(
        &self,
        current: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, RunError> {
        let generation = current.generation();
        let pool = self
            .selection
            .apply(current, rng)
            .map_err(RunError::at(generation + 1, Stage::Selection))?;
        let mut offspring = self
            .crossover
            .apply(&pool, rng)
            .map_err(RunError::at(pool.generation() + 1, Stage::Crossover))?;
        if operator::gate(self.params.mutation_probability, rng) {
            offspring = self
                .mutation
                .apply(&offspring, rng)
                .map_err(RunError::at(offspring.generation() + 1, Stage::Mutation))?;
        }
        self.fitness.evaluate(&mut offspring);
        Ok(offspring)
    }
}
