use std::sync::Arc;

use serde::Serialize;

use crate::{algorithm::AlgorithmParams, genome::Genome, population::Population};

/// Operators and parameters a run was configured with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSummary {
    pub selection: &'static str,
    pub crossover: &'static str,
    pub mutation: &'static str,
    pub params: AlgorithmParams,
}

/// Everything one evolutionary run produced.
///
/// Holds every evaluated generation in order, generation 0 first. The history
/// is never empty.
#[derive(Debug, Clone)]
pub struct RunResult<G> {
    generations: Vec<Population<G>>,
    best_generation: usize,
    log: Vec<String>,
    summary: AlgorithmSummary,
}

impl<G> RunResult<G> {
    pub(crate) fn new(initial: Population<G>, summary: AlgorithmSummary) -> Self {
        Self {
            generations: vec![initial],
            best_generation: 0,
            log: Vec::new(),
            summary,
        }
    }

    pub(crate) fn push(&mut self, population: Population<G>, is_best: bool) {
        self.generations.push(population);
        if is_best {
            self.best_generation = self.generations.len() - 1;
        }
    }

    pub(crate) fn log_line(&mut self, line: String) {
        self.log.push(line);
    }

    /// Number of evaluated generations, generation 0 included.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.generations.len()
    }

    #[must_use]
    pub fn generations(&self) -> &[Population<G>] {
        &self.generations
    }

    #[must_use]
    pub fn latest(&self) -> &Population<G> {
        // the history always holds generation 0
        &self.generations[self.generations.len() - 1]
    }

    /// The generation with the best average fitness.
    #[must_use]
    pub fn best_generation(&self) -> &Population<G> {
        &self.generations[self.best_generation]
    }

    /// Position of [`Self::best_generation`] in the history.
    #[must_use]
    pub fn best_generation_index(&self) -> usize {
        self.best_generation
    }

    /// Best genome of the best generation.
    #[must_use]
    pub fn best_genome(&self) -> Option<&Arc<Genome<G>>> {
        self.best_generation().best()
    }

    #[must_use]
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The log as one newline-separated string.
    #[must_use]
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }

    #[must_use]
    pub fn summary(&self) -> &AlgorithmSummary {
        &self.summary
    }
}
