//! Team optimization entry point.
//!
//! [`optimize`] wires an [`OptimizerConfig`] and a catalog into a
//! [`GeneticAlgorithm`] over teams of Pokémon, runs it, and packages the
//! outcome as an [`OptimizationReport`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pokeopt_model::{Catalog, Category, Pokemon};
use rand::RngCore;
use serde::Serialize;

use crate::{
    algorithm::{GeneticAlgorithm, RunError},
    config::{CrossoverKind, OptimizerConfig, SelectionKind},
    crossover::{SinglePointCrossover, TwoPointCrossover, UniformCrossover},
    initializer::RandomInitializer,
    mutation::SwapMutation,
    operator::GeneticOperator,
    results::RunResult,
    selection::{RankSelection, RouletteSelection, TournamentSelection},
    team::{FitnessBreakdown, TeamFitness},
};

/// One member of the reported team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    pub number: u32,
    pub name: String,
    pub types: Vec<Category>,
    pub total: u32,
}

impl From<&Pokemon> for TeamMember {
    fn from(pokemon: &Pokemon) -> Self {
        Self {
            number: pokemon.number(),
            name: pokemon.name().to_owned(),
            types: pokemon.categories().collect(),
            total: pokemon.total(),
        }
    }
}

/// Serializable outcome of one optimization.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub generated_at: DateTime<Utc>,
    pub selection: SelectionKind,
    pub crossover: CrossoverKind,
    pub best_team: Vec<TeamMember>,
    pub best_fitness: f64,
    pub breakdown: FitnessBreakdown,
    pub iterations: usize,
    pub best_generation: usize,
    pub log: Vec<String>,
}

impl OptimizationReport {
    #[must_use]
    pub fn new(
        config: &OptimizerConfig,
        fitness: &TeamFitness,
        result: &RunResult<Arc<Pokemon>>,
    ) -> Self {
        let best = result.best_genome();
        let best_team = best.map_or(&[][..], |g| g.genes());
        Self {
            generated_at: Utc::now(),
            selection: config.selection,
            crossover: config.crossover,
            best_team: best_team.iter().map(|p| TeamMember::from(&**p)).collect(),
            best_fitness: best.map_or(0.0, |g| g.fitness()),
            breakdown: fitness.breakdown(best_team),
            iterations: result.iterations(),
            best_generation: result.best_generation_index(),
            log: result.log().to_vec(),
        }
    }
}

fn selection_operator(config: &OptimizerConfig) -> Box<dyn GeneticOperator<Arc<Pokemon>>> {
    match config.selection {
        SelectionKind::Roulette => Box::new(RouletteSelection),
        SelectionKind::Rank => Box::new(RankSelection),
        SelectionKind::Tournament => Box::new(TournamentSelection {
            size: config.tournament_size(),
            proportional: config.tournament_proportional,
        }),
    }
}

fn crossover_operator(config: &OptimizerConfig) -> Box<dyn GeneticOperator<Arc<Pokemon>>> {
    match config.crossover {
        CrossoverKind::Uniform => Box::new(UniformCrossover),
        CrossoverKind::SinglePoint => Box::new(SinglePointCrossover),
        CrossoverKind::TwoPoint => Box::new(TwoPointCrossover),
    }
}

/// Builds the team-optimizing algorithm described by `config`.
pub fn build_algorithm<C>(
    config: &OptimizerConfig,
    catalog: Arc<C>,
) -> GeneticAlgorithm<Arc<Pokemon>>
where
    C: Catalog + ?Sized + 'static,
{
    let team_size = config.team_size();
    GeneticAlgorithm::new(
        TeamFitness::new(config.weights, team_size),
        RandomInitializer::new(Arc::clone(&catalog), config.population_size(), team_size),
        selection_operator(config),
        crossover_operator(config),
        SwapMutation::new(config.gene_mutation_probability, catalog),
        config.params(),
    )
}

/// Runs one team optimization.
///
/// The catalog is only read, so one instance may be shared by concurrent
/// runs as long as each run has its own generator.
pub fn optimize<C>(
    config: &OptimizerConfig,
    catalog: Arc<C>,
    rng: &mut dyn RngCore,
) -> Result<OptimizationReport, RunError>
where
    C: Catalog + ?Sized + 'static,
{
    let result = build_algorithm(config, catalog).run(rng)?;
    let fitness = TeamFitness::new(config.weights, config.team_size());
    Ok(OptimizationReport::new(config, &fitness, &result))
}
