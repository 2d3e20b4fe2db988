//! Genetic algorithm engine for team optimization.
//!
//! The engine is generic over the gene type. [`GeneticAlgorithm`] drives the
//! loop and is assembled from interchangeable parts:
//!
//! - [`FitnessFunction`] - scores genomes and picks each generation's best
//! - [`Initializer`] - builds generation 0
//! - [`GeneticOperator`] - selection, crossover and mutation strategies
//!
//! The team specialization lives in [`team`] and [`optimizer`]: genomes are
//! teams of [`pokeopt_model::Pokemon`] drawn from a [`pokeopt_model::Catalog`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use pokeopt_ga::{OptimizerConfig, optimize};
//! use pokeopt_model::{Pokedex, TypeChart};
//! use rand::SeedableRng;
//!
//! let json = r#"[
//!     { "number": 25, "name": "Pikachu", "type1": "ELECTRIC",
//!       "hp": 35, "attack": 55, "defense": 40, "specialAttack": 50, "specialDefense": 50, "speed": 90 },
//!     { "number": 143, "name": "Snorlax", "type1": "NORMAL",
//!       "hp": 160, "attack": 110, "defense": 65, "specialAttack": 65, "specialDefense": 110, "speed": 30 }
//! ]"#;
//! let pokedex = Pokedex::from_json_reader(json.as_bytes(), &TypeChart::standard())?;
//!
//! let config = OptimizerConfig {
//!     team_size: 3,
//!     population_size: 10,
//!     max_iterations: 5,
//!     ..OptimizerConfig::default()
//! };
//! let mut rng = rand_pcg::Pcg64Mcg::seed_from_u64(42);
//! let report = optimize(&config, Arc::new(pokedex), &mut rng)?;
//!
//! assert_eq!(report.best_team.len(), 3);
//! assert!(report.iterations <= 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    algorithm::{AlgorithmParams, GeneticAlgorithm, RunError, Stage},
    config::{CrossoverKind, OptimizerConfig, SelectionKind},
    fitness::{Direction, FitnessFunction},
    genome::{Genome, GenomeId},
    initializer::{Initializer, RandomInitializer},
    mutation::{GeneSource, SwapMutation},
    operator::{GeneticOperator, OperatorError},
    optimizer::{OptimizationReport, TeamMember, build_algorithm, optimize},
    population::Population,
    results::{AlgorithmSummary, RunResult},
    team::{FitnessBreakdown, FitnessWeights, Team, TeamFitness},
};

pub mod algorithm;
pub mod config;
pub mod crossover;
pub mod fitness;
pub mod genome;
pub mod initializer;
pub mod mutation;
pub mod operator;
pub mod optimizer;
pub mod population;
pub mod results;
pub mod selection;
pub mod stats;
pub mod team;
