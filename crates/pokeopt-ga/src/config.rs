use serde::{Deserialize, Serialize};

use crate::{algorithm::AlgorithmParams, mutation, team::FitnessWeights};

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Roulette,
    #[default]
    Rank,
    Tournament,
}

impl SelectionKind {
    pub const ALL: [Self; 3] = [Self::Roulette, Self::Tournament, Self::Rank];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roulette => "roulette",
            Self::Rank => "rank",
            Self::Tournament => "tournament",
        }
    }
}

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverKind {
    #[default]
    Uniform,
    SinglePoint,
    TwoPoint,
}

impl CrossoverKind {
    pub const ALL: [Self; 3] = [Self::Uniform, Self::SinglePoint, Self::TwoPoint];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::SinglePoint => "singlepoint",
            Self::TwoPoint => "twopoint",
        }
    }
}

/// Settings of one team optimization.
///
/// Every field has a default, so a partial JSON document is a valid config.
/// Out-of-range values are clamped when the algorithm is built, never
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub selection: SelectionKind,
    pub crossover: CrossoverKind,
    /// Chance that the mutation operator runs on a generation at all.
    pub mutation_probability: f64,
    /// Chance that the mutation operator changes a given team.
    pub gene_mutation_probability: f64,
    pub max_iterations: i64,
    /// Consecutive generations without improvement before stopping; 0 never stops early.
    pub max_no_improvements: i64,
    pub team_size: usize,
    pub population_size: usize,
    pub tournament_size: usize,
    pub tournament_proportional: bool,
    pub weights: FitnessWeights,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            selection: SelectionKind::default(),
            crossover: CrossoverKind::default(),
            mutation_probability: AlgorithmParams::DEFAULT_MUTATION_PROBABILITY,
            gene_mutation_probability: mutation::DEFAULT_MUTATION_PROBABILITY,
            max_iterations: AlgorithmParams::DEFAULT_MAX_ITERATIONS,
            max_no_improvements: AlgorithmParams::DEFAULT_MAX_NO_IMPROVEMENTS,
            team_size: 6,
            population_size: 100,
            tournament_size: 5,
            tournament_proportional: false,
            weights: FitnessWeights::default(),
        }
    }
}

impl OptimizerConfig {
    #[must_use]
    pub fn params(&self) -> AlgorithmParams {
        AlgorithmParams::new(
            self.mutation_probability,
            self.max_iterations,
            self.max_no_improvements,
        )
    }

    #[must_use]
    pub fn team_size(&self) -> usize {
        self.team_size.max(1)
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size.max(1)
    }

    #[must_use]
    pub fn tournament_size(&self) -> usize {
        self.tournament_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::default();
        assert_eq!(config.selection, SelectionKind::Rank);
        assert_eq!(config.crossover, CrossoverKind::Uniform);
        assert_eq!(config.team_size(), 6);
        assert_eq!(config.population_size(), 100);
        assert!((config.gene_mutation_probability - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.params().max_iterations(), 40);
        assert_eq!(config.params().max_no_improvements(), 20);
    }

    #[test]
    fn test_partial_json() {
        let config: OptimizerConfig = serde_json::from_str(
            r#"{ "selection": "tournament", "crossover": "twopoint", "max_iterations": 0,
                 "weights": { "high": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.selection, SelectionKind::Tournament);
        assert_eq!(config.crossover, CrossoverKind::TwoPoint);
        assert_eq!(config.params().max_iterations(), 1);
        assert!((config.weights.high - 2.0).abs() < f64::EPSILON);
        assert!((config.weights.normal - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.population_size, 100);
    }

    #[test]
    fn test_sizes_are_clamped() {
        let config = OptimizerConfig {
            team_size: 0,
            population_size: 0,
            tournament_size: 0,
            ..OptimizerConfig::default()
        };
        assert_eq!(config.team_size(), 1);
        assert_eq!(config.population_size(), 1);
        assert_eq!(config.tournament_size(), 1);
    }

    #[test]
    fn test_kinds_parse_case_insensitively() {
        assert_eq!("roulette".parse::<SelectionKind>().unwrap(), SelectionKind::Roulette);
        assert_eq!("Tournament".parse::<SelectionKind>().unwrap(), SelectionKind::Tournament);
        assert_eq!("singlepoint".parse::<CrossoverKind>().unwrap(), CrossoverKind::SinglePoint);
        assert_eq!("TwoPoint".parse::<CrossoverKind>().unwrap(), CrossoverKind::TwoPoint);
        assert!("elitist".parse::<SelectionKind>().is_err());
        for kind in CrossoverKind::ALL {
            assert_eq!(kind.as_str().parse::<CrossoverKind>().unwrap(), kind);
        }
    }
}
