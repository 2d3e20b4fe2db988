//! Team-composition fitness.
//!
//! A team is a genome of Pokémon. Its fitness is a weighted sum of five
//! sub-scores, each normalized into `[0, 100]`:
//!
//! | Sub-score            | Weight | Raw value                           | Domain                     |
//! |----------------------|--------|-------------------------------------|----------------------------|
//! | average stats        | high   | mean base-stat total, capped at 600 | `175 ..= 600`              |
//! | type diversity       | normal | distinct categories                 | `1 ..= 2 * team_size`      |
//! | resistance breadth   | normal | union of resistances                | `1 ..= 18`                 |
//! | legendary            | normal | weighted rare-member count          | `team_size ..= 0`          |
//! | common weakness      | high   | mean occurrences per weakness       | `total ..= 1`              |
//!
//! The last two domains are inverted: more rare members, or weaknesses piling
//! up on the same categories, score lower. A team with no weakness at all
//! scores 100 on common weakness.
//!
//! A team holding more than one mega evolution is invalid and scores exactly 0.

use std::{collections::BTreeSet, sync::Arc};

use pokeopt_model::{Category, Pokemon};
use serde::{Deserialize, Serialize};

use crate::{
    fitness::{FitnessFunction, normalize},
    genome::Genome,
};

pub type Team = Genome<Arc<Pokemon>>;

const MAX_SCORE: f64 = 100.0;

/// Multipliers applied to the sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub normal: f64,
    pub high: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            normal: 1.0,
            high: 1.5,
        }
    }
}

/// Every sub-score of one team, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FitnessBreakdown {
    pub average_stats: f64,
    pub type_diversity: f64,
    pub resistance_breadth: f64,
    pub legendary: f64,
    pub common_weakness: f64,
    pub mega_evolutions: usize,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamFitness {
    weights: FitnessWeights,
    team_size: usize,
}

impl TeamFitness {
    #[must_use]
    pub fn new(weights: FitnessWeights, team_size: usize) -> Self {
        Self {
            weights,
            team_size: team_size.max(1),
        }
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn breakdown(&self, team: &[Arc<Pokemon>]) -> FitnessBreakdown {
        let mega_evolutions = team.iter().filter(|p| p.is_mega_evolution()).count();
        if mega_evolutions > 1 {
            return FitnessBreakdown {
                mega_evolutions,
                ..FitnessBreakdown::default()
            };
        }

        let team_size = self.team_size as f64;
        let average_stats = average_stats(team);
        let type_diversity = normalize(
            distinct_categories(team) as f64,
            1.0,
            2.0 * team_size,
            0.0,
            MAX_SCORE,
        );
        let resistance_breadth = normalize(
            resistance_union(team) as f64,
            1.0,
            Category::COUNT as f64,
            0.0,
            MAX_SCORE,
        );
        let legendary = normalize(
            f64::from(legendary_count(team)),
            team_size,
            0.0,
            0.0,
            MAX_SCORE,
        );
        let common_weakness = common_weakness(team);

        let FitnessWeights { normal, high } = self.weights;
        let total = high * average_stats
            + normal * type_diversity
            + normal * resistance_breadth
            + normal * legendary
            + high * common_weakness;
        FitnessBreakdown {
            average_stats,
            type_diversity,
            resistance_breadth,
            legendary,
            common_weakness,
            mega_evolutions,
            total,
        }
    }
}

impl FitnessFunction<Arc<Pokemon>> for TeamFitness {
    fn evaluate_genome(&self, genes: &[Arc<Pokemon>]) -> f64 {
        self.breakdown(genes).total
    }
}

#[expect(clippy::cast_precision_loss)]
fn average_stats(team: &[Arc<Pokemon>]) -> f64 {
    if team.is_empty() {
        return 0.0;
    }
    let sum = team
        .iter()
        .map(|p| f64::from(p.total().min(Pokemon::MAX_TOTAL_STATS_STANDARD)))
        .sum::<f64>();
    normalize(
        sum / team.len() as f64,
        f64::from(Pokemon::MIN_TOTAL_STATS),
        f64::from(Pokemon::MAX_TOTAL_STATS_STANDARD),
        0.0,
        MAX_SCORE,
    )
}

fn distinct_categories(team: &[Arc<Pokemon>]) -> usize {
    team.iter()
        .flat_map(|p| p.categories())
        .collect::<BTreeSet<_>>()
        .len()
}

fn resistance_union(team: &[Arc<Pokemon>]) -> usize {
    team.iter()
        .flat_map(|p| p.resistances().iter().copied())
        .collect::<BTreeSet<_>>()
        .len()
}

fn legendary_count(team: &[Arc<Pokemon>]) -> u32 {
    team.iter().map(|p| p.rarity().legendary_weight()).sum()
}

#[expect(clippy::cast_precision_loss)]
fn common_weakness(team: &[Arc<Pokemon>]) -> f64 {
    let mut occurrences = [0_usize; Category::COUNT];
    for category in team.iter().flat_map(|p| p.weaknesses().iter()) {
        if let Some(index) = category.index() {
            occurrences[index] += 1;
        }
    }
    let total = occurrences.iter().sum::<usize>();
    let shared = occurrences.iter().filter(|&&n| n > 0).count();
    if shared == 0 {
        return MAX_SCORE;
    }
    let mean = total as f64 / shared as f64;
    normalize(mean, total as f64, 1.0, 0.0, MAX_SCORE)
}
