//! Mutation operator and the gene source it draws replacements from.

use std::sync::Arc;

use pokeopt_model::{Catalog, Pokemon};
use rand::{Rng as _, RngCore};

use crate::{
    genome::Genome,
    operator::{self, GeneticOperator, OperatorError},
    population::Population,
};

/// Default per-genome mutation probability.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.3;

/// Supplies fresh random genes.
pub trait GeneSource<G> {
    fn random_gene(&self, rng: &mut dyn RngCore) -> Result<G, OperatorError>;
}

impl<C> GeneSource<Arc<Pokemon>> for C
where
    C: Catalog + ?Sized,
{
    fn random_gene(&self, rng: &mut dyn RngCore) -> Result<Arc<Pokemon>, OperatorError> {
        Ok(self.random_pokemon(rng)?)
    }
}

/// Replaces one random gene of a genome with a fresh one from `source`.
///
/// Each genome is mutated independently with `probability`. Genomes that are
/// not mutated pass through as the same instance.
#[derive(Debug)]
pub struct SwapMutation<S: ?Sized> {
    probability: f64,
    source: Arc<S>,
}

impl<S: ?Sized> SwapMutation<S> {
    /// Creates the operator. A probability outside `[0, 1]` becomes `1.0`.
    #[must_use]
    pub fn new(probability: f64, source: Arc<S>) -> Self {
        Self {
            probability: operator::clamp_probability(probability),
            source,
        }
    }

    #[must_use]
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<G, S> GeneticOperator<G> for SwapMutation<S>
where
    G: Clone,
    S: GeneSource<G> + ?Sized,
{
    fn name(&self) -> &'static str {
        "swap"
    }

    fn apply(
        &self,
        population: &Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>, OperatorError> {
        let mut mutated = population.successor();
        for member in population {
            if !operator::gate(self.probability, rng) || member.is_empty() {
                mutated.add_shared(Arc::clone(member));
                continue;
            }
            let mut genes = member.genes().to_vec();
            let position = rng.random_range(0..genes.len());
            genes[position] = self.source.random_gene(rng)?;
            mutated.add(Genome::new(genes));
        }
        Ok(mutated)
    }
}

#[cfg(test)]
mod tests {
    use pokeopt_model::{Category, Pokedex, Rarity, Stats, TypeChart};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    struct Constant(u32);

    impl GeneSource<u32> for Constant {
        fn random_gene(&self, _rng: &mut dyn RngCore) -> Result<u32, OperatorError> {
            Ok(self.0)
        }
    }

    fn population() -> Population<u32> {
        let mut population = Population::new(5);
        for i in 0..20 {
            population.add(Genome::new(vec![i, i, i]));
        }
        population
    }

    #[test]
    fn test_zero_probability_never_mutates() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let source = population();
        let op = SwapMutation::new(0.0, Arc::new(Constant(99)));
        let out = op.apply(&source, &mut rng).unwrap();
        assert_eq!(out.generation(), 6);
        assert_eq!(out.len(), source.len());
        for (a, b) in out.iter().zip(&source) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_full_probability_replaces_exactly_one_gene() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let source = population();
        let op = SwapMutation::new(1.0, Arc::new(Constant(99)));
        let out = op.apply(&source, &mut rng).unwrap();
        for (after, before) in out.iter().zip(&source) {
            assert!(!Arc::ptr_eq(after, before));
            let changed = after
                .genes()
                .iter()
                .zip(before.genes())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1);
            assert!(after.genes().contains(&99));
        }
    }

    #[test]
    fn test_out_of_range_probability_is_clamped() {
        let op = SwapMutation::new(1.7, Arc::new(Constant(0)));
        assert!((op.probability() - 1.0).abs() < f64::EPSILON);
        let op = SwapMutation::new(-0.5, Arc::new(Constant(0)));
        assert!((op.probability() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_item_catalog_always_supplies_that_item() {
        let chart = TypeChart::standard();
        let stats = Stats {
            hp: 50,
            attack: 50,
            defense: 50,
            special_attack: 50,
            special_defense: 50,
            speed: 50,
        };
        let pikachu = Pokemon::new(
            25,
            "Pikachu",
            Category::Electric,
            Category::Undefined,
            stats,
            Rarity::Common,
            &chart,
        )
        .unwrap();
        let eevee = Arc::new(
            Pokemon::new(
                133,
                "Eevee",
                Category::Normal,
                Category::Undefined,
                stats,
                Rarity::Common,
                &chart,
            )
            .unwrap(),
        );
        let catalog = Arc::new(Pokedex::from_pokemon([pikachu]));
        let mut source = Population::new(0);
        for _ in 0..10 {
            source.add(Genome::new(vec![Arc::clone(&eevee); 6]));
        }
        let mut rng = Pcg64Mcg::seed_from_u64(17);
        let out = SwapMutation::new(1.0, catalog).apply(&source, &mut rng).unwrap();
        for genome in &out {
            let pikachus = genome.genes().iter().filter(|p| p.number() == 25).count();
            assert_eq!(pikachus, 1);
        }
    }

    #[test]
    fn test_empty_catalog_is_an_error() {
        let catalog = Arc::new(Pokedex::default());
        let mut source = Population::new(0);
        source.add(Genome::new(Vec::<Arc<Pokemon>>::new()));
        let mut rng = Pcg64Mcg::seed_from_u64(17);
        // empty genomes have nothing to replace
        let out = SwapMutation::new(1.0, Arc::clone(&catalog))
            .apply(&source, &mut rng)
            .unwrap();
        assert_eq!(out.len(), 1);

        let chart = TypeChart::standard();
        let ditto = Pokemon::new(
            132,
            "Ditto",
            Category::Normal,
            Category::Undefined,
            Stats::default(),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        let mut source = Population::new(0);
        source.add(Genome::new(vec![Arc::new(ditto)]));
        let err = SwapMutation::new(1.0, catalog)
            .apply(&source, &mut rng)
            .unwrap_err();
        assert!(matches!(err, OperatorError::Catalog { .. }));
    }
}
