use std::sync::Arc;

use rand::RngCore;

use crate::{
    genome::Genome, mutation::GeneSource, operator::OperatorError, population::Population,
};

/// Builds generation 0.
pub trait Initializer<G> {
    fn initialize(&self, rng: &mut dyn RngCore) -> Result<Population<G>, OperatorError>;
}

/// Fills a bounded population with genomes of random genes.
#[derive(Debug)]
pub struct RandomInitializer<S: ?Sized> {
    source: Arc<S>,
    population_size: usize,
    genome_len: usize,
}

impl<S: ?Sized> RandomInitializer<S> {
    /// Sizes below 1 are raised to 1.
    #[must_use]
    pub fn new(source: Arc<S>, population_size: usize, genome_len: usize) -> Self {
        Self {
            source,
            population_size: population_size.max(1),
            genome_len: genome_len.max(1),
        }
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    #[must_use]
    pub fn genome_len(&self) -> usize {
        self.genome_len
    }
}

impl<G, S> Initializer<G> for RandomInitializer<S>
where
    S: GeneSource<G> + ?Sized,
{
    fn initialize(&self, rng: &mut dyn RngCore) -> Result<Population<G>, OperatorError> {
        let mut population = Population::bounded(0, self.population_size);
        while !population.is_full() {
            let genes = (0..self.genome_len)
                .map(|_| self.source.random_gene(rng))
                .collect::<Result<Vec<_>, _>>()?;
            population.add(Genome::new(genes));
        }
        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use pokeopt_model::{Pokedex, Pokemon};
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    struct Digits;

    impl GeneSource<u8> for Digits {
        fn random_gene(&self, rng: &mut dyn RngCore) -> Result<u8, OperatorError> {
            Ok(rng.random_range(0..10))
        }
    }

    #[test]
    fn test_initial_population_shape() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let population = RandomInitializer::new(Arc::new(Digits), 25, 6)
            .initialize(&mut rng)
            .unwrap();
        assert_eq!(population.generation(), 0);
        assert_eq!(population.len(), 25);
        assert_eq!(population.capacity(), Some(25));
        assert!(population.iter().all(|g| g.len() == 6));
        assert!(population.iter().all(|g| g.genes().iter().all(|&d| d < 10)));
    }

    #[test]
    fn test_sizes_are_at_least_one() {
        let init = RandomInitializer::new(Arc::new(Digits), 0, 0);
        assert_eq!(init.population_size(), 1);
        assert_eq!(init.genome_len(), 1);
    }

    #[test]
    fn test_empty_catalog_fails_fast() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let init = RandomInitializer::new(Arc::new(Pokedex::default()), 10, 6);
        let result: Result<Population<Arc<Pokemon>>, _> = init.initialize(&mut rng);
        assert!(result.is_err());
    }
}
