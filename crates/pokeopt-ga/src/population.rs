//! Generations of genomes.
//!
//! A [`Population`] is a duplicate-free collection of genomes tagged with a
//! generation id and a cached best member. Members are held behind [`Arc`],
//! so cloning a population is shallow: the new container shares the same
//! genome instances. This is safe because genomes are not modified once
//! evaluated; the evaluator uses copy-on-write when a genome is shared.
//!
//! A population may be bounded. A bounded population refuses insertions once
//! full and reports it through the return value of [`Population::add`].

use std::{cmp::Ordering, collections::HashSet, sync::Arc};

use crate::{
    genome::{Genome, GenomeId},
    stats::DescriptiveStats,
};

#[derive(Debug)]
pub struct Population<G> {
    generation: u64,
    capacity: usize,
    members: Vec<Arc<Genome<G>>>,
    ids: HashSet<GenomeId>,
    best: Option<Arc<Genome<G>>>,
}

impl<G> Clone for Population<G> {
    /// Shallow copy: same generation, same best, same member instances.
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            capacity: self.capacity,
            members: self.members.clone(),
            ids: self.ids.clone(),
            best: self.best.clone(),
        }
    }
}

impl<G> Population<G> {
    /// Creates an empty, unbounded population.
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self::bounded(generation, 0)
    }

    /// Creates an empty population holding at most `capacity` genomes.
    ///
    /// A capacity of zero means unbounded.
    #[must_use]
    pub fn bounded(generation: u64, capacity: usize) -> Self {
        Self {
            generation,
            capacity,
            members: Vec::new(),
            ids: HashSet::new(),
            best: None,
        }
    }

    /// An empty population for the next generation, with the same capacity.
    #[must_use]
    pub fn successor(&self) -> Self {
        Self::bounded(self.generation + 1, self.capacity)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Maximum size, `None` when unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        (self.capacity > 0).then_some(self.capacity)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.members.len() >= self.capacity
    }

    /// Adds a genome. Returns `false` if the population is full.
    pub fn add(&mut self, genome: Genome<G>) -> bool {
        self.add_shared(Arc::new(genome))
    }

    /// Adds a shared genome instance.
    ///
    /// Returns `false`, leaving the population unchanged, when the same
    /// instance is already present or the population is full.
    pub fn add_shared(&mut self, genome: Arc<Genome<G>>) -> bool {
        if self.is_full() || !self.ids.insert(genome.id()) {
            return false;
        }
        self.members.push(genome);
        true
    }

    #[must_use]
    pub fn contains(&self, genome: &Genome<G>) -> bool {
        self.ids.contains(&genome.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[Arc<Genome<G>>] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Genome<G>>> + '_ {
        self.members.iter()
    }

    /// Best member as designated by the last evaluation.
    #[must_use]
    pub fn best(&self) -> Option<&Arc<Genome<G>>> {
        self.best.as_ref()
    }

    pub fn set_best(&mut self, best: Arc<Genome<G>>) {
        self.best = Some(best);
    }

    /// Arithmetic mean of member fitness, `0.0` when empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn average_fitness(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let sum = self.members.iter().map(|g| g.fitness()).sum::<f64>();
        sum / self.members.len() as f64
    }

    /// Orders populations by average fitness.
    #[must_use]
    pub fn compare_average(&self, other: &Self) -> Ordering {
        self.average_fitness()
            .partial_cmp(&other.average_fitness())
            .unwrap_or(Ordering::Equal)
    }

    #[must_use]
    pub fn fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.members.iter().map(|g| g.fitness()))
    }
}

impl<G> Population<G>
where
    G: Clone,
{
    /// Rewrites every member's fitness with `score(genes)`.
    ///
    /// Members shared with another population are copied first, so fitness
    /// written here never leaks into an earlier generation.
    pub(crate) fn rescore<F>(&mut self, mut score: F)
    where
        F: FnMut(&[G]) -> f64,
    {
        for member in &mut self.members {
            let fitness = score(member.genes());
            Arc::make_mut(member).set_fitness(fitness);
        }
        self.best = None;
    }
}

impl<'a, G> IntoIterator for &'a Population<G> {
    type Item = &'a Arc<Genome<G>>;
    type IntoIter = std::slice::Iter<'a, Arc<Genome<G>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn population_with(fitness: &[f64]) -> Population<u8> {
        let mut population = Population::new(0);
        for &f in fitness {
            assert!(population.add(Genome::with_fitness(vec![0], f)));
        }
        population
    }

    #[test]
    fn test_average_fitness_of_empty_population_is_zero() {
        let population = Population::<u8>::new(3);
        assert!(population.average_fitness().abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_fitness_is_arithmetic_mean() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        for _ in 0..200 {
            let n = rng.random_range(1..30);
            let values = (0..n)
                .map(|_| rng.random_range(0.0..500.0))
                .collect::<Vec<f64>>();
            let population = population_with(&values);
            #[expect(clippy::cast_precision_loss)]
            let expected = values.iter().sum::<f64>() / values.len() as f64;
            assert!((population.average_fitness() - expected).abs() < 1e-9);
            assert!(population.average_fitness() > 0.0);
        }
    }

    #[test]
    fn test_fitness_stats() {
        let stats = population_with(&[4.0, 1.0, 7.0]).fitness_stats().unwrap();
        assert!((stats.min - 1.0).abs() < f64::EPSILON);
        assert!((stats.max - 7.0).abs() < f64::EPSILON);
        assert!((stats.mean - 4.0).abs() < f64::EPSILON);
        assert!((stats.median - 4.0).abs() < f64::EPSILON);
        assert!(Population::<u8>::new(0).fitness_stats().is_none());
    }

    #[test]
    fn test_same_instance_is_rejected() {
        let mut population = Population::new(0);
        let genome = Arc::new(Genome::new(vec![1, 2]));
        assert!(population.add_shared(Arc::clone(&genome)));
        assert!(!population.add_shared(Arc::clone(&genome)));
        assert_eq!(population.len(), 1);
        // an equal-looking copy is a distinct instance
        assert!(population.add(genome.duplicate()));
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn test_bounded_population_rejects_overflow() {
        let mut population = Population::bounded(1, 3);
        for i in 0..3 {
            assert!(population.add(Genome::new(vec![i])));
        }
        let extra = Genome::new(vec![99]);
        let extra_id = extra.id();
        assert!(!population.add(extra));
        assert_eq!(population.len(), 3);
        assert!(population.iter().all(|g| g.id() != extra_id));
        assert_eq!(population.capacity(), Some(3));
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let mut population = Population::bounded(1, 0);
        for i in 0..100 {
            assert!(population.add(Genome::new(vec![i])));
        }
        assert_eq!(population.capacity(), None);
    }

    #[test]
    fn test_compare_average() {
        let low = population_with(&[1.0, 2.0]);
        let high = population_with(&[5.0]);
        assert_eq!(low.compare_average(&high), Ordering::Less);
        assert_eq!(high.compare_average(&low), Ordering::Greater);
        assert_eq!(low.compare_average(&low.clone()), Ordering::Equal);
    }

    #[test]
    fn test_clone_is_shallow() {
        let mut population = population_with(&[1.0, 2.0]);
        let best = Arc::clone(&population.members()[1]);
        population.set_best(best);
        let copy = population.clone();
        assert_eq!(copy.generation(), population.generation());
        assert!(Arc::ptr_eq(copy.best().unwrap(), population.best().unwrap()));
        for (a, b) in copy.iter().zip(&population) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_successor_is_empty_next_generation() {
        let population = {
            let mut p = Population::bounded(4, 10);
            p.add(Genome::new(vec![1]));
            p
        };
        let next = population.successor();
        assert_eq!(next.generation(), 5);
        assert!(next.is_empty());
        assert_eq!(next.capacity(), Some(10));
        assert!(next.best().is_none());
    }

    #[test]
    fn test_rescore_copies_shared_members() {
        let mut first = population_with(&[1.0]);
        let shared = Arc::clone(&first.members()[0]);
        let mut second = first.successor();
        second.add_shared(Arc::clone(&shared));
        second.rescore(|_| 9.0);
        assert!((shared.fitness() - 1.0).abs() < f64::EPSILON);
        assert!((second.members()[0].fitness() - 9.0).abs() < f64::EPSILON);
        first.rescore(|_| 2.0);
        assert!((first.average_fitness() - 2.0).abs() < f64::EPSILON);
    }
}
