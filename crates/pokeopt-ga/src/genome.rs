use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Identity of a genome instance.
///
/// Every constructed genome receives a fresh id, including duplicates made by
/// [`Genome::duplicate`]. Populations use it to reject the same instance twice
/// while accepting equal-looking copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenomeId(u64);

impl GenomeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// One candidate solution: an ordered array of genes plus its fitness.
///
/// Operators never edit genes in place; they build new genomes. The fitness
/// is written by the evaluator only.
#[derive(Debug, Clone)]
pub struct Genome<G> {
    id: GenomeId,
    genes: Vec<G>,
    fitness: f64,
}

impl<G> Genome<G> {
    /// Creates an unevaluated genome (fitness 0).
    #[must_use]
    pub fn new(genes: Vec<G>) -> Self {
        Self::with_fitness(genes, 0.0)
    }

    #[must_use]
    pub fn with_fitness(genes: Vec<G>, fitness: f64) -> Self {
        Self {
            id: GenomeId::next(),
            genes,
            fitness,
        }
    }

    #[must_use]
    pub fn id(&self) -> GenomeId {
        self.id
    }

    #[must_use]
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl<G> Genome<G>
where
    G: Clone,
{
    /// A new instance with the same genes and fitness but a fresh identity.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self::with_fitness(self.genes.clone(), self.fitness)
    }
}

impl<G> fmt::Display for Genome<G>
where
    G: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{gene}")?;
        }
        write!(f, "] fitness={:.3}", self.fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_genome_is_unevaluated() {
        let g = Genome::new(vec![1, 2, 3]);
        assert_eq!(g.genes(), &[1, 2, 3]);
        assert_eq!(g.len(), 3);
        assert!(g.fitness().abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_has_fresh_identity() {
        let g = Genome::with_fitness(vec!['a', 'b'], 4.5);
        let d = g.duplicate();
        assert_ne!(g.id(), d.id());
        assert_eq!(g.genes(), d.genes());
        assert!((g.fitness() - d.fitness()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clone_keeps_identity() {
        let g = Genome::new(vec![1]);
        assert_eq!(g.clone().id(), g.id());
    }

    #[test]
    fn test_display() {
        let g = Genome::with_fitness(vec![1, 2], 1.5);
        assert_eq!(g.to_string(), "[1, 2] fitness=1.500");
    }
}
