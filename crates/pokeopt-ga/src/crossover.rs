//! Crossover operators.
//!
//! Parents are paired by [`make_random_pairings`] and every pair yields exactly
//! two offspring. When parents differ in length only the first
//! `min(len_a, len_b)` genes take part; the excess is discarded. Parents with
//! fewer than two shared genes have no cut point and are copied as they are.

use std::sync::Arc;

use rand::{Rng as _, RngCore, seq::SliceRandom as _};

use crate::{
    genome::Genome,
    operator::{GeneticOperator, OperatorError},
    population::Population,
};

type Pair<G> = (Arc<Genome<G>>, Arc<Genome<G>>);

/// Pairs the members of `population` at random.
///
/// A single member is paired with itself. Otherwise the members are shuffled,
/// one is dropped if the count is odd, and neighbours are paired.
pub fn make_random_pairings<G>(population: &Population<G>, rng: &mut dyn RngCore) -> Vec<Pair<G>> {
    let mut members = population.members().to_vec();
    if let [only] = members.as_slice() {
        return vec![(Arc::clone(only), Arc::clone(only))];
    }
    members.shuffle(rng);
    if members.len() % 2 == 1 {
        members.pop();
    }
    members
        .chunks_exact(2)
        .map(|pair| (Arc::clone(&pair[0]), Arc::clone(&pair[1])))
        .collect()
}

/// How a pair of parent gene arrays is recombined.
trait Recombine<G> {
    /// Recombines parents of equal length (at least 2).
    fn recombine(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> (Vec<G>, Vec<G>);
}

fn breed<G, R>(
    recombiner: &R,
    population: &Population<G>,
    rng: &mut dyn RngCore,
) -> Population<G>
where
    G: Clone,
    R: Recombine<G>,
{
    let mut offspring = population.successor();
    for (a, b) in make_random_pairings(population, rng) {
        let len = a.len().min(b.len());
        let (a, b) = (&a.genes()[..len], &b.genes()[..len]);
        let (first, second) = if len < 2 {
            (a.to_vec(), b.to_vec())
        } else {
            recombiner.recombine(a, b, rng)
        };
        offspring.add(Genome::new(first));
        offspring.add(Genome::new(second));
    }
    offspring
}

/// Each gene is taken from either parent by a fair coin.
///
/// The two offspring use independent coin sequences: the first prefers parent
/// A on heads, the second prefers parent B.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCrossover;

impl UniformCrossover {
    fn child<G: Clone>(prefer: &[G], other: &[G], rng: &mut dyn RngCore) -> Vec<G> {
        prefer
            .iter()
            .zip(other)
            .map(|(p, o)| if rng.random_bool(0.5) { p.clone() } else { o.clone() })
            .collect()
    }
}

impl<G: Clone> Recombine<G> for UniformCrossover {
    fn recombine(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> (Vec<G>, Vec<G>) {
        (Self::child(a, b, rng), Self::child(b, a, rng))
    }
}

/// Cuts both parents at one point in `[1, len - 1]` and swaps the tails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePointCrossover;

impl<G: Clone> Recombine<G> for SinglePointCrossover {
    fn recombine(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> (Vec<G>, Vec<G>) {
        let cut = rng.random_range(1..a.len());
        let first = [&a[..cut], &b[cut..]].concat();
        let second = [&b[..cut], &a[cut..]].concat();
        (first, second)
    }
}

/// Picks two distinct cut points and swaps the segment between them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl TwoPointCrossover {
    fn cuts(len: usize, rng: &mut dyn RngCore) -> (usize, usize) {
        let i = rng.random_range(0..len);
        let mut j = rng.random_range(0..len - 1);
        if j >= i {
            j += 1;
        }
        (i.min(j), i.max(j))
    }
}

impl<G: Clone> Recombine<G> for TwoPointCrossover {
    fn recombine(&self, a: &[G], b: &[G], rng: &mut dyn RngCore) -> (Vec<G>, Vec<G>) {
        let (start, end) = Self::cuts(a.len(), rng);
        let first = [&a[..start], &b[start..end], &a[end..]].concat();
        let second = [&b[..start], &a[start..end], &b[end..]].concat();
        (first, second)
    }
}

macro_rules! impl_crossover_operator {
    ($ty:ty, $name:literal) => {
        impl<G: Clone> GeneticOperator<G> for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn apply(
                &self,
                population: &Population<G>,
                rng: &mut dyn RngCore,
            ) -> Result<Population<G>, OperatorError> {
                Ok(breed(self, population, rng))
            }
        }
    };
}

impl_crossover_operator!(UniformCrossover, "uniform");
impl_crossover_operator!(SinglePointCrossover, "single-point");
impl_crossover_operator!(TwoPointCrossover, "two-point");
