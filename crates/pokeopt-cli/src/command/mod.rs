use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use pokeopt_model::Pokedex;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::util;

use self::{compare::CompareArg, inspect::InspectArg, optimize::OptimizeArg};

mod compare;
mod inspect;
mod optimize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve the best team for a catalog
    Optimize(#[clap(flatten)] OptimizeArg),
    /// Benchmark every selection and crossover combination
    Compare(#[clap(flatten)] CompareArg),
    /// Show one Pokémon with its derived resistances and weaknesses
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Optimize(arg) => optimize::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CatalogArg {
    /// Pokédex JSON file (array of records)
    #[arg(long)]
    pokedex: PathBuf,
    /// Type chart JSON file; the built-in chart when omitted
    #[arg(long)]
    type_chart: Option<PathBuf>,
}

impl CatalogArg {
    pub(crate) fn load(&self) -> anyhow::Result<Arc<Pokedex>> {
        let chart = util::read_type_chart_file(self.type_chart.as_ref())?;
        util::read_pokedex_file(&self.pokedex, &chart)
    }
}

/// Seeded generator when `seed` is given, OS-seeded otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> Pcg64Mcg {
    match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    }
}
