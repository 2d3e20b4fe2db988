use std::path::PathBuf;

use pokeopt_ga::{CrossoverKind, OptimizationReport, OptimizerConfig, SelectionKind};

use crate::util;

use super::CatalogArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct OptimizeArg {
    #[clap(flatten)]
    catalog: CatalogArg,
    /// Optimizer config JSON file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    selection: Option<SelectionKind>,
    #[arg(long)]
    crossover: Option<CrossoverKind>,
    #[arg(long)]
    team_size: Option<usize>,
    #[arg(long)]
    population_size: Option<usize>,
    #[arg(long)]
    max_iterations: Option<i64>,
    /// Generations without improvement before stopping (0 disables)
    #[arg(long)]
    max_no_improvements: Option<i64>,
    /// Chance that mutation runs on a generation
    #[arg(long)]
    mutation_probability: Option<f64>,
    /// Chance that mutation changes a given team
    #[arg(long)]
    gene_mutation_probability: Option<f64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl OptimizeArg {
    fn config(&self) -> anyhow::Result<OptimizerConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("optimizer config", path)?,
            None => OptimizerConfig::default(),
        };
        if let Some(selection) = self.selection {
            config.selection = selection;
        }
        if let Some(crossover) = self.crossover {
            config.crossover = crossover;
        }
        if let Some(team_size) = self.team_size {
            config.team_size = team_size;
        }
        if let Some(population_size) = self.population_size {
            config.population_size = population_size;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(max_no_improvements) = self.max_no_improvements {
            config.max_no_improvements = max_no_improvements;
        }
        if let Some(probability) = self.mutation_probability {
            config.mutation_probability = probability;
        }
        if let Some(probability) = self.gene_mutation_probability {
            config.gene_mutation_probability = probability;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &OptimizeArg) -> anyhow::Result<()> {
    let catalog = arg.catalog.load()?;
    let config = arg.config()?;
    let mut rng = super::make_rng(arg.seed);

    eprintln!(
        "Optimizing teams of {} with {} selection and {} crossover...",
        config.team_size(),
        config.selection.as_str(),
        config.crossover.as_str(),
    );
    let report = pokeopt_ga::optimize(&config, catalog, &mut rng)?;
    for line in &report.log {
        eprintln!("  {line}");
    }
    print_report(&report);

    util::save_json(&report, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        eprintln!();
        eprintln!("Report saved: {}", path.display());
    }
    Ok(())
}

fn print_report(report: &OptimizationReport) {
    eprintln!();
    eprintln!("Best team (fitness {:.3}):", report.best_fitness);
    for member in &report.best_team {
        let types = member
            .types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("/");
        eprintln!(
            "  #{:<4} {:<24} {:<18} {}",
            member.number, member.name, types, member.total
        );
    }
    let b = &report.breakdown;
    eprintln!("  Breakdown:");
    eprintln!("    Average stats:      {:.3}", b.average_stats);
    eprintln!("    Type diversity:     {:.3}", b.type_diversity);
    eprintln!("    Resistance breadth: {:.3}", b.resistance_breadth);
    eprintln!("    Legendary:          {:.3}", b.legendary);
    eprintln!("    Common weakness:    {:.3}", b.common_weakness);
    eprintln!(
        "  Generations: {} (best: {})",
        report.iterations, report.best_generation
    );
}
