use std::{path::PathBuf, sync::Arc, time::Instant};

use chrono::{DateTime, Utc};
use pokeopt_ga::{CrossoverKind, OptimizerConfig, SelectionKind, stats::DescriptiveStats};
use serde::Serialize;

use crate::util;

use super::CatalogArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    catalog: CatalogArg,
    /// Base optimizer config JSON file; selection and crossover are overridden
    #[arg(long)]
    config: Option<PathBuf>,
    /// Runs per combination
    #[arg(long, default_value_t = 5)]
    runs: u64,
    /// Seed of the first run; later runs use the following seeds
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 200)]
    population_size: usize,
    #[arg(long, default_value_t = 40)]
    max_iterations: i64,
    #[arg(long, default_value_t = 10)]
    max_no_improvements: i64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct Comparison {
    generated_at: DateTime<Utc>,
    runs: u64,
    config: OptimizerConfig,
    results: Vec<CombinationResult>,
}

#[derive(Debug, Clone, Serialize)]
struct CombinationResult {
    selection: SelectionKind,
    crossover: CrossoverKind,
    best_fitness: Option<DescriptiveStats>,
    iterations: Option<DescriptiveStats>,
    elapsed_ms: Option<DescriptiveStats>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let catalog = arg.catalog.load()?;
    let mut base = match &arg.config {
        Some(path) => util::read_json_file("optimizer config", path)?,
        None => OptimizerConfig::default(),
    };
    base.population_size = arg.population_size;
    base.max_iterations = arg.max_iterations;
    base.max_no_improvements = arg.max_no_improvements;

    let mut results = Vec::new();
    for selection in SelectionKind::ALL {
        for crossover in CrossoverKind::ALL {
            let config = OptimizerConfig {
                selection,
                crossover,
                ..base.clone()
            };
            eprintln!(
                "Running {} x {} ({} runs)...",
                selection.as_str(),
                crossover.as_str(),
                arg.runs
            );
            let mut fitness = Vec::new();
            let mut iterations = Vec::new();
            let mut elapsed = Vec::new();
            for i in 0..arg.runs {
                let mut rng = super::make_rng(arg.seed.map(|seed| seed.wrapping_add(i)));
                let start = Instant::now();
                let report = pokeopt_ga::optimize(&config, Arc::clone(&catalog), &mut rng)?;
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                tracing::debug!(
                    selection = selection.as_str(),
                    crossover = crossover.as_str(),
                    run = i,
                    best_fitness = report.best_fitness,
                    iterations = report.iterations,
                    elapsed_ms,
                    "comparison run finished"
                );
                elapsed.push(elapsed_ms);
                fitness.push(report.best_fitness);
                #[expect(clippy::cast_precision_loss)]
                let generations = report.iterations as f64;
                iterations.push(generations);
            }
            results.push(CombinationResult {
                selection,
                crossover,
                best_fitness: DescriptiveStats::new(fitness),
                iterations: DescriptiveStats::new(iterations),
                elapsed_ms: DescriptiveStats::new(elapsed),
            });
        }
    }

    print_table(&results);
    let comparison = Comparison {
        generated_at: Utc::now(),
        runs: arg.runs,
        config: base,
        results,
    };
    util::save_json(&comparison, arg.output.as_deref())?;
    Ok(())
}

fn print_table(results: &[CombinationResult]) {
    eprintln!();
    eprintln!(
        "{:<11} {:<12} {:>9} {:>9} {:>9} {:>8} {:>10}",
        "selection", "crossover", "fit mean", "fit max", "fit std", "gens", "ms"
    );
    for r in results {
        let (Some(fitness), Some(iterations), Some(elapsed)) =
            (&r.best_fitness, &r.iterations, &r.elapsed_ms)
        else {
            continue;
        };
        eprintln!(
            "{:<11} {:<12} {:>9.3} {:>9.3} {:>9.3} {:>8.1} {:>10.1}",
            r.selection.as_str(),
            r.crossover.as_str(),
            fitness.mean,
            fitness.max,
            fitness.std_dev,
            iterations.mean,
            elapsed.mean,
        );
    }
}
