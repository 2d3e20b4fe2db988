use std::collections::BTreeSet;

use anyhow::Context as _;
use pokeopt_model::{Catalog as _, Category, Pokemon};

use super::CatalogArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    #[clap(flatten)]
    catalog: CatalogArg,
    /// National-dex number
    number: u32,
    /// Show every form registered under the number
    #[arg(long)]
    all_forms: bool,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let pokedex = arg.catalog.load()?;
    let first = pokedex
        .pokemon_by_id(arg.number)
        .with_context(|| format!("Failed to look up pokemon #{}", arg.number))?;

    if arg.all_forms {
        for (i, pokemon) in pokedex.forms(arg.number).iter().enumerate() {
            if i > 0 {
                println!();
            }
            print_pokemon(pokemon);
        }
    } else {
        print_pokemon(&first);
    }
    Ok(())
}

fn categories(set: &BTreeSet<Category>) -> String {
    if set.is_empty() {
        return "-".to_owned();
    }
    set.iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_pokemon(pokemon: &Pokemon) {
    let types = pokemon
        .categories()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join("/");
    let stats = pokemon.stats();
    println!("{pokemon} [{types}]");
    println!("  Rarity:      {:?}", pokemon.rarity());
    if pokemon.is_mega_evolution() {
        println!("  Mega evolution");
    }
    println!(
        "  Stats:       HP {} / Atk {} / Def {} / SpA {} / SpD {} / Spe {} (total {})",
        stats.hp,
        stats.attack,
        stats.defense,
        stats.special_attack,
        stats.special_defense,
        stats.speed,
        pokemon.total()
    );
    println!("  Resistances: {}", categories(pokemon.resistances()));
    println!("  Weaknesses:  {}", categories(pokemon.weaknesses()));
}
