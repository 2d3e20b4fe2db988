//! Catalog of selectable Pokémon.
//!
//! The optimizer only needs the [`Catalog`] capability: draw one Pokémon at
//! random, or look one up by national-dex number. [`Pokedex`] is the in-memory
//! implementation, built once from [`PokemonRecord`]s and read-only afterwards,
//! so a single instance can be shared (behind an `Arc`) by concurrent runs.

use std::{collections::BTreeMap, io::Read, sync::Arc};

use rand::{RngCore, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    pokemon::{Pokemon, PokemonError, Stats},
    rarity::Rarity,
    type_chart::TypeChart,
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CatalogError {
    #[display("the catalog is empty")]
    Empty,
    #[display("no pokemon with national-dex number {number}")]
    NotFound { number: u32 },
    #[display("invalid catalog record: {source}")]
    InvalidRecord { source: PokemonError },
    #[display("failed to parse catalog: {source}")]
    Json { source: serde_json::Error },
}

/// Source of Pokémon for team generation and mutation.
pub trait Catalog {
    /// Draws one Pokémon uniformly from the catalog.
    fn random_pokemon(&self, rng: &mut dyn RngCore) -> Result<Arc<Pokemon>, CatalogError>;

    /// Looks up a Pokémon by national-dex number.
    fn pokemon_by_id(&self, number: u32) -> Result<Arc<Pokemon>, CatalogError>;
}

/// Serialized form of a catalog entry.
///
/// `total` is informational: it is recomputed from the stats and a mismatch is
/// logged. A missing `rarity` is derived from the national-dex number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonRecord {
    pub number: u32,
    pub name: String,
    pub type1: Category,
    #[serde(default)]
    pub type2: Option<Category>,
    #[serde(flatten)]
    pub stats: Stats,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub rarity: Option<Rarity>,
}

impl PokemonRecord {
    pub fn into_pokemon(self, chart: &TypeChart) -> Result<Pokemon, PokemonError> {
        let Self {
            number,
            name,
            type1,
            type2,
            stats,
            total,
            rarity,
        } = self;
        if let Some(total) = total.filter(|t| *t != stats.total()) {
            tracing::warn!(
                number,
                name = %name,
                declared = total,
                computed = stats.total(),
                "ignoring inconsistent stat total"
            );
        }
        let rarity = rarity.unwrap_or_else(|| Rarity::from_national_dex(number));
        Pokemon::new(
            number,
            name,
            type1,
            type2.unwrap_or(Category::Undefined),
            stats,
            rarity,
            chart,
        )
    }
}

/// In-memory catalog grouping alternate forms under their national-dex number.
#[derive(Debug, Clone, Default)]
pub struct Pokedex {
    forms: BTreeMap<u32, Vec<Arc<Pokemon>>>,
    numbers: Vec<u32>,
}

impl Pokedex {
    #[must_use]
    pub fn from_pokemon<I>(pokemon: I) -> Self
    where
        I: IntoIterator<Item = Pokemon>,
    {
        let mut forms: BTreeMap<u32, Vec<Arc<Pokemon>>> = BTreeMap::new();
        for p in pokemon {
            forms.entry(p.number()).or_default().push(Arc::new(p));
        }
        let numbers = forms.keys().copied().collect();
        Self { forms, numbers }
    }

    pub fn from_records<I>(records: I, chart: &TypeChart) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = PokemonRecord>,
    {
        let pokemon = records
            .into_iter()
            .map(|r| r.into_pokemon(chart))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| CatalogError::InvalidRecord { source })?;
        let pokedex = Self::from_pokemon(pokemon);
        tracing::info!(
            species = pokedex.species_count(),
            forms = pokedex.len(),
            "pokedex loaded"
        );
        Ok(pokedex)
    }

    /// Loads a catalog from a JSON array of [`PokemonRecord`]s.
    pub fn from_json_reader<R>(reader: R, chart: &TypeChart) -> Result<Self, CatalogError>
    where
        R: Read,
    {
        let records: Vec<PokemonRecord> =
            serde_json::from_reader(reader).map_err(|source| CatalogError::Json { source })?;
        Self::from_records(records, chart)
    }

    /// Number of Pokémon, counting every form.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Number of distinct national-dex numbers.
    #[must_use]
    pub fn species_count(&self) -> usize {
        self.numbers.len()
    }

    /// Every Pokémon in national-dex order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<Pokemon>> + '_ {
        self.forms.values().flatten()
    }

    /// Every form registered under `number`.
    #[must_use]
    pub fn forms(&self, number: u32) -> &[Arc<Pokemon>] {
        self.forms.get(&number).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Catalog for Pokedex {
    /// Draws a national-dex number uniformly, then one of its forms.
    fn random_pokemon(&self, rng: &mut dyn RngCore) -> Result<Arc<Pokemon>, CatalogError> {
        let number = self.numbers.choose(rng).ok_or(CatalogError::Empty)?;
        self.forms(*number)
            .choose(rng)
            .cloned()
            .ok_or(CatalogError::Empty)
    }

    /// Returns the first registered form.
    fn pokemon_by_id(&self, number: u32) -> Result<Arc<Pokemon>, CatalogError> {
        self.forms(number)
            .first()
            .cloned()
            .ok_or(CatalogError::NotFound { number })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const SAMPLE: &str = r#"[
        { "number": 6, "name": "Charizard", "type1": "FIRE", "type2": "FLYING",
          "hp": 78, "attack": 84, "defense": 78, "specialAttack": 109, "specialDefense": 85, "speed": 100 },
        { "number": 6, "name": "Charizard Mega X", "type1": "FIRE", "type2": "DRAGON",
          "hp": 78, "attack": 130, "defense": 111, "specialAttack": 130, "specialDefense": 85, "speed": 100 },
        { "number": 150, "name": "Mewtwo", "type1": "PSYCHIC",
          "hp": 106, "attack": 110, "defense": 90, "specialAttack": 154, "specialDefense": 90, "speed": 130,
          "total": 1 },
        { "number": 1007, "name": "Koraidon", "type1": "FIGHTING", "type2": "DRAGON",
          "hp": 100, "attack": 135, "defense": 115, "specialAttack": 85, "specialDefense": 100, "speed": 135,
          "rarity": "PARADOX" }
    ]"#;

    fn sample() -> Pokedex {
        Pokedex::from_json_reader(SAMPLE.as_bytes(), &TypeChart::standard()).unwrap()
    }

    #[test]
    fn test_load_groups_forms() {
        let dex = sample();
        assert_eq!(dex.len(), 4);
        assert_eq!(dex.species_count(), 3);
        assert_eq!(dex.forms(6).len(), 2);
        assert!(dex.forms(7).is_empty());
    }

    #[test]
    fn test_record_total_is_recomputed() {
        let dex = sample();
        let mewtwo = dex.pokemon_by_id(150).unwrap();
        assert_eq!(mewtwo.total(), 680);
        assert_eq!(mewtwo.rarity(), Rarity::Legendary);
        assert_eq!(mewtwo.secondary(), Category::Undefined);
    }

    #[test]
    fn test_explicit_rarity_wins() {
        let dex = sample();
        assert_eq!(dex.pokemon_by_id(1007).unwrap().rarity(), Rarity::Paradox);
    }

    #[test]
    fn test_by_id_returns_first_form_or_not_found() {
        let dex = sample();
        assert_eq!(dex.pokemon_by_id(6).unwrap().name(), "Charizard");
        assert!(dex.pokemon_by_id(999).unwrap_err().is_not_found());
    }

    #[test]
    fn test_random_draws_from_catalog() {
        let dex = sample();
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        for _ in 0..50 {
            let p = dex.random_pokemon(&mut rng).unwrap();
            assert!(dex.all().any(|q| **q == *p));
        }
    }

    #[test]
    fn test_empty_catalog_fails_fast() {
        let dex = Pokedex::default();
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        assert!(dex.random_pokemon(&mut rng).unwrap_err().is_empty());
    }

    #[test]
    fn test_invalid_record_is_reported() {
        let json = r#"[{ "number": 0, "name": "Glitch", "type1": "UNDEFINED",
            "hp": 1, "attack": 1, "defense": 1, "specialAttack": 1, "specialDefense": 1, "speed": 1 }]"#;
        let err = Pokedex::from_json_reader(json.as_bytes(), &TypeChart::standard()).unwrap_err();
        assert!(err.is_invalid_record());
    }
}
