use std::{
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    rarity::Rarity,
    type_chart::{Affinities, TypeChart},
};

/// Base stats of a Pokémon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.hp
            .saturating_add(self.attack)
            .saturating_add(self.defense)
            .saturating_add(self.special_attack)
            .saturating_add(self.special_defense)
            .saturating_add(self.speed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PokemonError {
    #[display("pokemon #{number} {name} must have at least one defined category")]
    NoDefinedCategory { number: u32, name: String },
}

/// A selectable team member.
///
/// Resistances and weaknesses are derived once, at construction, from the
/// categories and a [`TypeChart`]. Two Pokémon are equal when they share both
/// national-dex number and name (alternate forms share a number).
#[derive(Debug, Clone, Serialize)]
pub struct Pokemon {
    number: u32,
    name: String,
    primary: Category,
    secondary: Category,
    stats: Stats,
    total: u32,
    rarity: Rarity,
    affinities: Affinities,
}

impl Pokemon {
    /// Lower bound used when normalizing base-stat totals.
    pub const MIN_TOTAL_STATS: u32 = 175;
    /// Ceiling of a non-legendary base-stat total.
    pub const MAX_TOTAL_STATS_STANDARD: u32 = 600;
    /// Highest base-stat total in the games.
    pub const MAX_TOTAL_STATS_LEGENDARY: u32 = 780;

    /// Creates a Pokémon, deriving its total and affinities.
    ///
    /// If only `secondary` is defined the two categories are swapped so that
    /// the primary category is always defined.
    pub fn new(
        number: u32,
        name: impl Into<String>,
        primary: Category,
        secondary: Category,
        stats: Stats,
        rarity: Rarity,
        chart: &TypeChart,
    ) -> Result<Self, PokemonError> {
        let name = name.into();
        let (primary, secondary) = match (primary.is_defined(), secondary.is_defined()) {
            (false, false) => return Err(PokemonError::NoDefinedCategory { number, name }),
            (false, true) => (secondary, primary),
            _ => (primary, secondary),
        };
        let affinities = chart.affinities(primary, secondary);
        Ok(Self {
            number,
            name,
            primary,
            secondary,
            stats,
            total: stats.total(),
            rarity,
            affinities,
        })
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn primary(&self) -> Category {
        self.primary
    }

    /// Second category, [`Category::Undefined`] for single-category Pokémon.
    #[must_use]
    pub fn secondary(&self) -> Category {
        self.secondary
    }

    /// The defined categories, primary first.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        [self.primary, self.secondary]
            .into_iter()
            .filter(|c| c.is_defined())
    }

    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Sum of the base stats.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    #[must_use]
    pub fn resistances(&self) -> &BTreeSet<Category> {
        &self.affinities.resistances
    }

    #[must_use]
    pub fn weaknesses(&self) -> &BTreeSet<Category> {
        &self.affinities.weaknesses
    }

    /// Whether this is a mega evolution, judged by name.
    ///
    /// Meganium is the one Pokémon whose name contains "Mega" without being one.
    #[must_use]
    pub fn is_mega_evolution(&self) -> bool {
        self.name.contains("Mega") && self.name != "Meganium"
    }
}

impl PartialEq for Pokemon {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.name == other.name
    }
}

impl Eq for Pokemon {}

impl Hash for Pokemon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(value: u32) -> Stats {
        Stats {
            hp: value,
            attack: value,
            defense: value,
            special_attack: value,
            special_defense: value,
            speed: value,
        }
    }

    #[test]
    fn test_total_is_sum_of_stats() {
        let chart = TypeChart::standard();
        let stats = Stats {
            hp: 45,
            attack: 49,
            defense: 49,
            special_attack: 65,
            special_defense: 65,
            speed: 45,
        };
        let p = Pokemon::new(
            1,
            "Bulbasaur",
            Category::Grass,
            Category::Poison,
            stats,
            Rarity::Common,
            &chart,
        )
        .unwrap();
        assert_eq!(p.total(), 318);
    }

    #[test]
    fn test_total_saturates() {
        assert_eq!(stats(u32::MAX / 2).total(), u32::MAX);
        assert_eq!(stats(u32::MAX).total(), u32::MAX);
    }

    #[test]
    fn test_no_defined_category_is_rejected() {
        let chart = TypeChart::standard();
        let err = Pokemon::new(
            0,
            "MissingNo",
            Category::Undefined,
            Category::Undefined,
            stats(10),
            Rarity::Common,
            &chart,
        )
        .unwrap_err();
        assert!(matches!(err, PokemonError::NoDefinedCategory { number: 0, .. }));
    }

    #[test]
    fn test_undefined_primary_is_swapped() {
        let chart = TypeChart::standard();
        let p = Pokemon::new(
            4,
            "Charmander",
            Category::Undefined,
            Category::Fire,
            stats(50),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        assert_eq!(p.primary(), Category::Fire);
        assert_eq!(p.secondary(), Category::Undefined);
        assert_eq!(p.categories().collect::<Vec<_>>(), vec![Category::Fire]);
        assert!(p.weaknesses().contains(&Category::Water));
    }

    #[test]
    fn test_category_order_does_not_change_affinities() {
        let chart = TypeChart::standard();
        let a = Pokemon::new(
            6,
            "Charizard",
            Category::Fire,
            Category::Flying,
            stats(80),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        let b = Pokemon::new(
            6,
            "Charizard",
            Category::Flying,
            Category::Fire,
            stats(80),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        assert_eq!(a.resistances(), b.resistances());
        assert_eq!(a.weaknesses(), b.weaknesses());
        assert!(a.weaknesses().contains(&Category::Rock));
        assert!(a.resistances().contains(&Category::Ground));
    }

    #[test]
    fn test_equality_by_number_and_name() {
        let chart = TypeChart::standard();
        let a = Pokemon::new(
            25,
            "Pikachu",
            Category::Electric,
            Category::Undefined,
            stats(50),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        let b = Pokemon::new(
            25,
            "Pikachu",
            Category::Electric,
            Category::Undefined,
            stats(90),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        let c = Pokemon::new(
            25,
            "Pikachu-Libre",
            Category::Electric,
            Category::Fighting,
            stats(50),
            Rarity::Common,
            &chart,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_mega_evolution_tag() {
        let chart = TypeChart::standard();
        let make = |name: &str| {
            Pokemon::new(
                1,
                name,
                Category::Grass,
                Category::Undefined,
                stats(80),
                Rarity::Common,
                &chart,
            )
            .unwrap()
        };
        assert!(make("Mega Venusaur").is_mega_evolution());
        assert!(make("Charizard Mega X").is_mega_evolution());
        assert!(!make("Meganium").is_mega_evolution());
        assert!(!make("Venusaur").is_mega_evolution());
    }
}
