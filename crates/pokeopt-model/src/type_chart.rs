//! Type-interaction model: how effective each category is against every other.
//!
//! A [`TypeChart`] is an immutable attacker × defender matrix of
//! [`Effectiveness`] values. It is built once (either the built-in
//! [`TypeChart::standard`] chart or one loaded from JSON) and is then shared
//! read-only.
//!
//! Reading a row gives a category's *offensive* profile; reading a column
//! gives its *defensive* profile. Combining the defensive profiles of one or
//! two categories yields the [`Affinities`] (resistances and weaknesses) of a
//! Pokémon.
//!
//! # Combination rule
//!
//! For a dual-category defender, the two defensive multipliers against an
//! attacking category are combined order-independently:
//!
//! | first \ second | immune | resists | normal | weak |
//! |----------------|--------|---------|--------|------|
//! | immune         | R      | R       | R      | R    |
//! | resists        | R      | R       | R      | -    |
//! | normal         | R      | R       | -      | W    |
//! | weak           | R      | -       | W      | W    |
//!
//! (`R` = resistance, `W` = weakness, `-` = neither.) A single-category
//! defender behaves as if its second multiplier were `normal`.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::Read,
};

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Damage multiplier of one category attacking another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Effectiveness {
    /// 0×
    Immune,
    /// 0.5×
    Resists,
    /// 1×
    Normal,
    /// 2×
    Weak,
}

impl Effectiveness {
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Immune => 0.0,
            Self::Resists => 0.5,
            Self::Normal => 1.0,
            Self::Weak => 2.0,
        }
    }

    /// Combines two defensive multipliers against the same attacker.
    ///
    /// Returns `None` when the pair is neither a resistance nor a weakness.
    #[must_use]
    pub const fn combine(self, other: Self) -> Option<Affinity> {
        match (self, other) {
            (Self::Immune, _) | (_, Self::Immune) => Some(Affinity::Resistance),
            (Self::Resists, Self::Resists | Self::Normal) | (Self::Normal, Self::Resists) => {
                Some(Affinity::Resistance)
            }
            (Self::Weak, Self::Weak | Self::Normal) | (Self::Normal, Self::Weak) => {
                Some(Affinity::Weakness)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("multiplier {value} is not one of 0, 0.5, 1, 2")]
pub struct EffectivenessError {
    pub value: f64,
}

impl TryFrom<f64> for Effectiveness {
    type Error = EffectivenessError;

    #[expect(clippy::float_cmp)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        [Self::Immune, Self::Resists, Self::Normal, Self::Weak]
            .into_iter()
            .find(|e| e.multiplier() == value)
            .ok_or(EffectivenessError { value })
    }
}

/// Outcome of combining defensive multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Affinity {
    Resistance,
    Weakness,
}

/// Resistances and weaknesses derived from one or two categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affinities {
    pub resistances: BTreeSet<Category>,
    pub weaknesses: BTreeSet<Category>,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TypeChartError {
    #[display("the undefined category cannot appear in a type chart")]
    #[from(ignore)]
    UndefinedCategory,
    #[display("invalid multiplier for {attacker} against {defender}: {source}")]
    #[from(ignore)]
    InvalidMultiplier {
        attacker: Category,
        defender: Category,
        source: EffectivenessError,
    },
    #[display("failed to parse type chart: {_0}")]
    Json(serde_json::Error),
}

/// Attacker × defender effectiveness matrix over the defined categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeChart {
    matrix: [[Effectiveness; Category::COUNT]; Category::COUNT],
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}

impl TypeChart {
    /// A chart where every interaction is normal.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            matrix: [[Effectiveness::Normal; Category::COUNT]; Category::COUNT],
        }
    }

    /// The built-in chart of the current game generation.
    #[must_use]
    pub fn standard() -> Self {
        let mut chart = Self::neutral();
        for (attacker, row) in STANDARD_CHART {
            for &(defender, effectiveness) in *row {
                chart.set(*attacker, defender, effectiveness);
            }
        }
        chart
    }

    /// Builds a chart from `(attacker, defender, multiplier)` triples.
    ///
    /// Pairs that are not listed stay normal.
    pub fn from_entries<I>(entries: I) -> Result<Self, TypeChartError>
    where
        I: IntoIterator<Item = (Category, Category, f64)>,
    {
        let mut chart = Self::neutral();
        for (attacker, defender, multiplier) in entries {
            if !attacker.is_defined() || !defender.is_defined() {
                return Err(TypeChartError::UndefinedCategory);
            }
            let effectiveness = Effectiveness::try_from(multiplier).map_err(|source| {
                TypeChartError::InvalidMultiplier {
                    attacker,
                    defender,
                    source,
                }
            })?;
            chart.set(attacker, defender, effectiveness);
        }
        Ok(chart)
    }

    /// Loads a chart from a JSON object mapping attacker → defender → multiplier.
    ///
    /// ```
    /// use pokeopt_model::{Category, Effectiveness, TypeChart};
    ///
    /// let json = r#"{ "FIRE": { "GRASS": 2.0, "WATER": 0.5 } }"#;
    /// let chart = TypeChart::from_json_reader(json.as_bytes()).unwrap();
    /// assert_eq!(chart.effectiveness(Category::Fire, Category::Grass), Effectiveness::Weak);
    /// assert_eq!(chart.effectiveness(Category::Fire, Category::Ice), Effectiveness::Normal);
    /// ```
    pub fn from_json_reader<R>(reader: R) -> Result<Self, TypeChartError>
    where
        R: Read,
    {
        let raw: BTreeMap<Category, BTreeMap<Category, f64>> = serde_json::from_reader(reader)?;
        Self::from_entries(raw.into_iter().flat_map(|(attacker, row)| {
            row.into_iter()
                .map(move |(defender, multiplier)| (attacker, defender, multiplier))
        }))
    }

    fn set(&mut self, attacker: Category, defender: Category, effectiveness: Effectiveness) {
        if let (Some(a), Some(d)) = (attacker.index(), defender.index()) {
            self.matrix[a][d] = effectiveness;
        }
    }

    /// Multiplier of `attacker` hitting `defender`.
    ///
    /// Interactions involving [`Category::Undefined`] are always normal.
    #[must_use]
    pub fn effectiveness(&self, attacker: Category, defender: Category) -> Effectiveness {
        match (attacker.index(), defender.index()) {
            (Some(a), Some(d)) => self.matrix[a][d],
            _ => Effectiveness::Normal,
        }
    }

    /// How `category` fares when attacking each defined category.
    ///
    /// Empty for the undefined category.
    #[must_use]
    pub fn offensive_profile(&self, category: Category) -> BTreeMap<Category, Effectiveness> {
        let Some(a) = category.index() else {
            return BTreeMap::new();
        };
        Category::ALL
            .into_iter()
            .zip(self.matrix[a])
            .collect()
    }

    /// How `category` fares when defending against each defined category.
    ///
    /// Empty for the undefined category.
    #[must_use]
    pub fn defensive_profile(&self, category: Category) -> BTreeMap<Category, Effectiveness> {
        let Some(d) = category.index() else {
            return BTreeMap::new();
        };
        Category::ALL
            .into_iter()
            .map(|attacker| (attacker, self.matrix[attacker as usize][d]))
            .collect()
    }

    /// Derives resistances and weaknesses for a defender of one or two categories.
    ///
    /// Pass [`Category::Undefined`] as `secondary` for a single-category defender.
    /// The result does not depend on the order of the two categories.
    #[must_use]
    pub fn affinities(&self, primary: Category, secondary: Category) -> Affinities {
        let mut affinities = Affinities::default();
        for attacker in Category::ALL {
            let first = self.effectiveness(attacker, primary);
            let second = self.effectiveness(attacker, secondary);
            match first.combine(second) {
                Some(Affinity::Resistance) => {
                    affinities.resistances.insert(attacker);
                }
                Some(Affinity::Weakness) => {
                    affinities.weaknesses.insert(attacker);
                }
                None => {}
            }
        }
        affinities
    }
}

type ChartRow = (Category, &'static [(Category, Effectiveness)]);

#[rustfmt::skip]
const STANDARD_CHART: &[ChartRow] = {
    use Category::{
        Bug, Dark, Dragon, Electric, Fairy, Fighting, Fire, Flying, Ghost, Grass, Ground, Ice,
        Normal, Poison, Psychic, Rock, Steel, Water,
    };
    use Effectiveness::{Immune as X, Resists as H, Weak as D};
    &[
        (Normal, &[(Rock, H), (Ghost, X), (Steel, H)]),
        (Fighting, &[(Normal, D), (Flying, H), (Poison, H), (Rock, D), (Bug, H), (Ghost, X), (Steel, D), (Psychic, H), (Ice, D), (Dark, D), (Fairy, H)]),
        (Flying, &[(Fighting, D), (Rock, H), (Bug, D), (Steel, H), (Grass, D), (Electric, H)]),
        (Poison, &[(Poison, H), (Ground, H), (Rock, H), (Ghost, H), (Steel, X), (Grass, D), (Fairy, D)]),
        (Ground, &[(Flying, X), (Poison, D), (Rock, D), (Bug, H), (Steel, D), (Fire, D), (Grass, H), (Electric, D)]),
        (Rock, &[(Fighting, H), (Flying, D), (Ground, H), (Bug, D), (Steel, H), (Fire, D), (Ice, D)]),
        (Bug, &[(Fighting, H), (Flying, H), (Poison, H), (Ghost, H), (Steel, H), (Fire, H), (Grass, D), (Psychic, D), (Dark, D), (Fairy, H)]),
        (Ghost, &[(Normal, X), (Ghost, D), (Psychic, D), (Dark, H)]),
        (Steel, &[(Rock, D), (Steel, H), (Fire, H), (Water, H), (Electric, H), (Ice, D), (Fairy, D)]),
        (Fire, &[(Rock, H), (Bug, D), (Steel, D), (Fire, H), (Water, H), (Grass, D), (Ice, D), (Dragon, H)]),
        (Water, &[(Ground, D), (Rock, D), (Fire, D), (Water, H), (Grass, H), (Dragon, H)]),
        (Grass, &[(Flying, H), (Poison, H), (Ground, D), (Rock, D), (Bug, H), (Steel, H), (Fire, H), (Water, D), (Grass, H), (Dragon, H)]),
        (Electric, &[(Flying, D), (Ground, X), (Water, D), (Grass, H), (Electric, H), (Dragon, H)]),
        (Psychic, &[(Fighting, D), (Poison, D), (Steel, H), (Psychic, H), (Dark, X)]),
        (Ice, &[(Flying, D), (Ground, D), (Steel, H), (Fire, H), (Water, H), (Grass, D), (Ice, H), (Dragon, D)]),
        (Dragon, &[(Steel, H), (Dragon, D), (Fairy, X)]),
        (Dark, &[(Fighting, H), (Ghost, D), (Psychic, D), (Dark, H), (Fairy, H)]),
        (Fairy, &[(Fighting, D), (Poison, H), (Steel, H), (Fire, H), (Dragon, D), (Dark, D)]),
    ]
};
