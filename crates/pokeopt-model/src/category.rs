use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Elemental category of a Pokémon or of an attack.
///
/// The eighteen defined categories are followed by [`Category::Undefined`], a
/// sentinel standing in for "no secondary type". It never takes part in type
/// interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
    Undefined,
}

impl Category {
    /// Number of defined categories.
    pub const COUNT: usize = 18;

    /// Every defined category, in chart order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Normal,
        Self::Fighting,
        Self::Flying,
        Self::Poison,
        Self::Ground,
        Self::Rock,
        Self::Bug,
        Self::Ghost,
        Self::Steel,
        Self::Fire,
        Self::Water,
        Self::Grass,
        Self::Electric,
        Self::Psychic,
        Self::Ice,
        Self::Dragon,
        Self::Dark,
        Self::Fairy,
    ];

    #[must_use]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Position of the category in the chart, or `None` for the sentinel.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Undefined => None,
            defined => Some(defined as usize),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Fighting => "FIGHTING",
            Self::Flying => "FLYING",
            Self::Poison => "POISON",
            Self::Ground => "GROUND",
            Self::Rock => "ROCK",
            Self::Bug => "BUG",
            Self::Ghost => "GHOST",
            Self::Steel => "STEEL",
            Self::Fire => "FIRE",
            Self::Water => "WATER",
            Self::Grass => "GRASS",
            Self::Electric => "ELECTRIC",
            Self::Psychic => "PSYCHIC",
            Self::Ice => "ICE",
            Self::Dragon => "DRAGON",
            Self::Dark => "DARK",
            Self::Fairy => "FAIRY",
            Self::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown category: {name:?}")]
pub struct CategoryParseError {
    pub name: String,
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Parses a category name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .chain([Self::Undefined])
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_chart_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), Some(i));
        }
        assert_eq!(Category::Undefined.index(), None);
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("fire".parse::<Category>().unwrap(), Category::Fire);
        assert_eq!("Psychic".parse::<Category>().unwrap(), Category::Psychic);
        assert_eq!(" DARK ".parse::<Category>().unwrap(), Category::Dark);
        assert!("shadow".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&Category::Electric).unwrap();
        assert_eq!(json, "\"ELECTRIC\"");
        let parsed: Category = serde_json::from_str("\"FAIRY\"").unwrap();
        assert_eq!(parsed, Category::Fairy);
    }
}
