use serde::{Deserialize, Serialize};

/// Rarity class of a Pokémon.
///
/// The legendary tiers are ordered `Common < SubLegendary < PseudoLegendary <
/// Legendary < Mythical` (see [`Rarity::tier`]). [`Rarity::Paradox`] is a
/// separate tag outside that ladder.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    #[default]
    Common,
    SubLegendary,
    PseudoLegendary,
    Legendary,
    Mythical,
    Paradox,
}

const LEGENDARY_NDEX: &[u32] = &[
    150, 249, 250, 382, 383, 384, 483, 484, 487, 643, 644, 646, 716, 717, 718, 789, 790, 791, 792,
    800,
];

const SUB_LEGENDARY_NDEX: &[u32] = &[
    144, 145, 146, 243, 244, 245, 377, 378, 379, 380, 381, 480, 481, 482, 485, 486, 488, 638, 639,
    640, 641, 642, 645, 772, 773, 785, 786, 787, 788,
];

const PSEUDO_LEGENDARY_NDEX: &[u32] = &[149, 248, 373, 376, 445, 635, 706, 784];

const MYTHICAL_NDEX: &[u32] = &[
    151, 251, 385, 386, 489, 490, 491, 492, 493, 494, 647, 648, 649, 719, 720, 721, 801, 802, 807,
    808, 809,
];

impl Rarity {
    /// Classifies a Pokémon by its national-dex number.
    ///
    /// Never returns [`Rarity::Paradox`]; paradox Pokémon must be tagged
    /// explicitly in catalog records.
    #[must_use]
    pub fn from_national_dex(number: u32) -> Self {
        if LEGENDARY_NDEX.contains(&number) {
            Self::Legendary
        } else if SUB_LEGENDARY_NDEX.contains(&number) {
            Self::SubLegendary
        } else if PSEUDO_LEGENDARY_NDEX.contains(&number) {
            Self::PseudoLegendary
        } else if MYTHICAL_NDEX.contains(&number) {
            Self::Mythical
        } else {
            Self::Common
        }
    }

    /// Position on the legendary ladder, `None` for paradox.
    #[must_use]
    pub const fn tier(self) -> Option<u8> {
        match self {
            Self::Common => Some(0),
            Self::SubLegendary => Some(1),
            Self::PseudoLegendary => Some(2),
            Self::Legendary => Some(3),
            Self::Mythical => Some(4),
            Self::Paradox => None,
        }
    }

    /// Contribution of this rarity to a team's legendary count.
    ///
    /// Legendary and mythical count double; sub-legendary and paradox count once.
    #[must_use]
    pub const fn legendary_weight(self) -> u32 {
        match self {
            Self::Legendary | Self::Mythical => 2,
            Self::SubLegendary | Self::Paradox => 1,
            Self::Common | Self::PseudoLegendary => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_national_dex() {
        assert_eq!(Rarity::from_national_dex(150), Rarity::Legendary);
        assert_eq!(Rarity::from_national_dex(144), Rarity::SubLegendary);
        assert_eq!(Rarity::from_national_dex(149), Rarity::PseudoLegendary);
        assert_eq!(Rarity::from_national_dex(151), Rarity::Mythical);
        assert_eq!(Rarity::from_national_dex(25), Rarity::Common);
    }

    #[test]
    fn test_tiers_are_ordered() {
        let ladder = [
            Rarity::Common,
            Rarity::SubLegendary,
            Rarity::PseudoLegendary,
            Rarity::Legendary,
            Rarity::Mythical,
        ];
        assert!(ladder.windows(2).all(|w| w[0].tier() < w[1].tier()));
        assert_eq!(Rarity::Paradox.tier(), None);
    }

    #[test]
    fn test_legendary_weight() {
        assert_eq!(Rarity::Mythical.legendary_weight(), 2);
        assert_eq!(Rarity::Paradox.legendary_weight(), 1);
        assert_eq!(Rarity::PseudoLegendary.legendary_weight(), 0);
    }
}
