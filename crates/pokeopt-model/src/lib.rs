//! Domain model for team optimization.
//!
//! This crate holds everything the optimizer treats as read-only input:
//!
//! - [`Category`] and [`TypeChart`] - the type-interaction model, built once at startup
//! - [`Pokemon`] - a selectable team member with stats, rarity and derived
//!   resistances/weaknesses
//! - [`Catalog`] and [`Pokedex`] - the source of Pokémon drawn by the optimizer
//!
//! # Example
//!
//! ```
//! use pokeopt_model::{Category, Pokemon, Rarity, Stats, TypeChart};
//!
//! let chart = TypeChart::standard();
//! let stats = Stats { hp: 78, attack: 84, defense: 78, special_attack: 109, special_defense: 85, speed: 100 };
//! let charizard = Pokemon::new(6, "Charizard", Category::Fire, Category::Flying, stats, Rarity::Common, &chart)?;
//!
//! assert_eq!(charizard.total(), 534);
//! assert!(charizard.weaknesses().contains(&Category::Rock));
//! assert!(charizard.resistances().contains(&Category::Ground));
//! # Ok::<(), pokeopt_model::PokemonError>(())
//! ```

pub use self::{catalog::*, category::*, pokemon::*, rarity::*, type_chart::*};

pub mod catalog;
pub mod category;
pub mod pokemon;
pub mod rarity;
pub mod type_chart;
