pub mod pokeapi;

pub use pokeapi::{CatalogError, PokeApiClient};
