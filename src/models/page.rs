use serde::{Deserialize, Serialize};

use super::entry::PokedexEntry;

/// A list item exactly as the API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub name: String,
    pub url: String,
}

/// One decoded page of the list endpoint together with the derived entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PokemonPage {
    /// Total number of entries the API declares, across all pages.
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<RawEntry>,
    pub entries: Vec<PokedexEntry>,
}

impl PokemonPage {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
