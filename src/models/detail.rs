use serde::{Deserialize, Serialize};

use crate::color::Rgb;

use super::entry::capitalize_first;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// Decigrams.
    pub weight: u32,
    /// Decimetres.
    pub height: u32,
    /// Type names in slot order, lower-case as served.
    pub types: Vec<String>,
    pub sprite_url: String,
}

impl Default for PokemonDetail {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            weight: 0,
            height: 0,
            types: Vec::new(),
            sprite_url: String::new(),
        }
    }
}

impl PokemonDetail {
    pub fn display_name(&self) -> String {
        capitalize_first(&self.name)
    }

    pub fn weight_kg(&self) -> f32 {
        (self.weight as f32 * 100.0).round() / 1000.0
    }

    pub fn height_m(&self) -> f32 {
        (self.height as f32 * 100.0).round() / 1000.0
    }

    pub fn type_labels(&self) -> Vec<String> {
        self.types.iter().map(|name| capitalize_first(name)).collect()
    }

    pub fn primary_color(&self) -> Option<Rgb> {
        self.types.first().and_then(|name| type_color(name))
    }
}

/// Accent color for a type badge.
pub fn type_color(type_name: &str) -> Option<Rgb> {
    let hex = match type_name.to_ascii_lowercase().as_str() {
        "normal" => 0xA8A77A,
        "fire" => 0xEE8130,
        "water" => 0x6390F0,
        "electric" => 0xF7D02C,
        "grass" => 0x7AC74C,
        "ice" => 0x96D9D6,
        "fighting" => 0xC22E28,
        "poison" => 0xA33EA1,
        "ground" => 0xE2BF65,
        "flying" => 0xA98FF3,
        "psychic" => 0xF95587,
        "bug" => 0xA6B91A,
        "rock" => 0xB6A136,
        "ghost" => 0x735797,
        "dragon" => 0x6F35FC,
        "dark" => 0x705746,
        "steel" => 0xB7B7CE,
        "fairy" => 0xD685AD,
        _ => return None,
    };
    Some(Rgb::from_hex(hex))
}
