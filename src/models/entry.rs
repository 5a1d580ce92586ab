use serde::{Deserialize, Serialize};

/// One row of the catalog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokedexEntry {
    pub name: String,
    pub image_url: String,
    pub number: u32,
}

impl PokedexEntry {
    /// Builds an entry from a raw list item. Returns `None` when the resource URL
    /// does not end in a numeric id.
    pub fn from_raw(name: &str, url: &str, sprite_base: &str) -> Option<Self> {
        let number = parse_entry_number(url)?;
        Some(Self {
            name: capitalize_first(name),
            image_url: sprite_url_for(sprite_base, number),
            number,
        })
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.number.to_string() == query
    }
}

/// Trailing run of ASCII digits after dropping one optional trailing `/`.
pub fn parse_entry_number(url: &str) -> Option<u32> {
    let trimmed = url.strip_suffix('/').unwrap_or(url);
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, ch)| ch.is_ascii_digit())
        .last()
        .map(|(idx, _)| idx)?;

    trimmed[digits_start..].parse().ok()
}

pub fn sprite_url_for(sprite_base: &str, number: u32) -> String {
    format!("{}/{number}.png", sprite_base.trim_end_matches('/'))
}

/// Upper-cases the first character only; the rest is left untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
