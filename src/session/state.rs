use std::collections::HashMap;

use crate::color::{DEFAULT_SURFACE, Rgb};
use crate::models::PokedexEntry;

/// Everything the list screen renders.
///
/// Only the session task mutates it; the UI sees clones published after every
/// applied change.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Visible entries: the accumulated pages, or the filtered view while searching.
    pub items: Vec<PokedexEntry>,
    /// Full list saved when a search began.
    pub cached_items: Vec<PokedexEntry>,
    /// Index of the next page to request.
    pub page: usize,
    pub end_reached: bool,
    pub is_loading: bool,
    pub is_searching: bool,
    /// Empty when the last page load succeeded.
    pub load_error: String,
    /// Dominant image colors by entry number.
    pub colors: HashMap<u32, Rgb>,
    pub(crate) page_size: usize,
    /// Set until the first keystroke of a search has taken its snapshot.
    pub(crate) search_starting: bool,
    pub(crate) last_query: String,
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            cached_items: Vec::new(),
            page: 0,
            end_reached: false,
            is_loading: false,
            is_searching: false,
            load_error: String::new(),
            colors: HashMap::new(),
            page_size: page_size.max(1),
            search_starting: true,
            last_query: String::new(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Query behind the current filtered view; empty when not searching.
    pub fn current_query(&self) -> &str {
        &self.last_query
    }

    pub fn has_error(&self) -> bool {
        !self.load_error.is_empty()
    }

    /// Background accent for an entry; the surface color until sampled.
    pub fn color_for(&self, number: u32) -> Rgb {
        self.colors.get(&number).copied().unwrap_or(DEFAULT_SURFACE)
    }

    /// Looks an entry up in the full list, whether or not a search hides it.
    pub fn find_entry(&self, number: u32) -> Option<&PokedexEntry> {
        let full = if self.is_searching {
            &self.cached_items
        } else {
            &self.items
        };
        full.iter().find(|entry| entry.number == number)
    }

    pub(crate) fn set_color(&mut self, number: u32, color: Rgb) {
        self.colors.insert(number, color);
    }
}
