use tracing::{debug, info};

use crate::models::{PokedexEntry, PokemonPage};
use crate::resource::Resource;

use super::state::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
    pub offset: usize,
}

impl ListState {
    /// Claims the single in-flight slot and returns the request to issue, or
    /// `None` when loading, finished, or searching.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading || self.end_reached || self.is_searching {
            debug!(
                is_loading = self.is_loading,
                end_reached = self.end_reached,
                is_searching = self.is_searching,
                "load_next ignored"
            );
            return None;
        }

        self.is_loading = true;
        Some(PageRequest {
            page: self.page,
            limit: self.page_size,
            offset: self.page * self.page_size,
        })
    }

    pub fn apply_page(&mut self, result: Resource<PokemonPage>) {
        match result {
            Resource::Success { data } => {
                self.end_reached = self.page * self.page_size >= data.count;
                let fetched = data.entries.len();
                self.append_entries(data.entries);
                self.page += 1;
                self.load_error.clear();
                self.is_loading = false;
                info!(
                    page = self.page,
                    fetched,
                    total = data.count,
                    end_reached = self.end_reached,
                    "page loaded"
                );
            }
            Resource::Error { message, .. } => {
                self.load_error = message;
                self.is_loading = false;
            }
            // the client never reports Loading; release the slot regardless
            Resource::Loading => {
                self.is_loading = false;
            }
        }
    }

    fn append_entries(&mut self, entries: Vec<PokedexEntry>) {
        if !self.is_searching {
            self.items.extend(entries);
            return;
        }

        // a page that lands mid-search grows the full list and shows only what matches
        let visible = entries
            .iter()
            .filter(|entry| entry.matches(&self.last_query))
            .cloned()
            .collect::<Vec<_>>();
        self.cached_items.extend(entries);
        self.items.extend(visible);
    }
}
