use tracing::debug;

use crate::models::PokedexEntry;

use super::state::ListState;

impl ListState {
    /// Filters the visible list by name substring or exact number.
    ///
    /// The first non-empty query snapshots the accumulated list into
    /// `cached_items`; later keystrokes filter that snapshot. An empty query
    /// restores the snapshot and leaves search mode.
    pub fn search(&mut self, query: &str) {
        if query.is_empty() {
            if self.is_searching {
                self.items = self.cached_items.clone();
            }
            self.is_searching = false;
            self.search_starting = true;
            self.last_query.clear();
            debug!(items = self.items.len(), "search cleared");
            return;
        }

        let source = if self.search_starting {
            &self.items
        } else {
            &self.cached_items
        };
        let results = filter_entries(source, query);

        if self.search_starting {
            self.cached_items = self.items.clone();
            self.search_starting = false;
        }

        debug!(query, matches = results.len(), "search applied");
        self.items = results;
        self.last_query = query.to_string();
        self.is_searching = true;
    }
}

pub fn filter_entries(entries: &[PokedexEntry], query: &str) -> Vec<PokedexEntry> {
    entries
        .iter()
        .filter(|entry| entry.matches(query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, number: u32) -> PokedexEntry {
        PokedexEntry {
            name: name.to_string(),
            image_url: format!("https://sprites/{number}.png"),
            number,
        }
    }

    fn loaded_state() -> ListState {
        let mut state = ListState::new(20);
        state.items = vec![
            entry("Bulbasaur", 1),
            entry("Charmander", 4),
            entry("Charmeleon", 5),
            entry("Pikachu", 25),
            entry("Raichu", 26),
        ];
        state
    }

    #[test]
    fn narrows_by_case_insensitive_name() {
        let mut state = loaded_state();
        state.search("CHAR");
        assert!(state.is_searching);
        let names: Vec<_> = state.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Charmander", "Charmeleon"]);
    }

    #[test]
    fn later_keystrokes_filter_the_snapshot_not_the_view() {
        let mut state = loaded_state();
        state.search("char");
        state.search("chu");
        let names: Vec<_> = state.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Pikachu", "Raichu"]);
        assert_eq!(state.cached_items.len(), 5);
    }

    #[test]
    fn exact_number_match_uses_trimmed_query() {
        let mut state = loaded_state();
        state.search(" 25 ");
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "Pikachu");

        state.search("2");
        assert!(state.items.is_empty());
        assert!(state.is_searching);
    }

    #[test]
    fn empty_query_restores_pre_search_list() {
        let mut state = loaded_state();
        let before = state.items.clone();
        state.search("pika");
        state.search("zzz");
        state.search("");
        assert_eq!(state.items, before);
        assert!(!state.is_searching);

        // the next search takes a fresh snapshot
        state.items.push(entry("Mew", 151));
        state.search("mew");
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.cached_items.len(), 6);
    }

    #[test]
    fn empty_query_without_search_keeps_items() {
        let mut state = loaded_state();
        state.search("");
        assert_eq!(state.items.len(), 5);
        assert!(!state.is_searching);
    }
}
