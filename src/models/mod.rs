pub mod detail;
pub mod entry;
pub mod page;

pub use detail::PokemonDetail;
pub use entry::PokedexEntry;
pub use page::{PokemonPage, RawEntry};
