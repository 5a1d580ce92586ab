use crate::color::Rgb;
use crate::models::{PokemonDetail, PokemonPage};
use crate::resource::Resource;

/// Results reported back to the session by spawned tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    PageLoaded {
        /// Page index the request was issued for.
        page: usize,
        result: Resource<PokemonPage>,
    },
    DetailLoaded {
        name: String,
        result: Resource<PokemonDetail>,
    },
    DominantColor {
        number: u32,
        color: Rgb,
    },
}
