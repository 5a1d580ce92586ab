pub mod api;
pub mod app;
pub mod color;
pub mod config;
pub mod models;
pub mod resource;
pub mod session;
pub mod tasks;

pub use api::{CatalogError, PokeApiClient};
pub use color::{DEFAULT_SURFACE, Rgb, dominant_color};
pub use config::AppConfig;
pub use models::{PokedexEntry, PokemonDetail, PokemonPage};
pub use resource::Resource;
pub use session::{ListState, SessionHandle, spawn_session};
