use std::time::Duration;

use anyhow::{Context, Result, bail};
use uuid::Uuid;

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
pub const DEFAULT_PAGE_SIZE: usize = 20;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Endpoints, paging and HTTP settings shared by the client and the session.
#[derive(Clone, Debug)]
pub struct AppConfig {
    api_url: String,
    sprite_url: String,
    page_size: usize,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    client_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client_id = format!("pokedex-client-{}", Uuid::new_v4());
        let user_agent = format!(
            "pokedex-catalog/{} ( https://pokeapi.co ; unique-id={client_id} )",
            env!("CARGO_PKG_VERSION")
        );

        Self {
            api_url: DEFAULT_API_URL.to_string(),
            sprite_url: DEFAULT_SPRITE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            user_agent,
            client_id,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `POKEDEX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup("POKEDEX_API_URL")) {
            config = config.with_api_url(url);
        }
        if let Some(url) = non_empty(lookup("POKEDEX_SPRITE_URL")) {
            config = config.with_sprite_url(url);
        }
        if let Some(raw) = non_empty(lookup("POKEDEX_PAGE_SIZE")) {
            let size = raw
                .parse::<usize>()
                .with_context(|| format!("POKEDEX_PAGE_SIZE is not a number: {raw}"))?;
            if size == 0 {
                bail!("POKEDEX_PAGE_SIZE must be positive");
            }
            config = config.with_page_size(size);
        }
        if let Some(raw) = non_empty(lookup("POKEDEX_TIMEOUT_SECS")) {
            let secs = raw
                .parse::<u64>()
                .with_context(|| format!("POKEDEX_TIMEOUT_SECS is not a number: {raw}"))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_sprite_url(mut self, url: impl Into<String>) -> Self {
        self.sprite_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Zero is clamped to one; the paginator needs a positive limit.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn sprite_url(&self) -> &str {
        &self.sprite_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
