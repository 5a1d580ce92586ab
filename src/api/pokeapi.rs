use anyhow::{Context, Result};
use reqwest::{Client, Url, header};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::{PokedexEntry, PokemonDetail, PokemonPage, RawEntry};
use crate::resource::{GENERIC_ERROR, Resource};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("entry url carries no numeric id: {0}")]
    DataShape(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Clone)]
pub struct PokeApiClient {
    http: Client,
    api_url: String,
    sprite_url: String,
}

impl PokeApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "X-Client-Id",
            header::HeaderValue::from_str(config.client_id())
                .context("invalid client identifier header value")?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("unable to construct http client")?;

        Ok(Self {
            http,
            api_url: config.api_url().to_string(),
            sprite_url: config.sprite_url().to_string(),
        })
    }

    /// One page of the list endpoint. Every failure collapses into a generic
    /// `Resource::Error`; the cause is only logged.
    pub async fn fetch_page(&self, limit: usize, offset: usize) -> Resource<PokemonPage> {
        match self.try_fetch_page(limit, offset).await {
            Ok(page) => Resource::success(page),
            Err(err) => {
                warn!(limit, offset, error = %err, "page fetch failed");
                Resource::error(GENERIC_ERROR)
            }
        }
    }

    /// Detail record for `name`, matched lower-cased.
    pub async fn fetch_detail(&self, name: &str) -> Resource<PokemonDetail> {
        match self.try_fetch_detail(name).await {
            Ok(detail) => Resource::success(detail),
            Err(err) => {
                warn!(name, error = %err, "detail fetch failed");
                Resource::error(GENERIC_ERROR)
            }
        }
    }

    pub async fn try_fetch_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<PokemonPage, CatalogError> {
        if limit == 0 {
            return Err(CatalogError::InvalidRequest("limit must be positive".into()));
        }

        let limit = limit.to_string();
        let offset = offset.to_string();
        let url = Url::parse_with_params(
            &format!("{}/pokemon", self.api_url),
            [("limit", limit.as_str()), ("offset", offset.as_str())],
        )
        .map_err(|err| CatalogError::InvalidRequest(err.to_string()))?;

        let body: PokemonListResponse = self.get_json(url).await?;

        // a single malformed url fails the whole page
        let entries = body
            .results
            .iter()
            .map(|raw| {
                PokedexEntry::from_raw(&raw.name, &raw.url, &self.sprite_url)
                    .ok_or_else(|| CatalogError::DataShape(raw.url.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PokemonPage {
            count: body.count,
            next: body.next,
            previous: body.previous,
            results: body.results,
            entries,
        })
    }

    pub async fn try_fetch_detail(&self, name: &str) -> Result<PokemonDetail, CatalogError> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(CatalogError::InvalidRequest("empty pokemon name".into()));
        }

        let mut url = Url::parse(&format!("{}/pokemon", self.api_url))
            .map_err(|err| CatalogError::InvalidRequest(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidRequest(format!("cannot extend {}", self.api_url)))?
            .push(&name);

        let body: PokemonResponse = self.get_json(url).await?;

        let mut types = body.types;
        types.sort_by_key(|slot| slot.slot);

        Ok(PokemonDetail {
            id: body.id,
            name: body.name,
            weight: body.weight,
            height: body.height,
            types: types.into_iter().map(|slot| slot.kind.name).collect(),
            sprite_url: body.sprites.front_default.unwrap_or_default(),
        })
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, CatalogError>
    where
        T: for<'de> Deserialize<'de>,
    {
        debug!(%url, "GET");
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PokemonListResponse {
    count: usize,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
    results: Vec<RawEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    weight: u32,
    height: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
struct TypeSlot {
    #[serde(default)]
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Sprites {
    front_default: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_response_tolerates_null_links() {
        let body: PokemonListResponse = serde_json::from_str(
            r#"{"count": 2, "next": null, "previous": null,
                "results": [{"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}]}"#,
        )
        .unwrap();
        assert_eq!(body.count, 2);
        assert!(body.next.is_none());
        assert_eq!(body.results[0].name, "bulbasaur");
    }

    #[test]
    fn detail_response_reads_nested_type_names() {
        let body: PokemonResponse = serde_json::from_str(
            r#"{"id": 6, "name": "charizard", "weight": 905, "height": 17,
                "types": [{"slot": 2, "type": {"name": "flying", "url": "x"}},
                          {"slot": 1, "type": {"name": "fire", "url": "y"}}],
                "sprites": {"front_default": null, "back_default": "z"}}"#,
        )
        .unwrap();
        assert_eq!(body.types.len(), 2);
        assert_eq!(body.types[0].kind.name, "flying");
        assert!(body.sprites.front_default.is_none());
    }

    #[test]
    fn detail_response_requires_identity_fields() {
        assert!(serde_json::from_str::<PokemonResponse>(r#"{"name": "mew"}"#).is_err());
    }
}
