#![allow(dead_code)]

use std::io::Cursor;
use std::ops::RangeInclusive;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use pokedex_catalog::config::AppConfig;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PAGE_SIZE: usize = 20;

const FIRST_NAMES: [&str; 20] = [
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "caterpie",
    "metapod",
    "butterfree",
    "weedle",
    "kakuna",
    "beedrill",
    "pidgey",
    "pidgeotto",
    "pidgeot",
    "rattata",
    "raticate",
];

pub fn name_for(number: u32) -> String {
    FIRST_NAMES
        .get(number as usize - 1)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("pokemon{number}"))
}

pub fn list_body(base: &str, count: usize, numbers: RangeInclusive<u32>) -> Value {
    let results: Vec<Value> = numbers
        .map(|n| {
            json!({
                "name": name_for(n),
                "url": format!("{base}/pokemon/{n}/"),
            })
        })
        .collect();
    json!({
        "count": count,
        "next": null,
        "previous": null,
        "results": results,
    })
}

pub fn test_config(server: &MockServer) -> AppConfig {
    AppConfig::default()
        .with_api_url(server.uri())
        .with_sprite_url(format!("{}/sprites", server.uri()))
        .with_page_size(PAGE_SIZE)
}

pub fn page_mock(offset: usize, body: Value) -> Mock {
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", PAGE_SIZE.to_string()))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
}

/// Mounts every page of a catalog holding `count` entries, plus the empty page
/// just past the end.
pub async fn mount_catalog(server: &MockServer, count: usize) {
    mount_pages(server, count, None).await;
}

/// Like [`mount_catalog`], but each page must be requested exactly once.
pub async fn mount_catalog_once(server: &MockServer, count: usize) {
    mount_pages(server, count, Some(1)).await;
}

async fn mount_pages(server: &MockServer, count: usize, calls: Option<u64>) {
    let mut offset = 0;
    loop {
        let first = offset as u32 + 1;
        let last = (offset + PAGE_SIZE).min(count) as u32;
        let mock = page_mock(offset, list_body(&server.uri(), count, first..=last));
        match calls {
            Some(calls) => mock.expect(calls).mount(server).await,
            None => mock.mount(server).await,
        }
        if offset >= count {
            break;
        }
        offset += PAGE_SIZE;
    }
}

pub async fn mount_first_page_delayed(server: &MockServer, count: usize, delay: Duration) {
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_body(&server.uri(), count, 1..=PAGE_SIZE as u32))
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub fn png_bytes(color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(16, 16, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
