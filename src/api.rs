//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::SearchError;
use crate::state::Record;

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    types: Vec<PokemonTypeSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

/// URL of the catalog entry for a raw user input.
///
/// The input is trimmed, lowercased and path-escaped.
pub fn pokemon_url(api_base: &str, raw_input: &str) -> String {
    let identifier = raw_input.trim().to_lowercase();
    format!(
        "{}/pokemon/{}",
        api_base.trim_end_matches('/'),
        urlencoding::encode(&identifier)
    )
}

pub async fn fetch_pokemon(url: &str) -> Result<Record, SearchError> {
    log::debug!("GET {url}");
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(SearchError::transport)?;
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(SearchError::transport)?;
    log::debug!("{url} -> {status} ({} bytes)", body.len());
    record_from_response(url, status, &body)
}

/// Map a raw HTTP response to a record or a tagged failure
pub fn record_from_response(url: &str, status: u16, body: &[u8]) -> Result<Record, SearchError> {
    match status {
        200..=299 => {}
        404 => return Err(SearchError::NotFound(identifier_of(url))),
        _ => return Err(SearchError::Transport(format!("server returned {status}"))),
    }

    let response: PokemonResponse = serde_json::from_slice(body).map_err(SearchError::parse)?;
    if response.id == 0 || response.name.is_empty() {
        return Err(SearchError::Parse("entry has no id or name".to_string()));
    }

    Ok(Record {
        id: response.id,
        name: response.name,
        sprite_url: pointer_string(&response.sprites, "/front_default"),
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        height: response.height,
        weight: response.weight,
    })
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    let bytes = response.bytes().await.map_err(|err| err.to_string())?;
    Ok(bytes.to_vec())
}

/// Last path segment, unescaped back to what the user searched for
fn identifier_of(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
