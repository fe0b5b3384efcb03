//! Wiki (Confluence) REST payload handling.
//!
//! The HTTP transport lives outside this workspace; these helpers build the
//! request URL and turn a saved or fetched `content` listing into pages.

use serde::Deserialize;

use crate::error::Result;
use crate::types::RawPage;

#[derive(Debug, Default, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    results: Vec<ContentPage>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentPage {
    #[serde(default, deserialize_with = "id_string")]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: ContentBody,
}

#[derive(Debug, Default, Deserialize)]
struct ContentBody {
    #[serde(default)]
    storage: Storage,
}

#[derive(Debug, Default, Deserialize)]
struct Storage {
    #[serde(default)]
    value: String,
}

// Page ids are strings in Confluence payloads, but tolerate bare numbers.
fn id_string<'de, D: serde::Deserializer<'de>>(de: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(de)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn content_url(base_url: &str, space_key: &str, limit: usize) -> String {
    format!("{}/rest/api/content?spaceKey={}&limit={}&expand=body.storage", base_url.trim_end_matches('/'), space_key, limit)
}

pub fn page_url(base_url: &str, space_key: &str, page_id: &str) -> String {
    format!("{}/wiki/spaces/{}/pages/{}", base_url.trim_end_matches('/'), space_key, page_id)
}

/// Parse a `GET /rest/api/content?expand=body.storage` response body.
///
/// Missing fields default to empty; a page without an id gets no url.
pub fn parse_content_response(json: &str, base_url: &str, space_key: &str) -> Result<Vec<RawPage>> {
    let resp: ContentResponse = serde_json::from_str(json)?;
    Ok(resp
        .results
        .into_iter()
        .map(|p| {
            let url = p.id.as_deref().map(|id| page_url(base_url, space_key, id));
            RawPage { id: p.id, title: p.title, body: p.body.storage.value, url }
        })
        .collect())
}
