//! Champion catalog
//!
//! The page embeds its champions as a JSON object mapping name to portrait URL.
//! Entries are identified by their position in that object, so document order
//! matters (`serde_json` is built with `preserve_order`).

use serde_json::{Map, Value};

use crate::error::CatalogError;

/// One champion card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub url: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Entry whose portrait URL is derived from the champion name
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let url = portrait_url(&name);
        Self { name, url }
    }
}

/// Square portrait thumbnail on the League of Legends wiki
pub fn portrait_url(champion: &str) -> String {
    format!(
        "https://wiki.leagueoflegends.com/en-us/images/thumb/{champion}_OriginalSquare.png/46px-{champion}_OriginalSquare.png"
    )
}

/// Parse embedded champion data.
///
/// Accepts either `{"Ahri": "https://...", ...}` or a plain array of names,
/// in which case portrait URLs are derived. Non-string URLs in the object form
/// are kept as their JSON text. Blank input is an empty catalog.
pub fn parse_entries(raw: &str) -> Result<Vec<Entry>, CatalogError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(raw)?;
    let entries: Vec<Entry> = match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, url)| match url {
                Value::String(url) => Entry::new(name, url),
                other => Entry::new(name, other.to_string()),
            })
            .collect(),
        Value::Array(names) => names
            .into_iter()
            .filter_map(|v| match v {
                Value::String(name) => Some(Entry::from_name(name)),
                other => {
                    log::warn!("Skipping non-string champion name: {}", other);
                    None
                }
            })
            .collect(),
        other => {
            log::warn!("Champion data is neither object nor array: {}", other);
            Vec::new()
        }
    };

    Ok(entries)
}

/// Build the `name -> portrait URL` object used as embedded page data
pub fn portrait_map<S: AsRef<str>>(names: &[S]) -> Map<String, Value> {
    names
        .iter()
        .map(|n| {
            let n = n.as_ref();
            (n.to_string(), Value::String(portrait_url(n)))
        })
        .collect()
}

/// Read entries from the page's embedded `<script type="application/json">`
#[cfg(target_arch = "wasm32")]
pub fn load_embedded(
    document: &web_sys::Document,
    data_id: &str,
) -> Result<Vec<Entry>, CatalogError> {
    let raw = document
        .get_element_by_id(data_id)
        .ok_or_else(|| CatalogError::Missing(data_id.to_string()))?
        .text_content()
        .unwrap_or_default();
    let entries = parse_entries(&raw)?;
    log::info!("Loaded {} champions", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_keeps_document_order() {
        let entries = parse_entries(r#"{"Zed":"z.png","Ahri":"a.png","Lux":"l.png"}"#).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Zed", "Ahri", "Lux"]);
        assert_eq!(entries[1].url, "a.png");
    }

    #[test]
    fn test_name_array_derives_urls() {
        let entries = parse_entries(r#"["Ahri", 3, "Jinx"]"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Jinx");
        assert_eq!(
            entries[1].url,
            "https://wiki.leagueoflegends.com/en-us/images/thumb/Jinx_OriginalSquare.png/46px-Jinx_OriginalSquare.png"
        );
    }

    #[test]
    fn test_blank_and_scalar_inputs() {
        assert!(parse_entries("").unwrap().is_empty());
        assert!(parse_entries("  {} ").unwrap().is_empty());
        assert!(parse_entries("17").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(parse_entries("{oops"), Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_portrait_map_round_trips_through_parse() {
        let map = portrait_map(&["Garen", "Teemo"]);
        let json = serde_json::to_string(&map).unwrap();
        let entries = parse_entries(&json).unwrap();
        assert_eq!(entries, vec![Entry::from_name("Garen"), Entry::from_name("Teemo")]);
    }
}
