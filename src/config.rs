//! Page wiring and storage configuration
//!
//! Defaults match the shipped page. A page may override any field with an
//! embedded `<script id="grid-config" type="application/json">`.

use serde::{Deserialize, Serialize};

/// Element id of the optional config override
pub const CONFIG_ELEMENT_ID: &str = "grid-config";

/// LocalStorage keys for the three persisted collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub opened: String,
    pub order: String,
    pub retired: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            opened: "lol-advent-open-doors".to_string(),
            order: "lol-advent-order".to_string(),
            retired: "lol-advent-retired".to_string(),
        }
    }
}

/// Grid configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    // === Elements ===
    pub grid_id: String,
    /// Embedded champion data
    pub data_id: String,
    pub shuffle_id: String,
    pub reset_id: String,
    pub export_id: String,
    /// File input used for import
    pub import_id: String,

    // === Persistence ===
    pub keys: StorageKeys,
    pub export_file_name: String,

    // === Cosmetics ===
    /// Number of door color themes (`theme-1` ..= `theme-N`)
    pub theme_count: usize,
    /// Moduli for the `skew-1` / `skew-2` tilt classes
    pub skew_moduli: (usize, usize),
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_id: "grid".to_string(),
            data_id: "champion-data".to_string(),
            shuffle_id: "shuffle".to_string(),
            reset_id: "reset".to_string(),
            export_id: "export".to_string(),
            import_id: "import-file".to_string(),

            keys: StorageKeys::default(),
            export_file_name: "lol-nuzlocke-state.json".to_string(),

            theme_count: 4,
            skew_moduli: (5, 7),
        }
    }
}

impl GridConfig {
    /// Parse an override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load config from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        if let Some(raw) = raw {
            match Self::from_json(&raw) {
                Ok(config) => {
                    log::info!("Loaded grid config from #{}", CONFIG_ELEMENT_ID);
                    return config;
                }
                Err(e) => log::warn!("Ignoring invalid grid config: {}", e),
            }
        }

        log::info!("Using default grid config");
        Self::default()
    }
}
