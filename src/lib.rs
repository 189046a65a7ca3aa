//! LoL Advent Grid - a champion advent calendar for Nuzlocke runs
//!
//! Core modules:
//! - `catalog`: Embedded champion data (name + portrait URL)
//! - `shuffle`: Fisher-Yates with a secure source and PCG fallback
//! - `order`: Display order of active champions
//! - `persistence`: Opened/order/retired state in LocalStorage
//! - `grid`: Grid state machine (open, retire, shuffle, reset, import/export)
//! - `platform`: Browser DOM rendering
//! - `config`: Element ids, storage keys, cosmetics

pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod order;
pub mod persistence;
pub mod platform;
pub mod shuffle;

pub use catalog::Entry;
pub use config::{GridConfig, StorageKeys};
pub use error::{CatalogError, ImportError, StoreError};
pub use grid::{AdventGrid, CardView};
pub use order::build_order;
pub use persistence::{KeyValueStore, MemoryStore, Persistence, StateImport, StateSnapshot};
pub use shuffle::{RandomSource, shuffle_in_place};
