//! Advent grid state machine
//!
//! Owns the champion list, the persisted state and the random source, and turns
//! user actions (open, retire, shuffle, reset, import) into card layouts. The
//! DOM layer only draws [`CardView`]s and forwards clicks here.

use std::collections::BTreeSet;

use crate::catalog::Entry;
use crate::config::GridConfig;
use crate::error::ImportError;
use crate::order::{build_order, filter_order};
use crate::persistence::{KeyValueStore, Persistence};
use crate::shuffle::RandomSource;

/// Everything needed to draw one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Entry index in the catalog
    pub index: usize,
    /// 1-based position on screen
    pub display_no: usize,
    pub name: String,
    pub url: String,
    pub is_open: bool,
    pub is_retired: bool,
    /// Door color theme, 1-based
    pub theme: usize,
    pub skew_1: bool,
    pub skew_2: bool,
}

impl CardView {
    fn new(
        entry: &Entry,
        index: usize,
        display_no: usize,
        is_open: bool,
        is_retired: bool,
        config: &GridConfig,
    ) -> Self {
        let (skew_a, skew_b) = config.skew_moduli;
        let salt = index + display_no;
        Self {
            index,
            display_no,
            name: entry.name.clone(),
            url: entry.url.clone(),
            is_open,
            is_retired,
            theme: index % config.theme_count.max(1) + 1,
            skew_1: skew_a != 0 && salt % skew_a == 0,
            skew_2: skew_b != 0 && salt % skew_b == 0,
        }
    }

    /// Classes on the outer `<article>`
    pub fn card_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["card"];
        if self.skew_1 {
            classes.push("skew-1");
        }
        if self.skew_2 {
            classes.push("skew-2");
        }
        if self.is_open {
            classes.push("open");
        }
        classes
    }

    pub fn theme_class(&self) -> String {
        format!("theme-{}", self.theme)
    }

    pub fn door_label(&self) -> String {
        format!("Open door {}", self.display_no)
    }

    pub fn retire_label(&self) -> &'static str {
        if self.is_retired { "Unretire" } else { "Retire" }
    }
}

/// The grid and its persisted state
pub struct AdventGrid<S> {
    entries: Vec<Entry>,
    state: Persistence<S>,
    rng: RandomSource,
    config: GridConfig,
}

impl<S: KeyValueStore> AdventGrid<S> {
    pub fn new(entries: Vec<Entry>, store: S, config: GridConfig, rng: RandomSource) -> Self {
        let state = Persistence::new(store, config.keys.clone());
        Self {
            entries,
            state,
            rng,
            config,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn state(&self) -> &Persistence<S> {
        &self.state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Layout on page load: the stored order if it is still valid, else a fresh one
    pub fn load(&mut self) -> Vec<CardView> {
        let order = match self.stored_order() {
            Some(order) => order,
            None => {
                log::info!("No stored order, shuffling {} champions", self.entries.len());
                self.fresh_order()
            }
        };
        self.layout(&order)
    }

    /// Cards for `order`, skipping retired and unknown indices.
    ///
    /// If anything was skipped the corrected order is persisted.
    pub fn layout(&self, order: &[usize]) -> Vec<CardView> {
        let opened = self.state.opened();
        let retired = self.state.retired();

        let filtered = filter_order(order, self.entries.len(), &retired);
        if let Some(filtered) = &filtered {
            log::info!("Dropped {} stale indices from order", order.len() - filtered.len());
            self.state.set_order(filtered);
        }
        let order = filtered.as_deref().unwrap_or(order);

        order
            .iter()
            .enumerate()
            .map(|(pos, &index)| {
                CardView::new(
                    &self.entries[index],
                    index,
                    pos + 1,
                    opened.contains(&index),
                    retired.contains(&index),
                    &self.config,
                )
            })
            .collect()
    }

    /// Record a door as opened or closed
    pub fn set_open(&self, index: usize, open: bool) {
        let mut opened = self.state.opened();
        let changed = if open {
            opened.insert(index)
        } else {
            opened.remove(&index)
        };
        if changed {
            self.state.set_opened(&opened);
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.state.opened().contains(&index)
    }

    pub fn retired(&self) -> BTreeSet<usize> {
        self.state.retired()
    }

    /// Retire or unretire a champion, then reshuffle the active cards
    pub fn toggle_retired(&mut self, index: usize) -> Vec<CardView> {
        if index >= self.entries.len() {
            log::warn!("Ignoring retire for unknown champion {}", index);
        } else {
            let mut retired = self.state.retired();
            if !retired.remove(&index) {
                retired.insert(index);
                log::info!("Retired {}", self.entries[index].name);
            } else {
                log::info!("Unretired {}", self.entries[index].name);
            }
            self.state.set_retired(&retired);
        }

        let order = self.fresh_order();
        self.layout(&order)
    }

    /// New random order, retired champions stay retired
    pub fn shuffle(&mut self) -> Vec<CardView> {
        let order = self.fresh_order();
        self.layout(&order)
    }

    /// Forget opened/retired/order and start over
    pub fn reset(&mut self) -> Vec<CardView> {
        self.state.clear();
        let order = self.fresh_order();
        self.layout(&order)
    }

    /// Pretty-printed export file contents
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.state.export_state())
    }

    /// Import a state file and lay the grid out again.
    ///
    /// Invalid JSON returns an error and leaves stored state as it was.
    pub fn import_json(&mut self, json: &str) -> Result<Vec<CardView>, ImportError> {
        self.state.import_json(json)?;
        let order = match self.stored_order() {
            Some(order) => order,
            None => self.fresh_order(),
        };
        Ok(self.layout(&order))
    }

    /// Stored order, unless it is missing, too long, or empty while some
    /// champions are still active
    fn stored_order(&self) -> Option<Vec<usize>> {
        let order = self.state.order(self.entries.len())?;
        if order.is_empty() {
            let retired = self.state.retired();
            if (0..self.entries.len()).any(|i| !retired.contains(&i)) {
                log::info!("Stored order is empty but champions are active, reshuffling");
                return None;
            }
        }
        Some(order)
    }

    fn fresh_order(&mut self) -> Vec<usize> {
        let retired = self.state.retired();
        let order = build_order(self.entries.len(), &retired, &mut self.rng);
        self.state.set_order(&order);
        order
    }
}
