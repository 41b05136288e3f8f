//! Wichita to the Moon game state definitions.

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::Catalog;

/// Maximum number of activity log entries kept.
pub const LOG_CAPACITY: usize = 50;

/// Log entry shown in the activity panel.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Everything that changes during play. Only the session mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState {
    /// Innovation Capital on hand.
    pub capital: f64,
    /// Lifetime capital generated (clicks + passive), never reduced by spending.
    pub capital_earned: f64,
    /// Capital per click before the multiplier.
    pub click_power: f64,
    /// Product of every click multiplier bought (starts at 1).
    pub click_multiplier: f64,
    /// Capital per passive tick before the multiplier.
    pub passive_rate: f64,
    /// Product of every passive multiplier bought (starts at 1).
    pub passive_multiplier: f64,
    /// Ids of upgrades bought at least once.
    pub unlocked_upgrades: BTreeSet<String>,
    /// How many times each upgrade was bought.
    pub purchase_counts: BTreeMap<String, u32>,
    /// Completion percentage per module id, always in [0, 100].
    pub module_progress: BTreeMap<String, f64>,
    pub total_clicks: u64,
    /// Wall-clock milliseconds when the session started.
    pub started_at_ms: f64,
    pub is_won: bool,
    pub tutorial_acknowledged: bool,
    pub log: Vec<LogEntry>,
}

impl ResourceState {
    /// Fresh state: no capital, one IC per click, every module at 0%.
    pub fn new(catalog: &Catalog, starting_click_power: f64, now_ms: f64) -> Self {
        let module_progress = catalog
            .modules
            .iter()
            .map(|m| (m.id.clone(), 0.0))
            .collect();

        Self {
            capital: 0.0,
            capital_earned: 0.0,
            click_power: starting_click_power,
            click_multiplier: 1.0,
            passive_rate: 0.0,
            passive_multiplier: 1.0,
            unlocked_upgrades: BTreeSet::new(),
            purchase_counts: BTreeMap::new(),
            module_progress,
            total_clicks: 0,
            started_at_ms: now_ms,
            is_won: false,
            tutorial_acknowledged: false,
            log: vec![LogEntry {
                text: "Welcome to Wichita to the Moon!".into(),
                is_important: true,
            }],
        }
    }

    /// Capital granted by one click.
    pub fn effective_click_power(&self) -> f64 {
        self.click_power * self.click_multiplier
    }

    /// Capital granted by one passive tick.
    pub fn effective_passive_rate(&self) -> f64 {
        self.passive_rate * self.passive_multiplier
    }

    pub fn progress(&self, module_id: &str) -> Option<f64> {
        self.module_progress.get(module_id).copied()
    }

    pub fn purchase_count(&self, upgrade_id: &str) -> u32 {
        self.purchase_counts.get(upgrade_id).copied().unwrap_or(0)
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }
}
