//! Semantic action IDs for moonbase click targets, and the keys bound to list rows.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

use super::catalog::{MAX_MODULES, MAX_UPGRADES};

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_CENTER: u16 = 0;

// ── Panel tabs ──────────────────────────────────────────────────
pub const TAB_UPGRADES: u16 = 10;
pub const TAB_OWNED: u16 = 11;
pub const TAB_MOONBASE: u16 = 12;

// ── Upgrade purchase (base + shop row) ──────────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Module investment (base + module index) ─────────────────────
pub const INVEST_MODULE_BASE: u16 = 200;

// ── Investment stake (base + stake index) ───────────────────────
pub const INVEST_STAKE_BASE: u16 = 250;

// ── Tutorial overlay ────────────────────────────────────────────
pub const TUTORIAL_NEXT: u16 = 300;
pub const TUTORIAL_SKIP: u16 = 301;

// ── Win screen ──────────────────────────────────────────────────
pub const PLAY_AGAIN: u16 = 400;

/// Shop keys by row. `c` and `u` stay bound to click and panel switch.
pub const UPGRADE_KEYS: [char; MAX_UPGRADES] = [
    'a', 'b', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'v', 'w', 'x', 'y', 'z',
];

pub const MODULE_KEYS: [char; MAX_MODULES] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub fn upgrade_index(key: char) -> Option<usize> {
    UPGRADE_KEYS.iter().position(|&k| k == key)
}

pub fn module_index(key: char) -> Option<usize> {
    MODULE_KEYS.iter().position(|&k| k == key)
}

/// Shop row for a purchase action ID.
pub fn buy_row(action_id: u16) -> Option<usize> {
    let row = action_id.checked_sub(BUY_UPGRADE_BASE)? as usize;
    (row < MAX_UPGRADES).then_some(row)
}

/// Module index for an investment action ID.
pub fn invest_row(action_id: u16) -> Option<usize> {
    let row = action_id.checked_sub(INVEST_MODULE_BASE)? as usize;
    (row < MAX_MODULES).then_some(row)
}
