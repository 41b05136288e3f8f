//! Simulation transitions and derived read models, as pure functions over `ResourceState`.
//!
//! Every mutating function either applies its whole effect or leaves the state
//! untouched and returns `false`.

use super::catalog::{Catalog, EffectKind, Module, Upgrade};
use super::state::ResourceState;

/// Progress this close to 100% counts as complete.
pub const PROGRESS_EPSILON: f64 = 1e-9;

/// Whether an upgrade can be bought again after its first purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PurchasePolicy {
    /// Every upgrade can be bought repeatedly; each purchase is counted and
    /// multipliers compound on every purchase.
    #[default]
    Repeatable,
    /// Each upgrade can be bought once.
    SinglePurchase,
}

/// Manual click: add `click_power × click_multiplier`.
pub fn click(state: &mut ResourceState) {
    let power = state.effective_click_power();
    state.capital += power;
    state.capital_earned += power;
    state.total_clicks += 1;
}

/// Apply `fires` passive-income intervals. No-op while the passive rate is zero.
pub fn passive_tick(state: &mut ResourceState, fires: u32) {
    if fires == 0 || state.passive_rate <= 0.0 {
        return;
    }
    let income = state.effective_passive_rate() * fires as f64;
    state.capital += income;
    state.capital_earned += income;
}

/// Whether the upgrade is allowed under `policy`, ignoring price.
pub fn is_purchasable(state: &ResourceState, upgrade: &Upgrade, policy: PurchasePolicy) -> bool {
    match policy {
        PurchasePolicy::Repeatable => true,
        PurchasePolicy::SinglePurchase => !state.unlocked_upgrades.contains(&upgrade.id),
    }
}

pub fn can_afford(state: &ResourceState, upgrade: &Upgrade) -> bool {
    state.capital >= upgrade.cost
}

/// Try to buy an upgrade by id. Returns true if successful.
pub fn purchase_upgrade(
    state: &mut ResourceState,
    catalog: &Catalog,
    upgrade_id: &str,
    policy: PurchasePolicy,
) -> bool {
    let upgrade = match catalog.upgrade(upgrade_id) {
        Some(u) => u,
        None => return false,
    };
    if !is_purchasable(state, upgrade, policy) || !can_afford(state, upgrade) {
        return false;
    }

    state.capital -= upgrade.cost;
    let magnitude = upgrade.effect.magnitude;
    match upgrade.effect.kind {
        EffectKind::ClickPower => state.click_power += magnitude,
        EffectKind::PassiveIncome => state.passive_rate += magnitude,
        EffectKind::ClickMultiplier => state.click_multiplier *= magnitude,
        EffectKind::PassiveMultiplier => state.passive_multiplier *= magnitude,
    }
    state.unlocked_upgrades.insert(upgrade.id.clone());
    let count = state.purchase_counts.entry(upgrade.id.clone()).or_insert(0);
    *count += 1;
    let count = *count;

    let text = if count > 1 {
        format!("{} {} purchased (x{})", upgrade.icon, upgrade.name, count)
    } else {
        format!("{} {} purchased", upgrade.icon, upgrade.name)
    };
    state.add_log(&text, false);
    true
}

/// Invest `amount` capital into a module. Returns true if successful.
///
/// Capital paid beyond what the module still needs is consumed, not refunded.
pub fn invest_in_module(
    state: &mut ResourceState,
    catalog: &Catalog,
    module_id: &str,
    amount: f64,
) -> bool {
    let module = match catalog.module(module_id) {
        Some(m) => m,
        None => return false,
    };
    if !(amount > 0.0) || !amount.is_finite() || state.capital < amount {
        return false;
    }
    let current = match state.module_progress.get(module_id) {
        Some(&p) => p,
        None => return false,
    };
    if current >= 100.0 {
        return false;
    }

    let mut progress = (current + amount / module.required_capital * 100.0).min(100.0);
    if progress >= 100.0 - PROGRESS_EPSILON {
        progress = 100.0;
    }

    state.capital -= amount;
    state.module_progress.insert(module.id.clone(), progress);

    if progress >= 100.0 {
        state.add_log(&format!("{} {} complete!", module.icon, module.name), true);
    }
    check_win(state);
    true
}

/// Latch `is_won` once every module is at 100%.
pub fn check_win(state: &mut ResourceState) {
    if state.is_won {
        return;
    }
    if state.module_progress.values().all(|p| *p >= 100.0) {
        state.is_won = true;
        state.add_log("🌙 MOONBASE OPERATIONAL!", true);
    }
}

pub fn acknowledge_tutorial(state: &mut ResourceState) {
    state.tutorial_acknowledged = true;
}

// ── Read models ─────────────────────────────────────────────────

/// Mean of all module percentages (0–100).
pub fn overall_progress(state: &ResourceState) -> f64 {
    if state.module_progress.is_empty() {
        return 0.0;
    }
    state.module_progress.values().sum::<f64>() / state.module_progress.len() as f64
}

/// Whole seconds since the session started.
pub fn playtime_secs(state: &ResourceState, now_ms: f64) -> u64 {
    ((now_ms - state.started_at_ms) / 1000.0).max(0.0).floor() as u64
}

pub fn is_complete(state: &ResourceState, module: &Module) -> bool {
    state.progress(&module.id).is_some_and(|p| p >= 100.0)
}

/// Capital still needed to finish the module.
pub fn module_remaining(state: &ResourceState, module: &Module) -> f64 {
    let progress = state.progress(&module.id).unwrap_or(0.0);
    (module.required_capital * (100.0 - progress) / 100.0).max(0.0)
}

/// The largest investment that is both affordable and not wasted.
pub fn max_useful_investment(state: &ResourceState, module: &Module) -> f64 {
    state.capital.min(module_remaining(state, module))
}

/// Upgrades the shop should offer.
pub fn available_upgrades<'a>(
    state: &ResourceState,
    catalog: &'a Catalog,
    policy: PurchasePolicy,
) -> Vec<&'a Upgrade> {
    catalog
        .upgrades
        .iter()
        .filter(|u| is_purchasable(state, u, policy))
        .collect()
}

/// Upgrades bought at least once, in catalog order.
pub fn purchased_upgrades<'a>(state: &ResourceState, catalog: &'a Catalog) -> Vec<&'a Upgrade> {
    catalog
        .upgrades
        .iter()
        .filter(|u| state.unlocked_upgrades.contains(&u.id))
        .collect()
}

/// Distinct upgrades unlocked.
pub fn upgrades_unlocked(state: &ResourceState) -> usize {
    state.unlocked_upgrades.len()
}

// ── Formatting ──────────────────────────────────────────────────

/// Format a number with commas (e.g. 1234567 → "1,234,567"), one decimal when fractional.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let tenths = (n * 10.0).round() as u64;
    let int_part = tenths / 10;
    let frac = tenths % 10;

    let s = int_part.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let result: String = result.chars().rev().collect();

    if frac > 0 {
        format!("{}.{}", result, frac)
    } else {
        result
    }
}

/// Header-style compact number: "999", "1.5K", "2.3M".
pub fn format_compact(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{}", n.max(0.0).floor() as u64)
    }
}

/// "m:ss" playtime.
pub fn format_playtime(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
