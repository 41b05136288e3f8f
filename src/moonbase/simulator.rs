//! Headless playthrough of the built-in catalog.
//! Run with: cargo test simulate_ -- --nocapture

use super::catalog::{Catalog, EffectKind, Upgrade};
use super::logic::{self, format_number, format_playtime};
use super::session::{Session, SessionConfig};
use super::state::ResourceState;

const CLICKS_PER_SECOND: u32 = 5;

/// Capital per second the upgrade would add right now, counting clicks at `CLICKS_PER_SECOND`.
fn income_gain(state: &ResourceState, upgrade: &Upgrade) -> f64 {
    let clicks = CLICKS_PER_SECOND as f64;
    let m = upgrade.effect.magnitude;
    match upgrade.effect.kind {
        EffectKind::ClickPower => m * state.click_multiplier * clicks,
        EffectKind::PassiveIncome => m * state.passive_multiplier,
        EffectKind::ClickMultiplier => state.effective_click_power() * (m - 1.0) * clicks,
        EffectKind::PassiveMultiplier => state.effective_passive_rate() * (m - 1.0),
    }
}

/// Upgrade with the shortest payback, if it pays back within `max_payback` seconds.
fn best_upgrade(session: &Session, max_payback: f64) -> Option<&Upgrade> {
    let state = session.state();
    let policy = session.config().purchase_policy;
    logic::available_upgrades(state, session.catalog(), policy)
        .into_iter()
        .filter_map(|u| {
            let gain = income_gain(state, u);
            (gain > 0.0).then(|| (u.cost / gain, u))
        })
        .filter(|(payback, _)| *payback <= max_payback)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, u)| u)
}

/// Seconds until the moonbase is funded at the current income.
fn eta_seconds(session: &Session) -> f64 {
    let state = session.state();
    let remaining: f64 = session
        .catalog()
        .modules
        .iter()
        .map(|m| logic::module_remaining(state, m))
        .sum();
    let income = state.effective_click_power() * CLICKS_PER_SECOND as f64
        + state.effective_passive_rate();
    remaining / income
}

fn report(session: &Session, second: u32, purchases: u32) {
    let state = session.state();
    eprintln!("┌─── {} ─────────────────────────", format_playtime(second as u64));
    eprintln!(
        "│ Capital: {}  Click: {}  Passive: {}/s  Purchases: {}",
        format_number(state.capital),
        format_number(state.effective_click_power()),
        format_number(state.effective_passive_rate()),
        purchases
    );
    let modules: Vec<String> = session
        .catalog()
        .modules
        .iter()
        .map(|m| format!("{}:{:.0}%", m.id, state.progress(&m.id).unwrap_or(0.0)))
        .collect();
    eprintln!("│ Modules: {}", modules.join("  "));
    eprintln!("└────────────────────────────────────");
}

/// Play until the moonbase is complete or `max_seconds` pass. Returns seconds taken.
fn simulate(config: SessionConfig, max_seconds: u32) -> Option<u32> {
    let mut session = Session::new(Catalog::wichita(), config, 0.0);
    session.acknowledge_tutorial();
    session.update(0.0);

    let module_ids: Vec<String> = session.catalog().modules.iter().map(|m| m.id.clone()).collect();
    let mut purchases = 0u32;

    for second in 1..=max_seconds {
        let before = session.state().clone();

        for _ in 0..CLICKS_PER_SECOND {
            session.apply_click();
        }
        session.update(second as f64 * 1000.0);

        // Upgrade while it pays back well before the moonbase would be funded;
        // save up for it if it is not affordable yet, otherwise invest.
        let mut saving = false;
        for _ in 0..20 {
            let Some(target) = best_upgrade(&session, eta_seconds(&session) / 4.0) else {
                break;
            };
            if !logic::can_afford(session.state(), target) {
                saving = true;
                break;
            }
            let id = target.id.clone();
            if !session.purchase_upgrade(&id) {
                break;
            }
            purchases += 1;
        }

        if !saving {
            if let Some(id) = module_ids
                .iter()
                .find(|id| session.state().progress(id).is_some_and(|p| p < 100.0))
            {
                session.invest_max(id);
            }
        }

        let state = session.state();
        assert!(state.capital >= 0.0, "capital negative at {}s", second);
        for (id, p) in &state.module_progress {
            assert!(*p >= before.module_progress[id], "{} regressed at {}s", id, second);
        }

        if second % 30 == 0 {
            report(&session, second, purchases);
        }
        if state.is_won {
            report(&session, second, purchases);
            return Some(second);
        }
    }
    None
}

#[test]
fn simulate_repeatable_reaches_the_moon() {
    let secs = simulate(SessionConfig::default(), 3600);
    assert!(secs.is_some(), "moonbase not finished within an hour");
}

#[test]
fn simulate_single_purchase_reaches_the_moon() {
    let config = SessionConfig {
        purchase_policy: logic::PurchasePolicy::SinglePurchase,
        ..SessionConfig::default()
    };
    let secs = simulate(config, 3 * 3600);
    assert!(secs.is_some(), "moonbase not finished within three hours");
}
