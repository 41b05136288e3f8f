//! The session: sole owner of the catalog, the resource state and the passive timer.

use super::catalog::Catalog;
use super::logic::{self, PurchasePolicy};
use super::state::ResourceState;
use crate::time::PassiveTimer;

/// Tunables fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Milliseconds between passive-income fires.
    pub tick_interval_ms: u32,
    pub purchase_policy: PurchasePolicy,
    /// Click power of a fresh state.
    pub starting_click_power: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            purchase_policy: PurchasePolicy::Repeatable,
            starting_click_power: 1.0,
        }
    }
}

pub struct Session {
    catalog: Catalog,
    config: SessionConfig,
    state: ResourceState,
    timer: PassiveTimer,
}

impl Session {
    pub fn new(catalog: Catalog, config: SessionConfig, now_ms: f64) -> Self {
        let state = ResourceState::new(&catalog, config.starting_click_power, now_ms);
        let timer = PassiveTimer::new(config.tick_interval_ms);
        let mut session = Self {
            catalog,
            config,
            state,
            timer,
        };
        session.sync_timer();
        session
    }

    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn timer(&self) -> &PassiveTimer {
        &self.timer
    }

    pub fn apply_click(&mut self) {
        logic::click(&mut self.state);
    }

    pub fn purchase_upgrade(&mut self, upgrade_id: &str) -> bool {
        let ok = logic::purchase_upgrade(
            &mut self.state,
            &self.catalog,
            upgrade_id,
            self.config.purchase_policy,
        );
        if ok {
            self.sync_timer();
        }
        ok
    }

    pub fn invest_in_module(&mut self, module_id: &str, amount: f64) -> bool {
        logic::invest_in_module(&mut self.state, &self.catalog, module_id, amount)
    }

    /// Invest as much as is affordable and useful. False if nothing could be invested.
    pub fn invest_max(&mut self, module_id: &str) -> bool {
        let amount = match self.catalog.module(module_id) {
            Some(m) => logic::max_useful_investment(&self.state, m),
            None => return false,
        };
        self.invest_in_module(module_id, amount)
    }

    pub fn acknowledge_tutorial(&mut self) {
        logic::acknowledge_tutorial(&mut self.state);
    }

    /// Throw the state away and start over with the same catalog and config.
    pub fn reset(&mut self, now_ms: f64) {
        self.timer.cancel();
        self.state =
            ResourceState::new(&self.catalog, self.config.starting_click_power, now_ms);
        self.sync_timer();
    }

    /// Advance the passive timer to `now_ms` and pay out any fires. Returns the fire count.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let fires = self.timer.update(now_ms);
        logic::passive_tick(&mut self.state, fires);
        fires
    }

    pub fn overall_progress(&self) -> f64 {
        logic::overall_progress(&self.state)
    }

    pub fn playtime_secs(&self, now_ms: f64) -> u64 {
        logic::playtime_secs(&self.state, now_ms)
    }

    /// The timer runs exactly while there is a passive rate to pay.
    fn sync_timer(&mut self) {
        if self.state.passive_rate > 0.0 {
            self.timer.arm();
        } else {
            self.timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Catalog::wichita(), SessionConfig::default(), 0.0)
    }

    #[test]
    fn default_config() {
        let c = SessionConfig::default();
        assert_eq!(c.tick_interval_ms, 1000);
        assert_eq!(c.purchase_policy, PurchasePolicy::Repeatable);
        assert_eq!(c.starting_click_power, 1.0);
    }

    #[test]
    fn timer_idle_without_passive_rate() {
        let mut s = session();
        assert!(!s.timer().is_armed());
        assert_eq!(s.update(0.0), 0);
        assert_eq!(s.update(10_000.0), 0);
        assert_eq!(s.state().capital, 0.0);
    }

    #[test]
    fn timer_arms_on_first_passive_upgrade() {
        let mut s = session();
        for _ in 0..50 {
            s.apply_click();
        }
        assert!(s.purchase_upgrade("old_town"));
        assert!(s.timer().is_armed());
        assert_eq!(s.state().capital, 0.0);

        s.update(1_000.0); // baseline
        assert_eq!(s.update(4_000.0), 3);
        assert!((s.state().capital - 3.0).abs() < 1e-9);
        assert!((s.state().capital_earned - 53.0).abs() < 1e-9);
    }

    #[test]
    fn passive_multiplier_scales_fires() {
        let mut s = session();
        s.state.passive_rate = 3.0;
        s.state.passive_multiplier = 2.0;
        s.sync_timer();
        s.update(0.0);
        assert_eq!(s.update(1_000.0), 1);
        assert!((s.state().capital - 6.0).abs() < 1e-9);
    }

    #[test]
    fn reset_matches_fresh_session_and_cancels_timer() {
        let mut s = session();
        s.state.capital = 100_000.0;
        assert!(s.purchase_upgrade("beechcraft"));
        assert!(s.purchase_upgrade("cessna"));
        assert!(s.invest_in_module("habitat", 1_000.0));
        s.acknowledge_tutorial();
        assert!(s.timer().is_armed());

        s.reset(42_000.0);

        let fresh = Session::new(Catalog::wichita(), SessionConfig::default(), 42_000.0);
        assert_eq!(s.state(), fresh.state());
        assert!(!s.timer().is_armed());
        assert_eq!(s.update(100_000.0), 0);
    }

    #[test]
    fn invest_max_uses_min_of_capital_and_remaining() {
        let mut s = session();
        s.state.capital = 7_000.0;
        assert!(s.invest_max("habitat"));
        assert_eq!(s.state().progress("habitat"), Some(100.0));
        assert!((s.state().capital - 2_000.0).abs() < 1e-9);

        assert!(!s.invest_max("habitat"));
        assert!(!s.invest_max("unknown-id"));
    }

    #[test]
    fn invest_max_with_no_capital_is_rejected() {
        let mut s = session();
        let before = s.state().clone();
        assert!(!s.invest_max("power"));
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn single_purchase_policy_from_config() {
        let config = SessionConfig {
            purchase_policy: PurchasePolicy::SinglePurchase,
            ..SessionConfig::default()
        };
        let mut s = Session::new(Catalog::wichita(), config, 0.0);
        s.state.capital = 100.0;
        assert!(s.purchase_upgrade("keeper_of_the_plains"));
        assert!(!s.purchase_upgrade("keeper_of_the_plains"));
        assert!((s.state().capital - 90.0).abs() < 1e-9);
    }

    #[test]
    fn starting_click_power_from_config() {
        let config = SessionConfig {
            starting_click_power: 5.0,
            ..SessionConfig::default()
        };
        let mut s = Session::new(Catalog::wichita(), config, 0.0);
        s.apply_click();
        assert!((s.state().capital - 5.0).abs() < 1e-9);
        s.reset(1.0);
        assert_eq!(s.state().click_power, 5.0);
    }

    #[test]
    fn playtime_reads_session_clock() {
        let s = Session::new(Catalog::wichita(), SessionConfig::default(), 10_000.0);
        assert_eq!(s.playtime_secs(75_000.0), 65);
    }

    #[test]
    fn full_win_through_session() {
        let mut s = session();
        s.state.capital = 120_000.0;
        let ids: Vec<String> = s.catalog().modules.iter().map(|m| m.id.clone()).collect();
        for id in &ids {
            assert!(s.invest_max(id));
        }
        assert!(s.state().is_won);
        assert!((s.overall_progress() - 100.0).abs() < 1e-9);
        assert!((s.state().capital - 0.0).abs() < 1e-9);
    }
}
