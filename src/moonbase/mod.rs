//! Wichita to the Moon: click for Innovation Capital, buy Wichita upgrades,
//! and fund five moonbase modules.

pub mod actions;
pub mod catalog;
pub mod facts;
pub mod logic;
pub mod render;
pub mod session;
pub mod state;
pub mod tutorial;

#[cfg(test)]
mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{Catalog, Module};
use facts::FactPicker;
use session::{Session, SessionConfig};
use state::ResourceState;

/// Which list the side panel shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Upgrades,
    Owned,
    Moonbase,
}

impl Panel {
    fn next(self) -> Self {
        match self {
            Panel::Upgrades => Panel::Owned,
            Panel::Owned => Panel::Moonbase,
            Panel::Moonbase => Panel::Upgrades,
        }
    }
}

/// How much capital one investment action commits to a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvestStake {
    Tenth,
    Quarter,
    Half,
    Max,
}

impl InvestStake {
    pub const ALL: [InvestStake; 4] = [
        InvestStake::Tenth,
        InvestStake::Quarter,
        InvestStake::Half,
        InvestStake::Max,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InvestStake::Tenth => "10%",
            InvestStake::Quarter => "25%",
            InvestStake::Half => "50%",
            InvestStake::Max => "Max",
        }
    }

    /// Share of capital on hand; `None` for the max useful amount.
    fn fraction(self) -> Option<f64> {
        match self {
            InvestStake::Tenth => Some(0.1),
            InvestStake::Quarter => Some(0.25),
            InvestStake::Half => Some(0.5),
            InvestStake::Max => None,
        }
    }

    /// Capital this stake would put into `module` right now, never more than it still needs.
    pub fn amount(self, state: &ResourceState, module: &Module) -> f64 {
        let useful = logic::max_useful_investment(state, module);
        match self.fraction() {
            Some(f) => (state.capital * f).min(useful),
            None => useful,
        }
    }

    fn smaller(self) -> Self {
        match self {
            InvestStake::Tenth | InvestStake::Quarter => InvestStake::Tenth,
            InvestStake::Half => InvestStake::Quarter,
            InvestStake::Max => InvestStake::Half,
        }
    }

    fn larger(self) -> Self {
        match self {
            InvestStake::Tenth => InvestStake::Quarter,
            InvestStake::Quarter => InvestStake::Half,
            InvestStake::Half | InvestStake::Max => InvestStake::Max,
        }
    }
}

/// A session plus the UI-only state around it.
pub struct MoonbaseGame {
    pub session: Session,
    pub panel: Panel,
    pub stake: InvestStake,
    pub tutorial_step: usize,
    /// Catalog index of the last upgrade the player tried to buy.
    pub selected_upgrade: Option<usize>,
    /// Fact shown on the win screen, picked when the win is first seen.
    pub win_fact: Option<&'static str>,
    facts: FactPicker,
    last_now_ms: f64,
}

impl MoonbaseGame {
    pub fn new(catalog: Catalog, config: SessionConfig, now_ms: f64, seed: u32) -> Self {
        Self {
            session: Session::new(catalog, config, now_ms),
            panel: Panel::Upgrades,
            stake: InvestStake::Max,
            tutorial_step: 0,
            selected_upgrade: None,
            win_fact: None,
            facts: FactPicker::new(seed),
            last_now_ms: now_ms,
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.last_now_ms
    }

    pub fn in_tutorial(&self) -> bool {
        !self.session.state().tutorial_acknowledged
    }

    /// Per-frame clock feed.
    pub fn update(&mut self, now_ms: f64) {
        self.last_now_ms = now_ms;
        self.session.update(now_ms);
        self.latch_win_fact();
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let consumed = if self.session.state().is_won {
            self.handle_win_input(event)
        } else if self.in_tutorial() {
            self.handle_tutorial_input(event)
        } else {
            match event {
                InputEvent::Key(c) => self.handle_key(*c),
                InputEvent::Click(id) => self.handle_click(*id),
            }
        };
        self.latch_win_fact();
        consumed
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn handle_win_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('r') | InputEvent::Click(PLAY_AGAIN) => {
                self.play_again();
                true
            }
            _ => false,
        }
    }

    fn handle_tutorial_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('n') | InputEvent::Key('\n') | InputEvent::Click(TUTORIAL_NEXT) => {
                if tutorial::is_last(self.tutorial_step) {
                    self.session.acknowledge_tutorial();
                } else {
                    self.tutorial_step += 1;
                }
                true
            }
            InputEvent::Key('s') | InputEvent::Click(TUTORIAL_SKIP) => {
                self.session.acknowledge_tutorial();
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' => {
                self.session.apply_click();
                true
            }
            'u' => {
                self.panel = self.panel.next();
                true
            }
            '-' => {
                self.set_stake(self.stake.smaller());
                true
            }
            '=' => {
                self.set_stake(self.stake.larger());
                true
            }
            _ => {
                if let Some(row) = upgrade_index(key) {
                    self.panel = Panel::Upgrades;
                    self.buy_listed(row);
                    true
                } else if let Some(idx) = module_index(key) {
                    self.panel = Panel::Moonbase;
                    self.invest_listed(idx);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            CLICK_CENTER => {
                self.session.apply_click();
                true
            }
            TAB_UPGRADES => {
                self.panel = Panel::Upgrades;
                true
            }
            TAB_OWNED => {
                self.panel = Panel::Owned;
                true
            }
            TAB_MOONBASE => {
                self.panel = Panel::Moonbase;
                true
            }
            id => {
                if let Some(row) = buy_row(id) {
                    self.buy_listed(row);
                    true
                } else if let Some(idx) = invest_row(id) {
                    self.invest_listed(idx);
                    true
                } else if let Some(stake) = id
                    .checked_sub(INVEST_STAKE_BASE)
                    .and_then(|i| InvestStake::ALL.get(i as usize))
                {
                    self.set_stake(*stake);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn set_stake(&mut self, stake: InvestStake) {
        self.stake = stake;
        self.panel = Panel::Moonbase;
    }

    /// Buy the upgrade at a position in the shop list.
    fn buy_listed(&mut self, display_idx: usize) -> bool {
        let id = {
            let state = self.session.state();
            let catalog = self.session.catalog();
            let policy = self.session.config().purchase_policy;
            match logic::available_upgrades(state, catalog, policy).get(display_idx) {
                Some(u) => u.id.clone(),
                None => return false,
            }
        };
        self.selected_upgrade = self.session.catalog().upgrades.iter().position(|u| u.id == id);
        self.session.purchase_upgrade(&id)
    }

    /// Invest the current stake into the module at `idx`.
    fn invest_listed(&mut self, idx: usize) -> bool {
        let (id, amount) = match self.session.catalog().modules.get(idx) {
            Some(m) => (m.id.clone(), self.stake.amount(self.session.state(), m)),
            None => return false,
        };
        match self.stake {
            InvestStake::Max => self.session.invest_max(&id),
            _ => self.session.invest_in_module(&id, amount),
        }
    }

    fn play_again(&mut self) {
        self.session.reset(self.last_now_ms);
        // Returning players already know the rules.
        self.session.acknowledge_tutorial();
        self.panel = Panel::Upgrades;
        self.stake = InvestStake::Max;
        self.selected_upgrade = None;
        self.win_fact = None;
    }

    fn latch_win_fact(&mut self) {
        if self.session.state().is_won && self.win_fact.is_none() {
            self.win_fact = Some(self.facts.pick());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> MoonbaseGame {
        let mut g = MoonbaseGame::new(Catalog::wichita(), SessionConfig::default(), 0.0, 7);
        g.handle_input(&InputEvent::Key('s'));
        g
    }

    #[test]
    fn tutorial_blocks_play_until_done() {
        let mut g = MoonbaseGame::new(Catalog::wichita(), SessionConfig::default(), 0.0, 7);
        assert!(g.in_tutorial());
        assert!(!g.handle_input(&InputEvent::Key('c')));
        assert_eq!(g.session.state().total_clicks, 0);

        for expected in 1..4 {
            assert!(g.handle_input(&InputEvent::Key('n')));
            assert_eq!(g.tutorial_step, expected);
        }
        assert!(g.in_tutorial());
        g.handle_input(&InputEvent::Click(TUTORIAL_NEXT));
        assert!(!g.in_tutorial());
    }

    #[test]
    fn tutorial_skip_acknowledges() {
        let mut g = MoonbaseGame::new(Catalog::wichita(), SessionConfig::default(), 0.0, 7);
        g.handle_input(&InputEvent::Click(TUTORIAL_SKIP));
        assert!(g.session.state().tutorial_acknowledged);
    }

    #[test]
    fn click_by_key_and_target() {
        let mut g = game();
        g.handle_input(&InputEvent::Key('c'));
        g.handle_input(&InputEvent::Click(CLICK_CENTER));
        assert!((g.session.state().capital - 2.0).abs() < 0.001);
        assert_eq!(g.session.state().total_clicks, 2);
    }

    #[test]
    fn cycle_panels() {
        let mut g = game();
        assert_eq!(g.panel, Panel::Upgrades);
        g.handle_input(&InputEvent::Key('u'));
        assert_eq!(g.panel, Panel::Owned);
        g.handle_input(&InputEvent::Key('u'));
        assert_eq!(g.panel, Panel::Moonbase);
        g.handle_input(&InputEvent::Key('u'));
        assert_eq!(g.panel, Panel::Upgrades);
        g.handle_input(&InputEvent::Click(TAB_OWNED));
        assert_eq!(g.panel, Panel::Owned);
        g.handle_input(&InputEvent::Click(TAB_UPGRADES));
        assert_eq!(g.panel, Panel::Upgrades);
        g.handle_input(&InputEvent::Click(TAB_MOONBASE));
        assert_eq!(g.panel, Panel::Moonbase);
    }

    #[test]
    fn buy_upgrade_via_key() {
        let mut g = game();
        for _ in 0..10 {
            g.handle_input(&InputEvent::Key('c'));
        }
        g.handle_input(&InputEvent::Key('a'));
        assert_eq!(g.session.state().purchase_count("keeper_of_the_plains"), 1);
        assert_eq!(g.selected_upgrade, Some(0));
        assert!((g.session.state().click_power - 2.0).abs() < 0.001);
    }

    #[test]
    fn third_shop_row_is_keyed_d() {
        let mut g = game();
        for _ in 0..150 {
            g.handle_input(&InputEvent::Key('c'));
        }
        assert!(g.handle_input(&InputEvent::Key('d')));
        assert_eq!(g.session.state().purchase_count("wsu_niar"), 1);
        assert!((g.session.state().click_power - 4.0).abs() < 1e-9);
    }

    fn wide_catalog() -> Catalog {
        let upgrades: Vec<String> = (0..13)
            .map(|i| {
                format!(
                    r#"{{"id": "u{i}", "name": "Upgrade {i}", "cost": 10, "effect": {{"kind": "clickPower", "magnitude": 1}}}}"#
                )
            })
            .collect();
        let modules: Vec<String> = (0..6)
            .map(|i| format!(r#"{{"id": "m{i}", "name": "Module {i}", "requiredCapital": 100}}"#))
            .collect();
        let json = format!(
            r#"{{"upgrades": [{}], "modules": [{}]}}"#,
            upgrades.join(","),
            modules.join(",")
        );
        Catalog::from_json(&json).unwrap()
    }

    #[test]
    fn keys_reach_every_row_of_a_larger_catalog() {
        let mut g = MoonbaseGame::new(wide_catalog(), SessionConfig::default(), 0.0, 7);
        g.handle_input(&InputEvent::Key('s'));
        for _ in 0..100 {
            g.handle_input(&InputEvent::Key('c'));
        }

        assert!(g.handle_input(&InputEvent::Key('n')));
        assert_eq!(g.session.state().purchase_count("u12"), 1);

        assert!(g.handle_input(&InputEvent::Key('6')));
        assert_eq!(g.panel, Panel::Moonbase);
        assert_eq!(g.session.state().progress("m5"), Some(90.0));

        g.handle_input(&InputEvent::Click(INVEST_MODULE_BASE + 5));
        assert_eq!(g.session.state().progress("m5"), Some(90.0));
        for _ in 0..10 {
            g.handle_input(&InputEvent::Key('c'));
        }
        g.handle_input(&InputEvent::Click(INVEST_MODULE_BASE + 5));
        assert_eq!(g.session.state().progress("m5"), Some(100.0));
    }

    #[test]
    fn stake_invests_share_of_capital() {
        let mut g = game();
        for _ in 0..1_000 {
            g.session.apply_click();
        }

        assert!(g.handle_input(&InputEvent::Key('-')));
        assert_eq!(g.stake, InvestStake::Half);
        assert_eq!(g.panel, Panel::Moonbase);
        g.handle_input(&InputEvent::Click(INVEST_STAKE_BASE));
        assert_eq!(g.stake, InvestStake::Tenth);

        g.handle_input(&InputEvent::Key('1'));
        let state = g.session.state();
        assert!((state.capital - 900.0).abs() < 1e-9);
        assert!((state.progress("habitat").unwrap() - 2.0).abs() < 1e-9);

        g.handle_input(&InputEvent::Key('='));
        assert_eq!(g.stake, InvestStake::Quarter);
        g.handle_input(&InputEvent::Click(INVEST_MODULE_BASE + 1));
        let state = g.session.state();
        assert!((state.capital - 675.0).abs() < 1e-9);
        assert!((state.progress("power").unwrap() - 2.25).abs() < 1e-9);
    }

    #[test]
    fn stake_never_overfunds_a_module() {
        let mut g = game();
        for _ in 0..20_000 {
            g.session.apply_click();
        }
        g.handle_input(&InputEvent::Click(INVEST_STAKE_BASE + 2));
        assert_eq!(g.stake, InvestStake::Half);

        g.handle_input(&InputEvent::Key('1'));
        let state = g.session.state();
        assert_eq!(state.progress("habitat"), Some(100.0));
        assert!((state.capital - 15_000.0).abs() < 1e-9);

        // Nothing left to fund: rejected without touching capital.
        g.handle_input(&InputEvent::Key('1'));
        assert!((g.session.state().capital - 15_000.0).abs() < 1e-9);
    }

    #[test]
    fn stake_steps_stop_at_the_ends() {
        let mut g = game();
        for _ in 0..5 {
            g.handle_input(&InputEvent::Key('='));
        }
        assert_eq!(g.stake, InvestStake::Max);
        for _ in 0..5 {
            g.handle_input(&InputEvent::Key('-'));
        }
        assert_eq!(g.stake, InvestStake::Tenth);
    }

    #[test]
    fn buy_upgrade_via_click_target() {
        let mut g = game();
        for _ in 0..50 {
            g.handle_input(&InputEvent::Key('c'));
        }
        g.handle_input(&InputEvent::Click(BUY_UPGRADE_BASE + 1));
        assert_eq!(g.session.state().purchase_count("old_town"), 1);
        assert!(g.session.timer().is_armed());
    }

    #[test]
    fn invest_via_key_and_target() {
        let mut g = game();
        for _ in 0..30 {
            g.handle_input(&InputEvent::Key('c'));
        }
        g.handle_input(&InputEvent::Key('1'));
        assert_eq!(g.panel, Panel::Moonbase);
        let habitat = g.session.state().progress("habitat").unwrap();
        assert!((habitat - 0.6).abs() < 1e-9);

        for _ in 0..10 {
            g.handle_input(&InputEvent::Key('c'));
        }
        g.handle_input(&InputEvent::Click(INVEST_MODULE_BASE + 1));
        let power = g.session.state().progress("power").unwrap();
        assert!((power - 0.1).abs() < 1e-9);
    }

    #[test]
    fn unknown_keys_and_targets_ignored() {
        let mut g = game();
        assert!(!g.handle_input(&InputEvent::Key('!')));
        assert!(!g.handle_input(&InputEvent::Key('0')));
        assert!(!g.handle_input(&InputEvent::Click(9999)));
        assert!(!g.handle_input(&InputEvent::Click(INVEST_STAKE_BASE + 4)));
        assert!(g.handle_input(&InputEvent::Key('l'))); // nothing affordable, still consumed
        assert_eq!(g.session.state().capital, 0.0);
    }

    #[test]
    fn passive_income_through_update() {
        let mut g = game();
        for _ in 0..50 {
            g.handle_input(&InputEvent::Key('c'));
        }
        g.handle_input(&InputEvent::Key('b'));
        g.update(100.0);
        g.update(2_100.0);
        assert!((g.session.state().capital - 2.0).abs() < 0.001);
    }

    #[test]
    fn win_then_play_again() {
        let mut g = game();
        g.update(5_000.0);
        // Enough capital to fund everything at once.
        for _ in 0..120_000 {
            g.session.apply_click();
        }
        for key in ['1', '2', '3', '4', '5'] {
            g.handle_input(&InputEvent::Key(key));
        }
        assert!(g.session.state().is_won);
        assert!(g.win_fact.is_some());

        // Gameplay is frozen on the win screen.
        assert!(!g.handle_input(&InputEvent::Key('c')));

        g.update(9_000.0);
        assert!(g.handle_input(&InputEvent::Key('r')));
        let state = g.session.state();
        assert!(!state.is_won);
        assert_eq!(state.capital, 0.0);
        assert_eq!(state.started_at_ms, 9_000.0);
        assert!(state.tutorial_acknowledged);
        assert!(g.win_fact.is_none());
        assert_eq!(g.stake, InvestStake::Max);
    }
}
