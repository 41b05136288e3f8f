//! Static upgrade and module catalog.
//!
//! The catalog is loaded once when a session starts and never changes afterwards.
//! It comes either from the built-in table ([`Catalog::wichita`]) or from JSON
//! supplied by an external loader ([`Catalog::from_json`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What an upgrade changes when bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// Flat bonus to capital per click.
    ClickPower,
    /// Flat bonus to capital per passive tick.
    PassiveIncome,
    /// Multiplies click income.
    ClickMultiplier,
    /// Multiplies passive income.
    PassiveMultiplier,
}

impl EffectKind {
    pub fn is_multiplier(&self) -> bool {
        matches!(self, EffectKind::ClickMultiplier | EffectKind::PassiveMultiplier)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub magnitude: f64,
}

impl Effect {
    /// Short human-readable description, e.g. `+2 IC per click` or `3x passive income`.
    pub fn describe(&self) -> String {
        let m = trim_float(self.magnitude);
        match self.kind {
            EffectKind::ClickPower => format!("+{} IC per click", m),
            EffectKind::PassiveIncome => format!("+{} IC per second", m),
            EffectKind::ClickMultiplier => format!("{}x click power", m),
            EffectKind::PassiveMultiplier => format!("{}x passive income", m),
        }
    }
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Most upgrades a catalog may list; each shop row needs its own key.
pub const MAX_UPGRADES: usize = 24;
/// Most modules a catalog may list; modules are keyed `1`-`9`.
pub const MAX_MODULES: usize = 9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub cost: f64,
    pub effect: Effect,
    /// Shown when the player selects the upgrade in the shop.
    #[serde(default)]
    pub wichita_fact: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Capital needed to take the module from 0% to 100%.
    #[serde(alias = "requiredIC")]
    pub required_capital: f64,
}

/// Why a catalog was refused.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog entry has an empty id")]
    EmptyId,
    #[error("duplicate catalog id `{0}`")]
    DuplicateId(String),
    #[error("upgrade `{0}` must cost more than 0")]
    NonPositiveCost(String),
    #[error("upgrade `{0}` must have a positive effect magnitude")]
    NonPositiveMagnitude(String),
    #[error("multiplier upgrade `{id}` has factor {factor}, expected at least 1")]
    MultiplierBelowOne { id: String, factor: f64 },
    #[error("module `{0}` must require more than 0 capital")]
    NonPositiveThreshold(String),
    #[error("catalog defines no modules")]
    NoModules,
    #[error("catalog lists {count} {kind}, at most {max} fit the key layout")]
    TooManyEntries {
        kind: &'static str,
        count: usize,
        max: usize,
    },
}

/// Read-only set of upgrades and modules for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub upgrades: Vec<Upgrade>,
    pub modules: Vec<Module>,
}

impl Catalog {
    /// Build a catalog, rejecting entries that would break the simulation invariants.
    pub fn new(upgrades: Vec<Upgrade>, modules: Vec<Module>) -> Result<Self, CatalogError> {
        let catalog = Self { upgrades, modules };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse `{"upgrades": [...], "modules": [...]}` and validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.modules.is_empty() {
            // An empty module list would make the win condition vacuously true.
            return Err(CatalogError::NoModules);
        }
        if self.upgrades.len() > MAX_UPGRADES {
            return Err(CatalogError::TooManyEntries {
                kind: "upgrades",
                count: self.upgrades.len(),
                max: MAX_UPGRADES,
            });
        }
        if self.modules.len() > MAX_MODULES {
            return Err(CatalogError::TooManyEntries {
                kind: "modules",
                count: self.modules.len(),
                max: MAX_MODULES,
            });
        }

        let mut seen = HashSet::new();
        for u in &self.upgrades {
            check_id(&u.id, &mut seen)?;
            if !(u.cost > 0.0) || !u.cost.is_finite() {
                return Err(CatalogError::NonPositiveCost(u.id.clone()));
            }
            if !(u.effect.magnitude > 0.0) || !u.effect.magnitude.is_finite() {
                return Err(CatalogError::NonPositiveMagnitude(u.id.clone()));
            }
            if u.effect.kind.is_multiplier() && u.effect.magnitude < 1.0 {
                return Err(CatalogError::MultiplierBelowOne {
                    id: u.id.clone(),
                    factor: u.effect.magnitude,
                });
            }
        }

        let mut seen = HashSet::new();
        for m in &self.modules {
            check_id(&m.id, &mut seen)?;
            if !(m.required_capital > 0.0) || !m.required_capital.is_finite() {
                return Err(CatalogError::NonPositiveThreshold(m.id.clone()));
            }
        }
        Ok(())
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// The built-in "Wichita to the Moon" catalog: 12 landmark upgrades, 5 modules.
    pub fn wichita() -> Self {
        Self {
            upgrades: vec![
                upgrade(
                    "keeper_of_the_plains",
                    "Keeper of the Plains",
                    "🗿",
                    "The city's icon inspires every engineer.",
                    10.0,
                    EffectKind::ClickPower,
                    1.0,
                    Some("The 44-foot Keeper of the Plains stands where the Big and Little Arkansas rivers meet."),
                ),
                upgrade(
                    "old_town",
                    "Old Town District",
                    "🏛",
                    "Warehouses turned startup lofts.",
                    50.0,
                    EffectKind::PassiveIncome,
                    1.0,
                    Some("Old Town's brick warehouses once served the cattle and rail trade."),
                ),
                upgrade(
                    "wsu_niar",
                    "WSU NIAR",
                    "🎓",
                    "The National Institute for Aviation Research joins the effort.",
                    150.0,
                    EffectKind::ClickPower,
                    3.0,
                    Some("NIAR at Wichita State is one of the largest aviation research institutes in the US."),
                ),
                upgrade(
                    "exploration_place",
                    "Exploration Place",
                    "🔭",
                    "Science center outreach brings in new talent.",
                    300.0,
                    EffectKind::PassiveIncome,
                    5.0,
                    None,
                ),
                upgrade(
                    "cessna",
                    "Cessna Aircraft",
                    "🛩",
                    "Light aircraft know-how doubles every click.",
                    600.0,
                    EffectKind::ClickMultiplier,
                    2.0,
                    Some("Clyde Cessna built his first aircraft in 1911 and moved production to Wichita in 1916."),
                ),
                upgrade(
                    "beechcraft",
                    "Beechcraft",
                    "✈",
                    "A steady production line of ideas.",
                    1_000.0,
                    EffectKind::PassiveIncome,
                    15.0,
                    Some("Walter and Olive Ann Beech founded Beech Aircraft in Wichita in 1932."),
                ),
                upgrade(
                    "learjet",
                    "Learjet",
                    "🛫",
                    "Business-jet speed for every click.",
                    2_000.0,
                    EffectKind::ClickPower,
                    15.0,
                    Some("The first Learjet 23 flew from Wichita in 1963."),
                ),
                upgrade(
                    "mcconnell_afb",
                    "McConnell AFB",
                    "🎖",
                    "Air Force logistics double passive output.",
                    3_500.0,
                    EffectKind::PassiveMultiplier,
                    2.0,
                    None,
                ),
                upgrade(
                    "spirit_aerosystems",
                    "Spirit AeroSystems",
                    "🏭",
                    "Fuselage-scale manufacturing capacity.",
                    6_000.0,
                    EffectKind::PassiveIncome,
                    60.0,
                    Some("Wichita builds the fuselage sections for much of the world's commercial jet fleet."),
                ),
                upgrade(
                    "boeing_wichita",
                    "Boeing Wichita",
                    "🚀",
                    "Heavy aerospace engineering triples click income.",
                    10_000.0,
                    EffectKind::ClickMultiplier,
                    3.0,
                    Some("Boeing's Wichita plant built more than 1,600 B-29 Superfortresses during WWII."),
                ),
                upgrade(
                    "textron_aviation",
                    "Textron Aviation",
                    "🛬",
                    "An entire aviation group works for the moonbase.",
                    15_000.0,
                    EffectKind::PassiveIncome,
                    150.0,
                    None,
                ),
                upgrade(
                    "cosmosphere",
                    "Cosmosphere",
                    "🌌",
                    "Space-flight heritage triples passive income.",
                    25_000.0,
                    EffectKind::PassiveMultiplier,
                    3.0,
                    Some("The nearby Cosmosphere holds the Apollo 13 command module Odyssey."),
                ),
            ],
            modules: vec![
                module("habitat", "Habitat Dome", "🏠", "Living quarters for the crew.", 5_000.0),
                module("power", "Power Station", "⚡", "Solar arrays and batteries.", 10_000.0),
                module("research", "Research Lab", "🔬", "Lunar science facilities.", 20_000.0),
                module(
                    "manufacturing",
                    "Manufacturing Bay",
                    "🏗",
                    "In-situ fabrication from regolith.",
                    35_000.0,
                ),
                module(
                    "communications",
                    "Comms Array",
                    "📡",
                    "Uplink back to Kansas.",
                    50_000.0,
                ),
            ],
        }
    }
}

fn check_id(id: &str, seen: &mut HashSet<String>) -> Result<(), CatalogError> {
    if id.trim().is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if !seen.insert(id.to_string()) {
        return Err(CatalogError::DuplicateId(id.to_string()));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn upgrade(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    cost: f64,
    kind: EffectKind,
    magnitude: f64,
    fact: Option<&str>,
) -> Upgrade {
    Upgrade {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        cost,
        effect: Effect { kind, magnitude },
        wichita_fact: fact.map(Into::into),
    }
}

fn module(id: &str, name: &str, icon: &str, description: &str, required: f64) -> Module {
    Module {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        required_capital: required,
    }
}
