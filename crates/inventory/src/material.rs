//! Raw-material stock per material.
//!
//! Purchases add to a material's balance. Consumption comes from a rule
//! table keyed by normalized material name; each rule derives a consumed
//! quantity from the production log. Out of the box only gas has a rule
//! (the summed gas weight of every production run), so other materials
//! always report zero consumption.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::config::ReconciliationConfig;
use crate::records::{MaterialEntry, ProductionEvent};

/// Identity of a material: trimmed and upper-cased.
pub fn normalize_material_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Derives a material's consumed quantity from the production log.
pub trait ConsumptionRule: Send + Sync {
    fn consumed(&self, productions: &[ProductionEvent]) -> f64;
}

impl<F> ConsumptionRule for F
where
    F: Fn(&[ProductionEvent]) -> f64 + Send + Sync,
{
    fn consumed(&self, productions: &[ProductionEvent]) -> f64 {
        self(productions)
    }
}

/// Gas burned by production: the sum of every run's gas weight.
#[derive(Debug, Copy, Clone, Default)]
pub struct GasWeightRule;

impl ConsumptionRule for GasWeightRule {
    fn consumed(&self, productions: &[ProductionEvent]) -> f64 {
        productions.iter().map(|p| p.gas_weight).sum()
    }
}

/// One rule and the material names it answers to.
///
/// The names are aliases of one material (e.g. `GAS` and `GAZ`): the rule is
/// evaluated once and charged to a single balance.
#[derive(Clone)]
struct RuleGroup {
    materials: Vec<String>,
    rule: Arc<dyn ConsumptionRule>,
}

/// Consumption rules by normalized material name.
#[derive(Clone, Default)]
pub struct ConsumptionRules {
    groups: Vec<RuleGroup>,
}

impl core::fmt::Debug for ConsumptionRules {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.groups.iter().map(|g| &g.materials))
            .finish()
    }
}

impl ConsumptionRules {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The gas-weight rule, with every configured gas name as an alias.
    pub fn from_config(config: &ReconciliationConfig) -> Self {
        let names: Vec<&str> = config.gas_materials.iter().map(String::as_str).collect();
        Self::empty().with_aliased_rule(&names, GasWeightRule)
    }

    /// Register (or replace) the rule for `material`.
    pub fn with_rule(self, material: &str, rule: impl ConsumptionRule + 'static) -> Self {
        self.with_aliased_rule(&[material], rule)
    }

    /// Register one rule for a material known under several names.
    ///
    /// The first name that has purchases receives the consumption; if none
    /// has, it is reported as untracked under the first name. Names already
    /// bound to another rule are moved to this one.
    pub fn with_aliased_rule(
        mut self,
        materials: &[&str],
        rule: impl ConsumptionRule + 'static,
    ) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(materials.len());
        for name in materials.iter().map(|m| normalize_material_name(m)) {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        if names.is_empty() {
            return self;
        }

        for group in &mut self.groups {
            group.materials.retain(|m| !names.contains(m));
        }
        self.groups.retain(|g| !g.materials.is_empty());
        self.groups.push(RuleGroup {
            materials: names,
            rule: Arc::new(rule),
        });
        self
    }

    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.materials.iter().map(String::as_str))
    }

    /// Number of distinct rules (aliases count once).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Stock of one material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialBalance {
    /// Unit of the first purchase seen for the material.
    pub unit: String,
    pub acquired: f64,
    pub consumed: f64,
    pub remaining: f64,
}

/// Result of a material reconciliation, ordered by material name.
///
/// Serializes as the name → balance map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaterialStock {
    balances: BTreeMap<String, MaterialBalance>,
    #[serde(skip)]
    untracked_consumption: BTreeMap<String, f64>,
}

impl MaterialStock {
    /// Look up a material by name in any case.
    pub fn get(&self, name: &str) -> Option<&MaterialBalance> {
        self.balances.get(&normalize_material_name(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MaterialBalance)> {
        self.balances.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Non-zero rule consumption for materials that were never purchased.
    ///
    /// These materials get no balance entry.
    pub fn untracked_consumption(&self) -> &BTreeMap<String, f64> {
        &self.untracked_consumption
    }
}

/// Nets purchases against rule-derived consumption, per material.
#[derive(Debug, Clone)]
pub struct MaterialLedger {
    rules: ConsumptionRules,
}

impl Default for MaterialLedger {
    fn default() -> Self {
        Self::new(ConsumptionRules::from_config(&ReconciliationConfig::default()))
    }
}

impl MaterialLedger {
    pub fn new(rules: ConsumptionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ConsumptionRules {
        &self.rules
    }

    pub fn compute_material_stock(
        &self,
        materials: &[MaterialEntry],
        productions: &[ProductionEvent],
    ) -> MaterialStock {
        let mut stock = MaterialStock::default();

        for entry in materials {
            let name = normalize_material_name(&entry.name);
            let balance = stock
                .balances
                .entry(name)
                .or_insert_with_key(|name| {
                    tracing::trace!(material = %name, unit = %entry.unit, "material first seen");
                    MaterialBalance {
                        unit: entry.unit.clone(),
                        acquired: 0.0,
                        consumed: 0.0,
                        remaining: 0.0,
                    }
                });
            if balance.unit != entry.unit {
                tracing::warn!(
                    material = %normalize_material_name(&entry.name),
                    unit = %balance.unit,
                    other_unit = %entry.unit,
                    "purchases of one material recorded in different units; summing as-is"
                );
            }
            balance.acquired += entry.quantity_purchased;
        }

        for group in &self.rules.groups {
            let consumed = group.rule.consumed(productions);
            let charged = group
                .materials
                .iter()
                .find(|m| stock.balances.contains_key(m.as_str()));
            match charged {
                Some(material) => {
                    if let Some(balance) = stock.balances.get_mut(material) {
                        // Overwrite, so the figure never depends on prior runs.
                        balance.consumed = consumed;
                    }
                }
                None if consumed != 0.0 => {
                    let material = &group.materials[0];
                    tracing::debug!(
                        material = %material,
                        consumed,
                        "consumption recorded for a material with no purchases"
                    );
                    stock
                        .untracked_consumption
                        .insert(material.clone(), consumed);
                }
                None => {}
            }
        }

        for balance in stock.balances.values_mut() {
            balance.remaining = balance.acquired - balance.consumed;
        }

        tracing::debug!(
            purchases = materials.len(),
            productions = productions.len(),
            materials = stock.len(),
            "material stock computed"
        );

        stock
    }
}
