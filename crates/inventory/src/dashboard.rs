//! Dashboard summary: collection counts next to raw-material stock.
//!
//! Finished-goods stock is deliberately not part of the summary; the stock
//! table reads it through [`Reconciler::finished_goods_stock`].

use serde::Serialize;

use packstock_core::DomainResult;

use crate::config::ReconciliationConfig;
use crate::finished_goods::{FinishedGoodsLedger, FinishedGoodsStock};
use crate::material::{ConsumptionRules, MaterialLedger, MaterialStock};
use crate::snapshot::Snapshot;
use crate::variant::VariantKeyBuilder;

/// Number of records per collection.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    pub production: usize,
    pub cut_products: usize,
    pub shipments: usize,
    pub raw_materials: usize,
    pub gas_entries: usize,
}

impl CollectionCounts {
    pub fn of(snapshot: &Snapshot) -> Self {
        Self {
            production: snapshot.productions.len(),
            cut_products: snapshot.cuts.len(),
            shipments: snapshot.shipments.len(),
            raw_materials: snapshot.materials.len(),
            gas_entries: snapshot.gas_entries.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub counts: CollectionCounts,
    pub material_stock: MaterialStock,
}

/// Builds [`DashboardSummary`] values.
#[derive(Debug, Clone, Default)]
pub struct DashboardAggregator {
    materials: MaterialLedger,
}

impl DashboardAggregator {
    pub fn new(materials: MaterialLedger) -> Self {
        Self { materials }
    }

    pub fn materials(&self) -> &MaterialLedger {
        &self.materials
    }

    pub fn summarize(&self, snapshot: &Snapshot) -> DashboardSummary {
        DashboardSummary {
            counts: CollectionCounts::of(snapshot),
            material_stock: self
                .materials
                .compute_material_stock(&snapshot.materials, &snapshot.productions),
        }
    }
}

/// Entry point for the surrounding API layer.
///
/// Holds no state between calls; every read recomputes from the snapshot it
/// is given, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: ReconciliationConfig,
    finished_goods: FinishedGoodsLedger,
    dashboard: DashboardAggregator,
}

impl Reconciler {
    pub fn new(config: ReconciliationConfig) -> DomainResult<Self> {
        config.validate()?;
        let rules = ConsumptionRules::from_config(&config);
        tracing::info!(
            default_color = %config.default_color,
            dimension_precision = config.dimension_precision,
            consumption_rules = ?rules,
            "reconciler configured"
        );
        Ok(Self {
            finished_goods: FinishedGoodsLedger::new(VariantKeyBuilder::from_config(&config)),
            dashboard: DashboardAggregator::new(MaterialLedger::new(rules)),
            config,
        })
    }

    pub fn from_env() -> DomainResult<Self> {
        Self::new(ReconciliationConfig::from_env()?)
    }

    /// Replace the consumption rule table built from config.
    pub fn with_rules(mut self, rules: ConsumptionRules) -> Self {
        self.dashboard = DashboardAggregator::new(MaterialLedger::new(rules));
        self
    }

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    pub fn finished_goods_stock(&self, snapshot: &Snapshot) -> FinishedGoodsStock {
        self.finished_goods
            .compute_stock(&snapshot.productions, &snapshot.shipments, &snapshot.cuts)
    }

    pub fn material_stock(&self, snapshot: &Snapshot) -> MaterialStock {
        self.dashboard
            .materials()
            .compute_material_stock(&snapshot.materials, &snapshot.productions)
    }

    pub fn dashboard(&self, snapshot: &Snapshot) -> DashboardSummary {
        self.dashboard.summarize(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{GasEntry, MaterialEntry, ProductionEvent, ShipmentEvent};

    fn reconciler() -> Reconciler {
        Reconciler::new(ReconciliationConfig::default()).unwrap()
    }

    fn gas_entry(kg: f64) -> GasEntry {
        GasEntry {
            id: None,
            date: None,
            total_gas: kg,
            notes: String::new(),
        }
    }

    #[test]
    fn empty_snapshot_yields_zero_counts_and_no_stock() {
        let snapshot = Snapshot::new();
        let r = reconciler();

        let summary = r.dashboard(&snapshot);
        assert_eq!(summary.counts, CollectionCounts::default());
        assert!(summary.material_stock.is_empty());
        assert!(r.finished_goods_stock(&snapshot).is_empty());
        assert!(r.material_stock(&snapshot).is_empty());
    }

    #[test]
    fn summary_counts_every_collection() {
        let snapshot = Snapshot {
            productions: vec![
                ProductionEvent::new(2.0, 100.0, 200.0, 50, 100.0).with_gas_weight(10.0),
                ProductionEvent::new(2.0, 100.0, 200.0, 5, 10.0).with_gas_weight(15.0),
            ],
            shipments: vec![ShipmentEvent::new(2.0, 100.0, Some(200.0), 20, 40.0)],
            cuts: vec![],
            materials: vec![MaterialEntry::new("gaz", 500.0)],
            gas_entries: vec![gas_entry(100.0), gas_entry(50.0)],
        };

        let summary = reconciler().dashboard(&snapshot);
        assert_eq!(
            summary.counts,
            CollectionCounts {
                production: 2,
                cut_products: 0,
                shipments: 1,
                raw_materials: 1,
                gas_entries: 2,
            }
        );
        let gaz = summary.material_stock.get("GAZ").unwrap();
        assert_eq!((gaz.acquired, gaz.consumed, gaz.remaining), (500.0, 25.0, 475.0));
    }

    #[test]
    fn summary_serializes_flat_counts() {
        let json = serde_json::to_value(reconciler().dashboard(&Snapshot::new())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "production": 0,
                "cut_products": 0,
                "shipments": 0,
                "raw_materials": 0,
                "gas_entries": 0,
                "material_stock": {}
            })
        );
    }

    #[test]
    fn config_drives_keys_and_rules() {
        let r = Reconciler::new(ReconciliationConfig {
            default_color: "Şeffaf".to_string(),
            dimension_precision: 0,
            gas_materials: vec!["lpg".to_string()],
        })
        .unwrap();

        let snapshot = Snapshot {
            productions: vec![
                ProductionEvent::new(2.2, 100.0, 200.0, 3, 6.0).with_gas_weight(4.0),
                ProductionEvent::new(2.0, 100.0, 200.0, 1, 2.0).with_color("Şeffaf"),
            ],
            materials: vec![MaterialEntry::new("LPG", 10.0), MaterialEntry::new("gaz", 10.0)],
            ..Snapshot::default()
        };

        let stock = r.finished_goods_stock(&snapshot);
        assert_eq!(stock.len(), 1);
        assert_eq!(stock.rows().next().unwrap().quantity, 4);
        assert_eq!(stock.rows().next().unwrap().color, "Şeffaf");

        let materials = r.material_stock(&snapshot);
        assert_eq!(materials.get("lpg").unwrap().consumed, 4.0);
        assert_eq!(materials.get("gaz").unwrap().consumed, 0.0);
    }

    #[test]
    fn custom_rules_replace_configured_ones() {
        let r = reconciler().with_rules(ConsumptionRules::empty());
        let snapshot = Snapshot {
            productions: vec![ProductionEvent::new(2.0, 100.0, 200.0, 1, 2.0).with_gas_weight(9.0)],
            materials: vec![MaterialEntry::new("gaz", 10.0)],
            ..Snapshot::default()
        };
        assert_eq!(r.material_stock(&snapshot).get("GAZ").unwrap().consumed, 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Reconciler::new(ReconciliationConfig {
            dimension_precision: 42,
            ..ReconciliationConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, packstock_core::DomainError::Validation(_)));
    }

    #[test]
    fn reconciler_can_be_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Reconciler>();
    }
}
