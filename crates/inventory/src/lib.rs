//! Stock reconciliation for the packaging factory.
//!
//! Current inventory is never stored; it is derived on every read from the
//! append-only production, shipment and cut logs (finished goods) and the
//! raw-material purchase log. This crate is pure domain logic: it takes a
//! [`Snapshot`] gathered by the caller and returns freshly built views
//! (no IO, no HTTP, no storage).

mod de;

pub mod config;
pub mod dashboard;
pub mod finished_goods;
pub mod material;
pub mod records;
pub mod snapshot;
pub mod variant;

pub use config::ReconciliationConfig;
pub use dashboard::{CollectionCounts, DashboardAggregator, DashboardSummary, Reconciler};
pub use finished_goods::{
    FinishedGoodsLedger, FinishedGoodsStock, OrphanSource, OrphanedEvent, StockTotals,
    VariantBalance,
};
pub use material::{
    ConsumptionRule, ConsumptionRules, GasWeightRule, MaterialBalance, MaterialLedger,
    MaterialStock, normalize_material_name,
};
pub use records::{CutUsageEvent, GasEntry, MaterialEntry, ProductionEvent, ShipmentEvent};
pub use snapshot::{Collection, Snapshot, SnapshotError};
pub use variant::{Dimension, VariantAttributes, VariantKey, VariantKeyBuilder};
