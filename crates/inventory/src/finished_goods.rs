//! Finished-goods stock per variant.
//!
//! Stock is never stored. It is derived from the full production, shipment
//! and cut logs on every read:
//!
//! - production adds quantity and area, and is the only event that creates a
//!   variant entry;
//! - shipments and cuts subtract from an existing entry;
//! - a subtractive event whose variant was never produced is dropped from the
//!   balances and reported as an [`OrphanedEvent`] instead.
//!
//! Balances may go negative (over-shipment). That is left for auditing, not
//! rejected here. Quantities saturate at the `i64` bounds instead of wrapping.

use std::collections::HashMap;

use serde::Serialize;

use packstock_core::RecordId;

use crate::records::{CutUsageEvent, ProductionEvent, ShipmentEvent};
use crate::variant::{VariantKey, VariantKeyBuilder};

/// Net stock of one variant.
///
/// Attributes are taken from the first production seen for the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantBalance {
    pub thickness: f64,
    pub width: f64,
    pub length: f64,
    pub color: String,
    pub quantity: i64,
    pub area: f64,
}

impl VariantBalance {
    fn matches(&self, term: &str) -> bool {
        self.thickness.to_string().contains(term)
            || self.width.to_string().contains(term)
            || self.length.to_string().contains(term)
            || self.color.to_lowercase().contains(term)
    }
}

/// Which log an orphaned event came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanSource {
    Shipment,
    Cut,
}

/// A shipment or cut that matched no produced variant and was not netted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanedEvent {
    pub source: OrphanSource,
    pub record_id: Option<RecordId>,
    /// Index of the event in the input sequence it came from.
    pub position: usize,
    pub key: VariantKey,
    pub quantity: i64,
    pub area: f64,
}

/// Sum of quantity and area over a set of balances.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct StockTotals {
    pub quantity: i64,
    pub area: f64,
}

impl StockTotals {
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a VariantBalance>) -> Self {
        rows.into_iter().fold(Self::default(), |acc, row| Self {
            quantity: acc.quantity.saturating_add(row.quantity),
            area: acc.area + row.area,
        })
    }
}

/// Result of a finished-goods reconciliation.
///
/// Entries iterate in the order their variant was first produced. Serializes
/// as the list of balances; orphans are read separately.
#[derive(Debug, Clone, Default)]
pub struct FinishedGoodsStock {
    entries: Vec<(VariantKey, VariantBalance)>,
    index: HashMap<VariantKey, usize>,
    orphans: Vec<OrphanedEvent>,
}

impl FinishedGoodsStock {
    pub fn get(&self, key: &VariantKey) -> Option<&VariantBalance> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariantKey, &VariantBalance)> {
        self.entries.iter().map(|(k, b)| (k, b))
    }

    pub fn rows(&self) -> impl Iterator<Item = &VariantBalance> {
        self.entries.iter().map(|(_, b)| b)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn orphans(&self) -> &[OrphanedEvent] {
        &self.orphans
    }

    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    pub fn totals(&self) -> StockTotals {
        StockTotals::of(self.rows())
    }

    /// Rows whose dimensions contain `term`, or whose color contains it
    /// case-insensitively. A blank term matches every row.
    pub fn search(&self, term: &str) -> Vec<&VariantBalance> {
        let term = term.trim().to_lowercase();
        self.rows().filter(|row| row.matches(&term)).collect()
    }

    fn produce(&mut self, key: VariantKey, event: &ProductionEvent, color: &str) {
        let i = match self.index.get(&key).copied() {
            Some(i) => i,
            None => {
                let balance = VariantBalance {
                    thickness: event.thickness,
                    width: event.width,
                    length: event.length,
                    color: color.to_string(),
                    quantity: 0,
                    area: 0.0,
                };
                self.entries.push((key.clone(), balance));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let balance = &mut self.entries[i].1;
        balance.quantity = balance.quantity.saturating_add(event.quantity);
        balance.area += event.area;
    }

    /// Subtract from an existing entry; returns `false` if the variant is unknown.
    fn consume(&mut self, key: &VariantKey, quantity: i64, area: f64) -> bool {
        match self.index.get(key) {
            Some(&i) => {
                let balance = &mut self.entries[i].1;
                balance.quantity = balance.quantity.saturating_sub(quantity);
                balance.area -= area;
                true
            }
            None => false,
        }
    }

    fn orphan(&mut self, event: OrphanedEvent) {
        tracing::debug!(
            source = ?event.source,
            position = event.position,
            record_id = ?event.record_id,
            variant = %event.key,
            "dropping event with no matching production"
        );
        self.orphans.push(event);
    }
}

impl Serialize for FinishedGoodsStock {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// Nets production against shipments and cuts, per variant.
#[derive(Debug, Clone, Default)]
pub struct FinishedGoodsLedger {
    keys: VariantKeyBuilder,
}

impl FinishedGoodsLedger {
    pub fn new(keys: VariantKeyBuilder) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &VariantKeyBuilder {
        &self.keys
    }

    pub fn compute_stock(
        &self,
        productions: &[ProductionEvent],
        shipments: &[ShipmentEvent],
        cuts: &[CutUsageEvent],
    ) -> FinishedGoodsStock {
        let mut stock = FinishedGoodsStock::default();

        for event in productions {
            let key = self.keys.key_for(event);
            let color = self.keys.resolve_color(event.color.as_deref());
            stock.produce(key, event, color);
        }

        for (position, event) in shipments.iter().enumerate() {
            let key = self.keys.key_for(event);
            if !stock.consume(&key, event.quantity, event.area) {
                stock.orphan(OrphanedEvent {
                    source: OrphanSource::Shipment,
                    record_id: event.id,
                    position,
                    key,
                    quantity: event.quantity,
                    area: event.area,
                });
            }
        }

        for (position, event) in cuts.iter().enumerate() {
            let key = self.keys.key_for(event);
            if !stock.consume(&key, event.used_quantity, event.used_area) {
                stock.orphan(OrphanedEvent {
                    source: OrphanSource::Cut,
                    record_id: event.id,
                    position,
                    key,
                    quantity: event.used_quantity,
                    area: event.used_area,
                });
            }
        }

        if !stock.orphans.is_empty() {
            tracing::warn!(
                orphans = stock.orphans.len(),
                "subtractive events matched no produced variant and were not netted"
            );
        }
        tracing::debug!(
            productions = productions.len(),
            shipments = shipments.len(),
            cuts = cuts.len(),
            variants = stock.len(),
            "finished goods stock computed"
        );

        stock
    }
}
