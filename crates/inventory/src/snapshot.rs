//! Point-in-time view of every collection the reconciliation reads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::records::{CutUsageEvent, GasEntry, MaterialEntry, ProductionEvent, ShipmentEvent};

/// Store collections feeding a snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Production,
    Shipments,
    CutProducts,
    RawMaterials,
    GasEntries,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Production => "production",
            Collection::Shipments => "shipments",
            Collection::CutProducts => "cut_products",
            Collection::RawMaterials => "raw_materials",
            Collection::GasEntries => "gas_entries",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid {collection} document at index {index}: {source}")]
    Document {
        collection: Collection,
        index: usize,
        source: serde_json::Error,
    },

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Read-only input of one reconciliation run.
///
/// The caller gathers every collection first ("read all, then compute");
/// nothing here talks to storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(alias = "production")]
    pub productions: Vec<ProductionEvent>,
    pub shipments: Vec<ShipmentEvent>,
    #[serde(alias = "cut_products")]
    pub cuts: Vec<CutUsageEvent>,
    #[serde(alias = "raw_materials")]
    pub materials: Vec<MaterialEntry>,
    pub gas_entries: Vec<GasEntry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole snapshot from one JSON object keyed by collection.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replace one collection with decoded store documents.
    ///
    /// Fails on the first document that does not decode, naming its index.
    pub fn with_documents(
        mut self,
        collection: Collection,
        documents: impl IntoIterator<Item = JsonValue>,
    ) -> Result<Self, SnapshotError> {
        match collection {
            Collection::Production => self.productions = decode(collection, documents)?,
            Collection::Shipments => self.shipments = decode(collection, documents)?,
            Collection::CutProducts => self.cuts = decode(collection, documents)?,
            Collection::RawMaterials => self.materials = decode(collection, documents)?,
            Collection::GasEntries => self.gas_entries = decode(collection, documents)?,
        }
        Ok(self)
    }
}

fn decode<T: DeserializeOwned>(
    collection: Collection,
    documents: impl IntoIterator<Item = JsonValue>,
) -> Result<Vec<T>, SnapshotError> {
    let decoded = documents
        .into_iter()
        .enumerate()
        .map(|(index, doc)| {
            serde_json::from_value(doc).map_err(|source| SnapshotError::Document {
                collection,
                index,
                source,
            })
        })
        .collect::<Result<Vec<T>, _>>()?;
    tracing::trace!(%collection, documents = decoded.len(), "collection decoded");
    Ok(decoded)
}
