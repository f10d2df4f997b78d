//! Input records, as handed over by the CRUD layer.
//!
//! Field names follow the store documents; the Turkish names used by the
//! entry forms (`kalinlik`, `en`, `boy`, `adet`, ...) are accepted as aliases.
//! Fields the reconciliation does not need are ignored on decode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use packstock_core::RecordId;

use crate::de;
use crate::variant::VariantAttributes;

/// A production run (adds finished goods, consumes gas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEvent {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "tarih", deserialize_with = "de::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "makine", deserialize_with = "de::optional_text")]
    pub machine: Option<String>,
    /// Thickness in mm.
    #[serde(alias = "kalinlik", deserialize_with = "de::number")]
    pub thickness: f64,
    /// Width in cm.
    #[serde(alias = "en", deserialize_with = "de::number")]
    pub width: f64,
    /// Length in cm.
    #[serde(alias = "boy", deserialize_with = "de::number")]
    pub length: f64,
    #[serde(alias = "adet", deserialize_with = "de::integer")]
    pub quantity: i64,
    /// Area in m², computed by the entry form.
    #[serde(alias = "metrekare", alias = "square_meter", deserialize_with = "de::number")]
    pub area: f64,
    #[serde(default, alias = "renk", deserialize_with = "de::optional_text")]
    pub color: Option<String>,
    /// Gas consumed by the run, in kg.
    #[serde(default, alias = "gaz_agirligi", deserialize_with = "de::number_or_zero")]
    pub gas_weight: f64,
}

impl ProductionEvent {
    pub fn new(thickness: f64, width: f64, length: f64, quantity: i64, area: f64) -> Self {
        Self {
            id: None,
            date: None,
            machine: None,
            thickness,
            width,
            length,
            quantity,
            area,
            color: None,
            gas_weight: 0.0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_gas_weight(mut self, gas_weight: f64) -> Self {
        self.gas_weight = gas_weight;
        self
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

impl VariantAttributes for ProductionEvent {
    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn length(&self) -> Option<f64> {
        Some(self.length)
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// An outbound shipment (removes finished goods).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentEvent {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "tarih", deserialize_with = "de::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "musteri", deserialize_with = "de::optional_text")]
    pub customer: Option<String>,
    #[serde(alias = "kalinlik", deserialize_with = "de::number")]
    pub thickness: f64,
    #[serde(alias = "en", deserialize_with = "de::number")]
    pub width: f64,
    /// Absent for products shipped by the metre.
    #[serde(default, alias = "boy", deserialize_with = "de::optional_number")]
    pub length: Option<f64>,
    #[serde(alias = "adet", deserialize_with = "de::integer")]
    pub quantity: i64,
    #[serde(alias = "square_meter", alias = "metrekare", deserialize_with = "de::number")]
    pub area: f64,
    #[serde(default, alias = "renk", deserialize_with = "de::optional_text")]
    pub color: Option<String>,
}

impl ShipmentEvent {
    pub fn new(thickness: f64, width: f64, length: Option<f64>, quantity: i64, area: f64) -> Self {
        Self {
            id: None,
            date: None,
            customer: None,
            thickness,
            width,
            length,
            quantity,
            area,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }
}

impl VariantAttributes for ShipmentEvent {
    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn length(&self) -> Option<f64> {
        self.length
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// A cut taken from finished stock.
///
/// `quantity` is what the cut produced; only `used_quantity`/`used_area`
/// reduce the stock of the source variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutUsageEvent {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "tarih", deserialize_with = "de::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(alias = "kalinlik", deserialize_with = "de::number")]
    pub thickness: f64,
    #[serde(alias = "en", deserialize_with = "de::number")]
    pub width: f64,
    #[serde(alias = "boy", deserialize_with = "de::number")]
    pub length: f64,
    #[serde(default, alias = "renk", deserialize_with = "de::optional_text")]
    pub color: Option<String>,
    #[serde(default, alias = "adet", deserialize_with = "de::integer")]
    pub quantity: i64,
    #[serde(alias = "kullanilan", deserialize_with = "de::integer")]
    pub used_quantity: i64,
    /// Cut documents written before area tracking carry no used area.
    #[serde(default, alias = "kullanilan_metrekare", deserialize_with = "de::number_or_zero")]
    pub used_area: f64,
}

impl CutUsageEvent {
    pub fn new(
        thickness: f64,
        width: f64,
        length: f64,
        used_quantity: i64,
        used_area: f64,
    ) -> Self {
        Self {
            id: None,
            date: None,
            thickness,
            width,
            length,
            color: None,
            quantity: 0,
            used_quantity,
            used_area,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_produced(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
}

impl VariantAttributes for CutUsageEvent {
    fn thickness(&self) -> f64 {
        self.thickness
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn length(&self) -> Option<f64> {
        Some(self.length)
    }

    fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// A raw-material purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Case-insensitive material name.
    #[serde(alias = "malzeme_adi")]
    pub name: String,
    #[serde(alias = "miktar", deserialize_with = "de::number")]
    pub quantity_purchased: f64,
    #[serde(default = "default_unit", alias = "birim")]
    pub unit: String,
}

fn default_unit() -> String {
    "kg".to_string()
}

impl MaterialEntry {
    pub fn new(name: impl Into<String>, quantity_purchased: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity_purchased,
            unit: default_unit(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// A gas delivery logged on its own form; only counted by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "tarih", deserialize_with = "de::optional_date")]
    pub date: Option<NaiveDate>,
    /// Total gas in kg.
    #[serde(alias = "toplam_gaz", deserialize_with = "de::number")]
    pub total_gas: f64,
    #[serde(default, alias = "notlar")]
    pub notes: String,
}
