//! Finished-goods variant identity.
//!
//! A variant is "the same product" for stock purposes: equal thickness, width,
//! length and color. Records store these attributes loosely (numbers or
//! strings, optional color, optional length), so grouping goes through
//! [`VariantKeyBuilder`], which turns them into a normalized [`VariantKey`].

use serde::Serialize;

use packstock_core::ValueObject;

use crate::config::{MAX_DIMENSION_PRECISION, ReconciliationConfig};

/// A dimension normalized to a fixed number of decimal places.
///
/// Stored as a scaled integer so it can be hashed and compared exactly;
/// `12`, `12.0` and `12.0004` (at precision 3) are the same dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dimension {
    scaled: i64,
    precision: u32,
}

impl Dimension {
    /// Normalize `value` to `precision` decimal places.
    ///
    /// Total over all `f64`: NaN maps to zero and infinities saturate.
    pub fn normalize(value: f64, precision: u32) -> Self {
        let scale = 10f64.powi(precision as i32);
        // `as` saturates and maps NaN to 0.
        let scaled = (value * scale).round() as i64;
        Self { scaled, precision }
    }

    pub fn scaled(&self) -> i64 {
        self.scaled
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn value(&self) -> f64 {
        self.scaled as f64 / 10f64.powi(self.precision as i32)
    }
}

impl core::fmt::Display for Dimension {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Dimension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Canonical identity of a finished-goods variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariantKey {
    thickness: Dimension,
    width: Dimension,
    length: Dimension,
    color: String,
}

impl ValueObject for VariantKey {}

impl VariantKey {
    pub fn thickness(&self) -> Dimension {
        self.thickness
    }

    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn length(&self) -> Dimension {
        self.length
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

impl core::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}x{}x{} {}",
            self.thickness, self.width, self.length, self.color
        )
    }
}

/// Anything that names a variant: production, shipment and cut records.
pub trait VariantAttributes {
    fn thickness(&self) -> f64;
    fn width(&self) -> f64;
    /// `None` for products sold by the metre rather than cut to length.
    fn length(&self) -> Option<f64>;
    fn color(&self) -> Option<&str>;
}

/// Builds [`VariantKey`]s with one normalization policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantKeyBuilder {
    precision: u32,
    default_color: String,
}

impl Default for VariantKeyBuilder {
    fn default() -> Self {
        Self::from_config(&ReconciliationConfig::default())
    }
}

impl VariantKeyBuilder {
    /// `precision` is clamped to [`MAX_DIMENSION_PRECISION`] decimal places.
    pub fn new(precision: u32, default_color: impl Into<String>) -> Self {
        Self {
            precision: precision.min(MAX_DIMENSION_PRECISION),
            default_color: default_color.into(),
        }
    }

    pub fn from_config(config: &ReconciliationConfig) -> Self {
        Self::new(config.dimension_precision, config.default_color.clone())
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    /// Key a variant from raw attributes.
    ///
    /// Absent length keys as `0`; absent or blank color keys as the default
    /// color. Color is otherwise kept as written (trimmed, case preserved).
    pub fn key(
        &self,
        thickness: f64,
        width: f64,
        length: Option<f64>,
        color: Option<&str>,
    ) -> VariantKey {
        VariantKey {
            thickness: Dimension::normalize(thickness, self.precision),
            width: Dimension::normalize(width, self.precision),
            length: Dimension::normalize(length.unwrap_or(0.0), self.precision),
            color: self.resolve_color(color).to_string(),
        }
    }

    pub fn key_for(&self, record: &impl VariantAttributes) -> VariantKey {
        self.key(
            record.thickness(),
            record.width(),
            record.length(),
            record.color(),
        )
    }

    /// The color a record is shown and keyed under.
    pub fn resolve_color<'a>(&'a self, color: Option<&'a str>) -> &'a str {
        match color.map(str::trim) {
            Some(c) if !c.is_empty() => c,
            _ => &self.default_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_in_different_notation_share_a_key() {
        let b = VariantKeyBuilder::default();
        assert_eq!(
            b.key(12.0, 100.0, Some(200.0), Some("Mavi")),
            b.key(12.000_000_1, 100.0, Some(200.0), Some("Mavi"))
        );
        assert_eq!(
            b.key(0.1 + 0.2, 1.0, None, None),
            b.key(0.3, 1.0, None, None)
        );
    }

    #[test]
    fn absent_length_is_zero() {
        let b = VariantKeyBuilder::default();
        let key = b.key(2.0, 100.0, None, None);
        assert_eq!(key, b.key(2.0, 100.0, Some(0.0), None));
        assert_eq!(key.length().scaled(), 0);
    }

    #[test]
    fn absent_blank_and_normal_color_share_a_key() {
        let b = VariantKeyBuilder::default();
        let absent = b.key(2.0, 100.0, Some(200.0), None);
        assert_eq!(absent, b.key(2.0, 100.0, Some(200.0), Some("Normal")));
        assert_eq!(absent, b.key(2.0, 100.0, Some(200.0), Some("  ")));
        assert_eq!(absent.color(), "Normal");
    }

    #[test]
    fn color_is_trimmed_but_case_sensitive() {
        let b = VariantKeyBuilder::default();
        assert_eq!(
            b.key(2.0, 100.0, Some(200.0), Some(" Mavi ")),
            b.key(2.0, 100.0, Some(200.0), Some("Mavi"))
        );
        assert_ne!(
            b.key(2.0, 100.0, Some(200.0), Some("mavi")),
            b.key(2.0, 100.0, Some(200.0), Some("Mavi"))
        );
    }

    #[test]
    fn distinct_dimensions_stay_distinct() {
        let b = VariantKeyBuilder::default();
        assert_ne!(
            b.key(2.0, 100.0, Some(200.0), None),
            b.key(2.0, 100.0, Some(200.5), None)
        );
    }

    #[test]
    fn non_finite_inputs_still_produce_a_key() {
        let b = VariantKeyBuilder::default();
        let key = b.key(f64::NAN, f64::INFINITY, Some(f64::NEG_INFINITY), None);
        assert_eq!(key.thickness().scaled(), 0);
        assert_eq!(key.width().scaled(), i64::MAX);
        assert_eq!(key.length().scaled(), i64::MIN);
    }

    #[test]
    fn coarser_precision_merges_nearby_dimensions() {
        let b = VariantKeyBuilder::new(0, "Normal");
        assert_eq!(
            b.key(2.4, 100.0, Some(200.0), None),
            b.key(2.0, 100.0, Some(200.0), None)
        );
    }

    #[test]
    fn excessive_precision_is_clamped() {
        let b = VariantKeyBuilder::new(30, "Normal");
        let thin = b.key(2.0, 100.0, Some(200.0), None);
        let thick = b.key(3.0, 100.0, Some(200.0), None);
        assert_ne!(thin, thick);
        assert_eq!(thin.thickness().precision(), MAX_DIMENSION_PRECISION);
        assert_eq!(thin.thickness().value(), 2.0);
    }

    #[test]
    fn display_is_human_readable() {
        let b = VariantKeyBuilder::default();
        assert_eq!(
            b.key(2.0, 100.0, Some(200.5), Some("Mavi")).to_string(),
            "2x100x200.5 Mavi"
        );
    }
}
