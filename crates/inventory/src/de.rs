//! Lenient field decoders for store documents.
//!
//! The shipment collection keeps dimensions as text and the entry forms post
//! empty strings for untouched optional inputs, so numeric fields accept
//! either JSON numbers or numeric strings.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntegerOrText {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn parse_number<E: serde::de::Error>(text: &str) -> Result<Option<f64>, E> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| E::custom(format!("expected a number, found {text:?}")))
}

fn whole<E: serde::de::Error>(value: f64) -> Result<i64, E> {
    if value.fract() == 0.0 && value.is_finite() {
        Ok(value as i64)
    } else {
        Err(E::custom(format!("expected a whole number, found {value}")))
    }
}

/// Required number; numeric strings accepted.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(t) => parse_number::<D::Error>(&t)?
            .ok_or_else(|| D::Error::custom("expected a number, found an empty string")),
    }
}

/// Optional number; `null` and empty strings are `None`.
pub fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(t)) => parse_number(&t),
    }
}

/// Optional number where absence means zero (e.g. gas weight on a run that used none).
pub fn number_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(optional_number(deserializer)?.unwrap_or(0.0))
}

/// Required whole number; `50`, `50.0` and `"50"` are accepted.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match IntegerOrText::deserialize(deserializer)? {
        IntegerOrText::Integer(i) => Ok(i),
        IntegerOrText::Float(f) => whole(f),
        IntegerOrText::Text(t) => match parse_number::<D::Error>(&t)? {
            Some(f) => whole(f),
            None => Err(D::Error::custom("expected a whole number, found an empty string")),
        },
    }
}

/// Optional text; `null` and blank strings are `None`.
pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Optional `YYYY-MM-DD` date; `null` and blank strings are `None`.
pub fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    match optional_text(deserializer)? {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid date {text:?}: {e}"))),
    }
}
