// Data structures shared across the catalog, search core, and API layer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// One catalog entry, as delivered by the catalog endpoint.
// Field names match the JSON keys the provider uses.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    // Ids are opaque: the provider sometimes sends numbers, sometimes strings,
    // and they are not guaranteed stable across refreshes.
    pub id: RecordId,
    pub company: String,
    #[serde(rename = "engineCC")] // Match JSON key
    pub engine_cc: u32,
    #[serde(rename = "priceINR")] // Match JSON key
    pub price_inr: u64,
    pub year: i32,
    pub mileage: Mileage,
    pub color: ColorField,
}

// Opaque record identifier (number or string in the wire format).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

// Fuel efficiency figure. The provider is inconsistent here: some records
// carry a number, others a numeric string. Comparison always goes through
// `as_f64`; values that do not coerce are treated as non-matching.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum Mileage {
    Number(f64),
    Text(String),
}

impl Mileage {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Mileage::Number(n) => Some(*n),
            Mileage::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for Mileage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mileage::Number(n) => write!(f, "{}", n),
            Mileage::Text(s) => write!(f, "{}", s),
        }
    }
}

// A vehicle is sold either in a single color or in several color options.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ColorField {
    One(String),
    Many(Vec<String>),
}

impl ColorField {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            ColorField::One(c) => std::slice::from_ref(c),
            ColorField::Many(cs) => cs.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    // True if any of the record's colors, case-folded, is in the given set.
    pub fn intersects(&self, wanted: &HashSet<String>) -> bool {
        self.names().any(|c| wanted.contains(&c.to_lowercase()))
    }

    pub fn joined(&self) -> String {
        match self {
            ColorField::One(c) => c.clone(),
            ColorField::Many(cs) => cs.join(", "),
        }
    }
}

// The compiled form of a free-text query. Every field is optional; an absent
// field imposes no constraint on that dimension. The compiler returns `None`
// instead of an all-empty spec, so a populated `FilterSpec` always carries at
// least one criterion.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub colors: Option<HashSet<String>>,
    pub max_mileage: Option<u32>,
    pub manufacture_years: Option<HashSet<i32>>,
    pub companies: Option<HashSet<String>>,
    pub engine_cc: Option<u32>,
    pub price_inr: Option<u64>,
}

impl FilterSpec {
    pub fn is_unconstrained(&self) -> bool {
        self.colors.is_none()
            && self.max_mileage.is_none()
            && self.manufacture_years.is_none()
            && self.companies.is_none()
            && self.engine_cc.is_none()
            && self.price_inr.is_none()
    }
}

// The page window the presentation layer renders: the rows for the current
// page plus enough metadata to draw the pager.
#[derive(Debug, Serialize, Clone)]
pub struct ResultView {
    pub rows: Vec<VehicleRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_with_numeric_and_string_shapes() {
        let json = r#"{
            "id": 7,
            "company": "Honda",
            "engineCC": 110,
            "priceINR": 75000,
            "year": 2021,
            "mileage": "60",
            "color": ["Red", "Black"]
        }"#;
        let record: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::Number(7));
        assert_eq!(record.engine_cc, 110);
        assert_eq!(record.mileage.as_f64(), Some(60.0));
        assert_eq!(record.color.joined(), "Red, Black");
    }

    #[test]
    fn mileage_coercion_tolerates_garbage() {
        assert_eq!(Mileage::Text("45.3".into()).as_f64(), Some(45.3));
        assert_eq!(Mileage::Text(" 45 ".into()).as_f64(), Some(45.0));
        assert_eq!(Mileage::Text("n/a".into()).as_f64(), None);
    }

    #[test]
    fn color_intersection_is_case_insensitive_on_the_record_side() {
        let field = ColorField::Many(vec!["RED".into(), "Silver".into()]);
        let wanted: HashSet<String> = ["red".to_string()].into_iter().collect();
        assert!(field.intersects(&wanted));

        let wanted: HashSet<String> = ["green".to_string()].into_iter().collect();
        assert!(!field.intersects(&wanted));
    }

    #[test]
    fn default_spec_is_unconstrained() {
        assert!(FilterSpec::default().is_unconstrained());
        let spec = FilterSpec {
            engine_cc: Some(100),
            ..Default::default()
        };
        assert!(!spec.is_unconstrained());
    }
}
