// Applies a compiled FilterSpec to the in-memory catalog.

use crate::models::{FilterSpec, VehicleRecord};

/// Returns the records satisfying every populated field of `spec` (logical
/// AND; absent fields impose no constraint). The output preserves catalog
/// order and never mutates a record.
pub fn apply(records: &[VehicleRecord], spec: &FilterSpec) -> Vec<VehicleRecord> {
    records
        .iter()
        .filter(|record| matches(record, spec))
        .cloned()
        .collect()
}

fn matches(record: &VehicleRecord, spec: &FilterSpec) -> bool {
    if let Some(colors) = &spec.colors {
        if !record.color.intersects(colors) {
            return false;
        }
    }

    if let Some(max_mileage) = spec.max_mileage {
        // Records whose mileage does not coerce to a number never match.
        match record.mileage.as_f64() {
            Some(value) if value <= f64::from(max_mileage) => {}
            _ => return false,
        }
    }

    if let Some(years) = &spec.manufacture_years {
        if !years.contains(&record.year) {
            return false;
        }
    }

    if let Some(companies) = &spec.companies {
        if !companies.contains(&record.company.to_lowercase()) {
            return false;
        }
    }

    // Displacement is an exact match, unlike the mileage/price thresholds.
    if let Some(engine_cc) = spec.engine_cc {
        if record.engine_cc != engine_cc {
            return false;
        }
    }

    if let Some(price_inr) = spec.price_inr {
        if record.price_inr > price_inr {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorField, Mileage, RecordId};
    use std::collections::HashSet;

    fn record(id: u64, company: &str, color: &str, year: i32, mileage: &str) -> VehicleRecord {
        VehicleRecord {
            id: RecordId::Number(id),
            company: company.to_string(),
            engine_cc: 100,
            price_inr: 80_000,
            year,
            mileage: Mileage::Text(mileage.to_string()),
            color: ColorField::One(color.to_string()),
        }
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn red_honda_matches_only_the_honda() {
        let catalog = vec![
            record(1, "Honda", "Red", 2020, "60"),
            record(2, "Yamaha", "Red", 2020, "60"),
        ];
        let spec = FilterSpec {
            colors: Some(set(&["red"])),
            companies: Some(set(&["honda"])),
            ..Default::default()
        };
        let out = apply(&catalog, &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, RecordId::Number(1));
    }

    #[test]
    fn mileage_bound_is_inclusive_and_coerces_strings() {
        let spec = FilterSpec {
            max_mileage: Some(150),
            ..Default::default()
        };
        assert_eq!(apply(&[record(1, "Hero", "Red", 2020, "140")], &spec).len(), 1);
        assert_eq!(apply(&[record(1, "Hero", "Red", 2020, "150")], &spec).len(), 1);
        assert!(apply(&[record(1, "Hero", "Red", 2020, "160")], &spec).is_empty());
    }

    #[test]
    fn malformed_mileage_never_matches_and_never_panics() {
        let spec = FilterSpec {
            max_mileage: Some(150),
            ..Default::default()
        };
        let catalog = vec![
            record(1, "Hero", "Red", 2020, "not-a-number"),
            record(2, "Hero", "Red", 2020, "140"),
        ];
        let out = apply(&catalog, &spec);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, RecordId::Number(2));
    }

    #[test]
    fn year_membership_is_exact_not_a_range() {
        let spec = FilterSpec {
            manufacture_years: Some(HashSet::from([2024])),
            ..Default::default()
        };
        assert_eq!(apply(&[record(1, "TVS", "Red", 2024, "50")], &spec).len(), 1);
        assert!(apply(&[record(1, "TVS", "Red", 2023, "50")], &spec).is_empty());
    }

    #[test]
    fn company_match_ignores_record_case() {
        let spec = FilterSpec {
            companies: Some(set(&["honda"])),
            ..Default::default()
        };
        assert_eq!(apply(&[record(1, "HONDA", "Red", 2020, "50")], &spec).len(), 1);
    }

    #[test]
    fn output_preserves_catalog_order() {
        let catalog = vec![
            record(3, "Honda", "Red", 2020, "50"),
            record(1, "Honda", "Blue", 2021, "50"),
            record(2, "Honda", "Red", 2022, "50"),
        ];
        let spec = FilterSpec {
            companies: Some(set(&["honda"])),
            ..Default::default()
        };
        let ids: Vec<_> = apply(&catalog, &spec).into_iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![RecordId::Number(3), RecordId::Number(1), RecordId::Number(2)]
        );
    }

    #[test]
    fn adding_a_constraint_never_grows_the_result() {
        let catalog = vec![
            record(1, "Honda", "Red", 2020, "60"),
            record(2, "Honda", "Blue", 2021, "40"),
            record(3, "Yamaha", "Red", 2020, "80"),
        ];
        let loose = FilterSpec {
            companies: Some(set(&["honda", "yamaha"])),
            ..Default::default()
        };
        let tight = FilterSpec {
            colors: Some(set(&["red"])),
            ..loose.clone()
        };
        assert!(apply(&catalog, &tight).len() <= apply(&catalog, &loose).len());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let spec = FilterSpec {
            engine_cc: Some(100),
            ..Default::default()
        };
        assert!(apply(&[], &spec).is_empty());
    }

    #[test]
    fn unconstrained_spec_returns_the_full_sequence() {
        let catalog = vec![
            record(1, "Honda", "Red", 2020, "60"),
            record(2, "Yamaha", "Blue", 2021, "40"),
        ];
        let out = apply(&catalog, &FilterSpec::default());
        assert_eq!(out.len(), catalog.len());
    }
}
