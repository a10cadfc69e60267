// Turns a raw search string into a structured FilterSpec.
//
// Each extraction rule is an independent pure function over the full query
// text; rules are not mutually exclusive, so a single query can populate
// several fields at once ("red Honda 2020 under 150000 price, 100cc").
// A non-empty query from which no rule extracts anything compiles to `None`
// and is defined to match zero records.

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::config::Vocabulary;
use crate::models::FilterSpec;

// Number next to "mileage", in either order. The first non-empty captured
// group wins.
static MILEAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*mileage|mileage.*?(\d+)").unwrap());

// Number next to the token "cc", in either order.
static ENGINE_CC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*cc|cc.*?(\d+)").unwrap());

// Number next to "price", in either order.
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)price.*?(\d+)|(\d+)\s*price").unwrap());

// Any standalone 4-digit token starting 19xx or 20xx.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

/// Compiles `query` against the configured vocabularies.
///
/// Returns `None` when the query is blank or when no extraction rule fires
/// (the "no recognizable criterion" outcome). Never panics or errors for any
/// input string.
pub fn compile(query: &str, vocabulary: &Vocabulary) -> Option<FilterSpec> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let spec = FilterSpec {
        colors: extract_colors(query, &vocabulary.colors),
        max_mileage: extract_max_mileage(query),
        manufacture_years: extract_manufacture_years(query, Local::now().year()),
        companies: extract_companies(query, &vocabulary.companies),
        engine_cc: extract_engine_cc(query),
        price_inr: extract_price(query),
    };

    if spec.is_unconstrained() { None } else { Some(spec) }
}

/// All color vocabulary words appearing as whole words in the query,
/// case-folded. Collects every hit, not just the first.
pub fn extract_colors(query: &str, colors: &[String]) -> Option<HashSet<String>> {
    non_empty(match_vocabulary(query, colors))
}

/// All known company names appearing as whole words (multi-word names like
/// "Royal Enfield" match as a phrase), case-folded.
pub fn extract_companies(query: &str, companies: &[String]) -> Option<HashSet<String>> {
    non_empty(match_vocabulary(query, companies))
}

/// Inclusive mileage upper bound: "150 mileage" or "mileage 150".
pub fn extract_max_mileage(query: &str) -> Option<u32> {
    first_numeric_group(&MILEAGE_RE, query)
}

/// Exact engine displacement: "100cc" or "cc 100".
pub fn extract_engine_cc(query: &str) -> Option<u32> {
    first_numeric_group(&ENGINE_CC_RE, query)
}

/// Inclusive price upper bound: "price 150000" or "150000 price".
pub fn extract_price(query: &str) -> Option<u64> {
    let caps = PRICE_RE.captures(query)?;
    let group = caps.get(1).or_else(|| caps.get(2))?;
    group.as_str().parse::<u64>().ok()
}

/// All plausible 4-digit years in the query. When none is present but the
/// literal phrase "this year" is, the current calendar year is the sole
/// candidate. `current_year` is injected so the fallback is testable.
pub fn extract_manufacture_years(query: &str, current_year: i32) -> Option<HashSet<i32>> {
    let years: HashSet<i32> = YEAR_RE
        .find_iter(query)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .collect();
    if !years.is_empty() {
        return Some(years);
    }
    if query.to_lowercase().contains("this year") {
        return Some(HashSet::from([current_year]));
    }
    None
}

// Whole-word, case-insensitive vocabulary scan. The vocabulary is data, not
// code, so a pattern is built per entry; `regex::escape` keeps arbitrary
// configured names safe to embed.
fn match_vocabulary(query: &str, vocabulary: &[String]) -> HashSet<String> {
    vocabulary
        .iter()
        .filter(|word| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
            Regex::new(&pattern).map(|re| re.is_match(query)).unwrap_or(false)
        })
        .map(|word| word.to_lowercase())
        .collect()
}

fn first_numeric_group(re: &Regex, query: &str) -> Option<u32> {
    let caps = re.captures(query)?;
    let group = caps.get(1).or_else(|| caps.get(2))?;
    group.as_str().parse::<u32>().ok()
}

fn non_empty(set: HashSet<String>) -> Option<HashSet<String>> {
    if set.is_empty() { None } else { Some(set) }
}
