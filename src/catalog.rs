// Fetches the vehicle catalog from the configured endpoint.
//
// The provider's failure mode is opaque: whatever goes wrong (network,
// status, payload shape), the session starts with zero records and the user
// sees the ordinary "no matching data" surface. Failures are logged, never
// surfaced as a distinct error state.

use reqwest::Client;
use thiserror::Error;

use crate::models::VehicleRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog payload was not a vehicle list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches and decodes the full catalog from `url`.
pub async fn fetch_catalog(client: &Client, url: &str) -> Result<Vec<VehicleRecord>, CatalogError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let records: Vec<VehicleRecord> = serde_json::from_str(&body)?;
    Ok(records)
}

/// Fetch wrapper used at session start: any retrieval error degrades to an
/// empty catalog.
pub async fn load_or_empty(client: &Client, url: &str) -> Vec<VehicleRecord> {
    match fetch_catalog(client, url).await {
        Ok(records) => {
            tracing::info!(count = records.len(), url, "Catalog loaded");
            records
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "Catalog fetch failed, starting with an empty catalog");
            Vec::new()
        }
    }
}
