use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use yansi::Paint;

use super::client::{log_request, log_response, mask_secret};
use super::error::ApiError;
use crate::config::ApiConfig;
use crate::models::SearchResult;

/// Query parameters for one product search.
pub fn search_params(config: &ApiConfig, term: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("filter.term", term.to_string()),
        ("filter.locationId", config.location_id.clone()),
        ("filter.limit", config.search_limit.to_string()),
    ];
    if let Some(fulfillment) = &config.fulfillment {
        params.push(("filter.fulfillment", fulfillment.clone()));
    }
    if let Some(chain) = &config.chain {
        params.push(("filter.chain", chain.clone()));
    }
    params
}

/// Search products by free-text term at the configured store.
///
/// A non-200 answer is reported on stderr and yields `Ok(None)` so the
/// caller can skip the item. Transport and decoding failures are errors.
pub async fn search_products(
    client: &reqwest::Client,
    config: &ApiConfig,
    token: &str,
    term: &str,
) -> Result<Option<SearchResult>, ApiError> {
    let url = config.products_url();
    let params = search_params(config, term);

    let masked_auth = format!("Bearer {}", mask_secret(token));
    log_request(
        "GET",
        &url,
        &params,
        &[("Accept", "application/json"), ("Authorization", masked_auth.as_str())],
        &[],
    );

    let response = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .bearer_auth(token)
        .query(&params)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    log_response(status, &body);

    if status != StatusCode::OK {
        tracing::warn!(%status, term, %body, "Product search failed");
        eprintln!(
            "{} '{}' ({})",
            Paint::new("Product search failed for").red(),
            term,
            status.as_u16()
        );
        return Ok(None);
    }

    let result: SearchResult = serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
        endpoint: url.clone(),
        reason: e.to_string(),
    })?;
    tracing::debug!(term, count = result.data.len(), "Product search returned");
    Ok(Some(result))
}
