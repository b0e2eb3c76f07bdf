use reqwest::StatusCode;
use serde::Deserialize;

use super::client::{log_request, log_response, mask_secret};
use super::error::ApiError;
use crate::config::ApiConfig;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Form body for the client-credentials grant.
pub fn token_form(config: &ApiConfig) -> Vec<(&'static str, String)> {
    let mut form = vec![("grant_type", "client_credentials".to_string())];
    if let Some(scope) = &config.token_scope {
        form.push(("scope", scope.clone()));
    }
    form
}

/// Exchange the configured client id/secret for a bearer token.
///
/// Any answer other than HTTP 200 with a non-empty `access_token` is an
/// error; there is no retry.
pub async fn fetch_bearer_token(client: &reqwest::Client, config: &ApiConfig) -> Result<String, ApiError> {
    let url = config.token_url();
    let form = token_form(config);

    let masked_auth = format!("Basic {}:{}", config.client_id, mask_secret(&config.client_secret));
    log_request(
        "POST",
        &url,
        &[],
        &[("Content-Type", "application/x-www-form-urlencoded"), ("Authorization", masked_auth.as_str())],
        &form,
    );
    tracing::debug!(%url, "Requesting bearer token");

    let response = client
        .post(&url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    log_response(status, &body);

    if status != StatusCode::OK {
        tracing::debug!(%status, "Token request rejected");
        return Err(ApiError::TokenRequest { status, body });
    }

    let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse {
        endpoint: url.clone(),
        reason: e.to_string(),
    })?;

    match parsed.access_token.map(|t| t.trim().to_string()) {
        Some(token) if !token.is_empty() => {
            tracing::info!("Token successfully acquired");
            Ok(token)
        }
        _ => Err(ApiError::MissingAccessToken { body }),
    }
}
