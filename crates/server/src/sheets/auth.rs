//! Service-account JWT exchange for a Sheets API bearer token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::{SheetsError, truncate};
use super::types::TokenResponse;

/// Scopes requested in the JWT grant.
const SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive.file";

/// Token lifetime requested in the grant.
const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Sign the JWT grant and exchange it for a bearer token.
///
/// One round trip, no token caching: every catalog fetch re-authenticates.
///
/// # Errors
///
/// `SheetsError::Auth` when the key is unusable or the grant is rejected;
/// `SheetsError::Connectivity` when the token endpoint is unreachable.
pub(super) async fn fetch_access_token(
    client: &reqwest::Client,
    token_url: &str,
    email: &str,
    private_key: &SecretString,
) -> Result<String, SheetsError> {
    let key = EncodingKey::from_rsa_pem(private_key.expose_secret().as_bytes())
        .map_err(|e| SheetsError::Auth(format!("invalid service-account key: {e}")))?;

    let iat = Utc::now().timestamp();
    let claims = Claims {
        iss: email,
        scope: SCOPES,
        aud: token_url,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| SheetsError::Auth(format!("failed to sign token grant: {e}")))?;

    let response = client
        .post(token_url)
        .form(&[
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await
        .map_err(SheetsError::from_transport)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(SheetsError::from_transport)?;

    if !status.is_success() {
        // The token endpoint answers 400/401/403 for bad keys, expired
        // clocks and unknown service accounts alike.
        return Err(SheetsError::Auth(format!(
            "token endpoint rejected the grant ({status}): {}",
            truncate(&body)
        )));
    }

    let token: TokenResponse = serde_json::from_str(&body)?;
    Ok(token.access_token)
}
