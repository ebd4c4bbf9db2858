//! Cookie-token deduplicated view counting.
//!
//! A product view is counted at most once per client within the token
//! validity window. The token is an opaque signed credential the client
//! holds: it embeds the product id and expiry and is validated
//! statelessly, so the server keeps no per-client state. This is a
//! deduplication gate, not a precise unique-visitor counter: two
//! concurrent first views from one client may both count.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use pricewatch_commerce::ids::ProductId;
use pricewatch_commerce::CompareError;
use pricewatch_store::CatalogStore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

/// Why an incoming token was rejected. Rejection is not a request
/// failure: the view counts and a fresh token is minted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("bad signature")]
    BadSignature,

    #[error("token expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("token is scoped to product {0}")]
    WrongProduct(ProductId),
}

/// Decoded claims of a view token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToken {
    /// Product the token is scoped to.
    pub product_id: ProductId,
    /// Instant after which the token no longer suppresses counting.
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates signed view tokens.
///
/// Wire format: `v1.<base64url(product_id.expiry_unix)>.<hex sha256>`,
/// where the digest covers the signing key and the payload.
#[derive(Clone)]
pub struct ViewTokenIssuer {
    key: Vec<u8>,
    ttl: Duration,
}

impl ViewTokenIssuer {
    /// Create an issuer with the given signing key and validity window.
    pub fn new(key: impl Into<Vec<u8>>, ttl: std::time::Duration) -> Self {
        Self {
            key: key.into(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(24)),
        }
    }

    fn sign(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.key);
        hasher.update(b".");
        hasher.update(payload.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Mint a token scoped to `product_id`, valid for the configured
    /// window starting at `now`.
    pub fn issue(&self, product_id: ProductId, now: DateTime<Utc>) -> String {
        let expires_at = now + self.ttl;
        let payload = format!("{}.{}", product_id.value(), expires_at.timestamp());
        let sig = self.sign(&payload);
        format!("v1.{}.{}", URL_SAFE_NO_PAD.encode(&payload), sig)
    }

    /// Validate a token against a product scope and the current time.
    pub fn validate(
        &self,
        token: &str,
        product_id: ProductId,
        now: DateTime<Utc>,
    ) -> Result<ViewToken, TokenError> {
        let mut parts = token.splitn(3, '.');
        let (version, payload_b64, sig) = match (parts.next(), parts.next(), parts.next()) {
            (Some(v), Some(p), Some(s)) => (v, p, s),
            _ => return Err(TokenError::Malformed),
        };
        if version != "v1" {
            return Err(TokenError::Malformed);
        }
        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::Malformed)?;
        let payload = String::from_utf8(payload_bytes).map_err(|_| TokenError::Malformed)?;

        if self.sign(&payload) != sig {
            return Err(TokenError::BadSignature);
        }

        let (pid_str, exp_str) = payload.split_once('.').ok_or(TokenError::Malformed)?;
        let pid: u64 = pid_str.parse().map_err(|_| TokenError::Malformed)?;
        let exp_ts: i64 = exp_str.parse().map_err(|_| TokenError::Malformed)?;
        let expires_at = Utc
            .timestamp_opt(exp_ts, 0)
            .single()
            .ok_or(TokenError::Malformed)?;

        let claims = ViewToken {
            product_id: ProductId::new(pid),
            expires_at,
        };
        if claims.product_id != product_id {
            return Err(TokenError::WrongProduct(claims.product_id));
        }
        if expires_at <= now {
            return Err(TokenError::Expired(expires_at));
        }
        Ok(claims)
    }
}

/// Result of a view request: the token the client should hold, and
/// whether this request actually incremented the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewReceipt {
    /// Token to set on the client.
    pub token: String,
    /// True when the counter was incremented by this call.
    pub counted: bool,
}

/// The deduplication gate in front of the store's view counter.
pub struct ViewCounter {
    store: Arc<dyn CatalogStore>,
    issuer: ViewTokenIssuer,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn CatalogStore>, issuer: ViewTokenIssuer) -> Self {
        Self { store, issuer }
    }

    /// Record a view. A valid incoming token for this product suppresses
    /// the increment and is echoed back; anything else (absent, expired,
    /// tampered, wrong product) counts the view and mints a fresh token.
    pub async fn record_view(
        &self,
        product_id: ProductId,
        incoming: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ViewReceipt, CompareError> {
        if let Some(raw) = incoming {
            match self.issuer.validate(raw, product_id, now) {
                Ok(_) => {
                    return Ok(ViewReceipt {
                        token: raw.to_string(),
                        counted: false,
                    });
                }
                Err(reason) => {
                    tracing::debug!(
                        product_id = product_id.value(),
                        %reason,
                        "view token rejected, re-counting"
                    );
                }
            }
        }

        self.store.record_view(product_id, now).await?;
        Ok(ViewReceipt {
            token: self.issuer.issue(product_id, now),
            counted: true,
        })
    }
}
