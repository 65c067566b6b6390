//! Signed bearer token minting and verification (HS256).
//!
//! # Design
//! - The codec owns `exp`, `iss`, and `aud`; application claims never override them.
//! - Expiry is truncated to whole seconds so the returned instant equals `exp`.
//! - Verification has zero leeway and requires `exp`, `iss`, and `aud`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::claims::{ClaimSet, REGISTERED_CLAIMS};
use crate::decode::claims_from_payload;
use crate::error::{RejectionReason, TokenError, TokenResult};
use crate::signing::SigningConfig;

/// Lifetime of tokens issued by the login endpoint.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Freshly minted token and the instant it stops being valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintedToken {
    /// Compact `header.payload.signature` encoding.
    pub token: String,
    /// Expiration instant, identical to the token's `exp` claim.
    pub expires_at: DateTime<Utc>,
}

/// Mints and verifies tokens with an injected [`SigningConfig`].
#[derive(Clone, Debug)]
pub struct TokenCodec {
    config: SigningConfig,
}

impl TokenCodec {
    /// Build a codec around `config`; configuration is validated on use.
    #[must_use]
    pub const fn new(config: SigningConfig) -> Self {
        Self { config }
    }

    /// Mint a token carrying `claims` that expires `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] when issuer, audience, or key is unset,
    /// [`TokenError::InvalidLifetime`] for a non-positive `ttl`, and
    /// [`TokenError::Encode`] if signing fails.
    pub fn mint(&self, claims: &ClaimSet, ttl: Duration) -> TokenResult<MintedToken> {
        self.mint_at(claims, ttl, Utc::now())
    }

    pub(crate) fn mint_at(
        &self,
        claims: &ClaimSet,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> TokenResult<MintedToken> {
        let signing = self.config.resolve()?;
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidLifetime);
        }
        let expires_at = now
            .checked_add_signed(ttl)
            .and_then(|instant| DateTime::from_timestamp(instant.timestamp(), 0))
            .ok_or(TokenError::InvalidLifetime)?;

        let mut payload = Map::new();
        for (name, values) in claims.grouped() {
            if REGISTERED_CLAIMS.contains(&name.as_str()) {
                continue;
            }
            let value = match values.as_slice() {
                [single] => Value::String(single.clone()),
                many => Value::Array(many.iter().cloned().map(Value::String).collect()),
            };
            payload.insert(name.clone(), value);
        }
        payload.insert("exp".to_string(), Value::from(expires_at.timestamp()));
        payload.insert("iss".to_string(), Value::from(signing.issuer));
        payload.insert("aud".to_string(), Value::from(signing.audience));

        let token = jsonwebtoken::encode(
            &Header::new(SIGNING_ALGORITHM),
            &payload,
            &EncodingKey::from_secret(signing.key),
        )
        .map_err(|source| TokenError::Encode { source })?;

        Ok(MintedToken { token, expires_at })
    }

    /// Verify signature, issuer, audience, and expiry, returning the token's claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] when the codec is not configured and
    /// [`TokenError::Rejected`] when any check fails.
    pub fn verify(&self, token: &str) -> TokenResult<ClaimSet> {
        let signing = self.config.resolve()?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[signing.issuer]);
        validation.set_audience(&[signing.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let data = jsonwebtoken::decode::<Map<String, Value>>(
            token,
            &DecodingKey::from_secret(signing.key),
            &validation,
        )
        .map_err(|source| TokenError::Rejected {
            reason: RejectionReason::from_kind(source.kind()),
            source,
        })?;

        Ok(claims_from_payload(data.claims))
    }

    /// Whether `token` passes [`TokenCodec::verify`].
    #[must_use]
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}
