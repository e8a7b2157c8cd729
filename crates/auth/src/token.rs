//! Signed access token issuance and verification (HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use watchpost_core::RoleId;

use crate::claims::AccessClaims;
use crate::error::AuthError;
use crate::scope::ScopeDecision;
use crate::store::UserRecord;

/// Fixed token lifetime. No refresh mechanism exists; expiry forces re-login.
pub fn token_ttl() -> Duration {
    Duration::hours(24)
}

/// HS256 codec around the process-wide signing secret.
///
/// The secret is loaded once at startup; a missing secret is a fatal
/// configuration error handled by the binary, never deferred to first use.
/// Issuing and verifying are pure CPU work; no state, nothing persisted.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Sign a token for `user` under the given scope decision.
    pub fn issue(
        &self,
        user: &UserRecord,
        role_id: RoleId,
        scope: &ScopeDecision,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = AccessClaims::for_scope(user, role_id, scope, issued_at, token_ttl());
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Verify signature and expiry, then interpret the payload.
    ///
    /// Signature/expiry failures are [`AuthError::InvalidToken`]; a payload
    /// that verified but lacks the required identity claims is
    /// [`AuthError::MalformedToken`]. The two stages stay distinct because
    /// the gate reports them differently.
    pub fn decode(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = jsonwebtoken::decode::<serde_json::Value>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;

        serde_json::from_value(data.claims).map_err(|_| AuthError::MalformedToken)
    }
}
