//! The login flow: credentials in, signed token out.

use std::sync::Arc;

use chrono::Utc;

use crate::error::AuthError;
use crate::password;
use crate::resolver::resolve_role;
use crate::scope::classify;
use crate::store::{CredentialStore, UserRecord};
use crate::token::JwtCodec;

/// Successful login: the signed token and the authenticated user.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserRecord,
}

/// Authenticates credential pairs and mints access tokens.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    codec: Arc<JwtCodec>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<JwtCodec>) -> Self {
        Self { store, codec }
    }

    /// Authenticate `email`/`password` and issue a scoped access token.
    ///
    /// Step order matters for failure-mode parity:
    /// 1. user lookup by email; absence collapses into
    ///    [`AuthError::InvalidCredentials`] (no account enumeration);
    /// 2. role resolution; a roleless or multi-role account fails fast as
    ///    malformed account state;
    /// 3. password verification; mismatch is the same
    ///    [`AuthError::InvalidCredentials`] as an unknown email;
    /// 4. scope classification; `Missing*` failures stay distinct, they are
    ///    configuration errors, deliberately not masked;
    /// 5. token issuance.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let assignment = resolve_role(self.store.as_ref(), user.id).await?;

        if !password::verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let scope = classify(self.store.as_ref(), assignment.role, user.id).await?;

        let token = self
            .codec
            .issue(&user, assignment.role_id, &scope, Utc::now())?;

        tracing::debug!(
            user_id = %user.id,
            role = %assignment.role,
            scope = ?scope.kind(),
            "issued access token"
        );

        Ok(LoginOutcome { token, user })
    }
}
