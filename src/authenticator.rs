// Copyright 2026 Keygate Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Login flow composing the store, verifier, and issuer.
//!
//! Unknown principal and wrong secret collapse to the same
//! `AuthorizationDenied` so a caller cannot distinguish which one failed.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::core::constants::credential;
use crate::core::errors::AuthError;
use crate::core::principal::AuthenticatedContext;
use crate::credential::CredentialVerifier;
use crate::store::PrincipalStore;
use crate::token::issuer::TokenIssuer;
use crate::token::validator::TokenValidator;

/// Successful login result: the bearer token plus the principal it names.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub principal: String,
    pub roles: Vec<String>,
}

pub struct Authenticator {
    store: Arc<dyn PrincipalStore>,
    issuer: TokenIssuer,
    validator: TokenValidator,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn PrincipalStore>,
        issuer: TokenIssuer,
        validator: TokenValidator,
    ) -> Self {
        Self {
            store,
            issuer,
            validator,
        }
    }

    /// Verify a principal's secret and issue a token on success.
    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<LoginOutcome, AuthError> {
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::InvalidInput(
                "identifier and secret must not be empty".to_string(),
            ));
        }

        let Some(principal) = self.store.find_by_identifier(identifier).await? else {
            // Burn the same verification work as a stored-credential mismatch
            // so a lookup miss is not separable by response time.
            let _ = CredentialVerifier::verify(secret, credential::UNKNOWN_PRINCIPAL_HASH);
            return Err(AuthError::AuthorizationDenied);
        };
        if !CredentialVerifier::verify(secret, &principal.credential_hash)? {
            return Err(AuthError::AuthorizationDenied);
        }

        let token = self.issuer.issue(&principal)?;
        info!(principal = %principal.identifier, "login succeeded");
        Ok(LoginOutcome {
            token,
            principal: principal.identifier,
            roles: principal.roles,
        })
    }

    /// Token introspection: validate and return the extracted context.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedContext, AuthError> {
        self.validator.validate(token)
    }
}
