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

//! Token validation.
//!
//! Four mandatory, ordered checks: structural parse, signature, expiry,
//! required claims. A malformed token never reaches the signature step and
//! an expired token is reported as expired even when its claims are also
//! deficient. Expiry is exclusive: a token presented at exactly `exp` is
//! rejected.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use crate::config::Config;
use crate::core::constants::crypto;
use crate::core::errors::AuthError;
use crate::core::principal::AuthenticatedContext;
use crate::token::claims::Claims;
use crate::utils::time;

#[derive(Debug)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Build a validator around the trusted key.
    pub fn new(signing_key: &str) -> Result<Self, AuthError> {
        if signing_key.len() < crypto::MIN_SIGNING_KEY_LENGTH {
            return Err(AuthError::InvalidInput(format!(
                "signing key must be at least {} bytes",
                crypto::MIN_SIGNING_KEY_LENGTH
            )));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry and claim presence are checked explicitly below so the
        // exclusive boundary and the check ordering stay under our control.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = Default::default();
        Ok(Self {
            key: DecodingKey::from_secret(signing_key.as_bytes()),
            validation,
        })
    }

    /// Build a validator from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        let key = config
            .signing_key
            .as_deref()
            .ok_or_else(|| AuthError::InvalidInput("signing key not configured".to_string()))?;
        Self::new(key)
    }

    /// Validate a token against the system clock.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedContext, AuthError> {
        self.validate_at(token, time::now_secs())
    }

    /// Validate a token at a caller-supplied instant.
    pub fn validate_at(
        &self,
        token: &str,
        now_secs: u64,
    ) -> Result<AuthenticatedContext, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MalformedToken);
        }

        // (a) structural parse + (b) signature
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| Self::map_decode_error(e.kind()))?;
        let claims = data.claims;

        // (c) expiry, exclusive bound: now >= exp rejects
        let exp = claims
            .exp
            .ok_or_else(|| AuthError::InvalidClaims("exp claim missing".to_string()))?;
        if now_secs >= exp {
            return Err(AuthError::ExpiredToken);
        }

        // (d) required claims
        if claims.sub.is_empty() {
            return Err(AuthError::InvalidClaims("sub claim missing".to_string()));
        }

        Ok(AuthenticatedContext {
            principal: claims.sub,
            roles: claims.roles,
            issued_at: claims.iat,
            expires_at: exp,
        })
    }

    fn map_decode_error(kind: &ErrorKind) -> AuthError {
        match kind {
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::InvalidKeyFormat => AuthError::InvalidSignature,
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            ErrorKind::MissingRequiredClaim(claim) => {
                AuthError::InvalidClaims(format!("{} claim missing", claim))
            }
            // InvalidToken, Base64, Json, Utf8 and anything the library adds
            // later: the token never parsed as a signed token at all.
            _ => AuthError::MalformedToken,
        }
    }
}
