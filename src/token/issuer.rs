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

//! Token issuance.
//!
//! Mints HMAC-SHA256-signed JWTs for principals the caller has already
//! verified; this module never re-checks credentials. The signing key is
//! injected at construction and never rotated for the issuer's lifetime.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::config::Config;
use crate::core::constants::crypto;
use crate::core::errors::AuthError;
use crate::core::principal::Principal;
use crate::token::claims::Claims;
use crate::utils::time;

#[derive(Debug)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl_secs: u64,
    issuer: String,
}

impl TokenIssuer {
    /// Build an issuer around an immutable signing key.
    ///
    /// Fails with `Signing` when the key is missing its HMAC-SHA256 floor of
    /// 32 bytes; a weaker key must never sign a token.
    pub fn new(
        signing_key: &str,
        ttl_secs: u64,
        issuer: impl Into<String>,
    ) -> Result<Self, AuthError> {
        if signing_key.len() < crypto::MIN_SIGNING_KEY_LENGTH {
            return Err(AuthError::Signing(format!(
                "signing key must be at least {} bytes",
                crypto::MIN_SIGNING_KEY_LENGTH
            )));
        }
        Ok(Self {
            key: EncodingKey::from_secret(signing_key.as_bytes()),
            ttl_secs,
            issuer: issuer.into(),
        })
    }

    /// Build an issuer from loaded configuration (key, TTL, issuer name).
    ///
    /// Fails with `Signing` when no signing key is configured; issuing
    /// without a key must be impossible, not deferred.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        let key = config
            .signing_key
            .as_deref()
            .ok_or_else(|| AuthError::Signing("signing key not configured".to_string()))?;
        Self::new(key, config.token_ttl_secs, config.issuer.clone())
    }

    /// Issue a signed token for a verified principal.
    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        self.issue_at(principal, time::now_secs())
    }

    /// Issue with a caller-supplied issued-at instant.
    ///
    /// `issue` delegates here with the system clock; tests use this to pin
    /// expiry boundaries deterministically.
    pub fn issue_at(&self, principal: &Principal, now_secs: u64) -> Result<String, AuthError> {
        let claims = Claims {
            sub: principal.identifier.clone(),
            iss: self.issuer.clone(),
            iat: now_secs,
            exp: Some(now_secs.saturating_add(self.ttl_secs)),
            roles: principal.roles.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
