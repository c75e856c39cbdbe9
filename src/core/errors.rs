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

//! Error taxonomy for the authentication core.
//!
//! Component errors are local and typed; the request gate collapses every
//! validator failure to a single generic denial before it crosses the trust
//! boundary, keeping the specific kind for the internal audit record only.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Malformed argument (empty secret, unparseable stored hash, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Signing key unavailable or cryptographic signing failure
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Cryptographic failure outside token signing (hashing, RNG)
    #[error("cryptographic failure: {0}")]
    Crypto(String),

    /// Token is not structurally a signed token
    #[error("malformed token")]
    MalformedToken,

    /// Token signature does not verify against the trusted key
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token expiry is not strictly in the future
    #[error("token expired")]
    ExpiredToken,

    /// Required claims absent or unusable
    #[error("invalid claims: {0}")]
    InvalidClaims(String),

    /// Aggregate outward-facing denial; never carries the underlying kind
    #[error("authorization denied")]
    AuthorizationDenied,

    /// Principal store failure (lookup collaborator unavailable)
    #[error("principal store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Stable label for audit records and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "invalid_input",
            AuthError::Signing(_) => "signing_error",
            AuthError::Crypto(_) => "crypto_error",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::ExpiredToken => "expired_token",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::AuthorizationDenied => "authorization_denied",
            AuthError::Store(_) => "store_error",
        }
    }
}
