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

//! Credential verification.
//!
//! Secrets are stored only as salted Argon2id hashes in PHC string format.
//! Verification re-hashes the supplied secret with the stored salt and
//! compares in constant time; a mismatch is an `Ok(false)`, never an error.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::core::errors::AuthError;

pub struct CredentialVerifier;

impl CredentialVerifier {
    /// Hash a secret into a PHC string suitable for storage.
    pub fn hash(secret: &str) -> Result<String, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidInput(
                "secret must not be empty".to_string(),
            ));
        }
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|e| AuthError::Crypto(format!("salt generation failed: {}", e)))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AuthError::Crypto(e.to_string()))?;
        let phc = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AuthError::Crypto(e.to_string()))?
            .to_string();
        Ok(phc)
    }

    /// Check a supplied secret against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on mismatch. `InvalidInput` is returned only when
    /// either argument is malformed: empty, or a stored hash that is not a
    /// valid PHC string.
    pub fn verify(supplied_secret: &str, stored_hash: &str) -> Result<bool, AuthError> {
        if supplied_secret.is_empty() {
            return Err(AuthError::InvalidInput(
                "supplied secret must not be empty".to_string(),
            ));
        }
        if stored_hash.is_empty() {
            return Err(AuthError::InvalidInput(
                "stored hash must not be empty".to_string(),
            ));
        }
        let parsed = PasswordHash::new(stored_hash).map_err(|e| {
            AuthError::InvalidInput(format!("stored hash is not a valid PHC string: {}", e))
        })?;
        Ok(Argon2::default()
            .verify_password(supplied_secret.as_bytes(), &parsed)
            .is_ok())
    }
}
