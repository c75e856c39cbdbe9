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

//! Cryptographic utilities for audit record integrity.
//!
//! This module provides the `CryptoSigner` which HMAC-signs serialized
//! audit entries with a per-process random key, making emitted log lines
//! tamper-evident.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::core::constants::crypto;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct CryptoSigner {
    secret: [u8; crypto::SECRET_KEY_LENGTH],
}

impl CryptoSigner {
    /// Create a new signer with a random ephemeral key.
    pub fn new() -> Self {
        let mut secret = [0u8; crypto::SECRET_KEY_LENGTH];
        rand::rng().fill_bytes(&mut secret);
        Self { secret }
    }

    /// Sign a payload, returning the base64url-encoded HMAC-SHA256 tag.
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(payload);
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    /// Verify a payload against a base64url signature using constant-time
    /// comparison. This is the entry point for checking emitted audit
    /// records against the signer that produced them.
    pub fn verify(&self, payload: &[u8], signature_b64: &str) -> bool {
        let provided = match URL_SAFE_NO_PAD.decode(signature_b64) {
            Ok(b) => b,
            Err(_) => return false,
        };
        let mut mac = match HmacSha256::new_from_slice(&self.secret) {
            Ok(m) => m,
            Err(_) => return false,
        };
        mac.update(payload);
        mac.verify_slice(&provided).is_ok()
    }
}

impl Default for CryptoSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_roundtrip() {
        let signer = CryptoSigner::new();
        let sig = signer.sign(b"audit entry");
        assert!(signer.verify(b"audit entry", &sig));
    }

    #[test]
    fn test_tampered_payload_fails_verification() {
        let signer = CryptoSigner::new();
        let sig = signer.sign(b"audit entry");
        assert!(!signer.verify(b"audit entrY", &sig));
        assert!(!signer.verify(b"audit entry", "bad_sig"));
    }

    #[test]
    fn test_keys_are_per_process_random() {
        let a = CryptoSigner::new();
        let b = CryptoSigner::new();
        assert_ne!(a.sign(b"x"), b.sign(b"x"));
    }
}
