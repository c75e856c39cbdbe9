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

//! keygate constants - single source of truth for all configuration values.
//!
//! This module centralizes magic numbers, header names, and configuration
//! constants to ensure consistency and maintainability.

/// Cryptographic constants
pub mod crypto {
    /// HMAC-SHA256 audit signing key length in bytes
    pub const SECRET_KEY_LENGTH: usize = 32;
    /// Minimum accepted token signing key length in bytes (HMAC-SHA256 floor)
    pub const MIN_SIGNING_KEY_LENGTH: usize = 32;
}

/// Credential verification constants
pub mod credential {
    /// Well-formed Argon2id PHC hash (default parameters) that no real
    /// secret hashes to. Verified on unknown-principal logins so a lookup
    /// miss costs the same hashing work as a stored-credential mismatch.
    pub const UNKNOWN_PRINCIPAL_HASH: &str =
        "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
}

/// Request gate constants
pub mod gate {
    /// Scheme prefix of the transport header carrying the token
    pub const BEARER_PREFIX: &str = "Bearer ";
    /// Outward-facing denial message; identical for every failure kind
    pub const DENIED_MESSAGE: &str = "authorization denied";
}

/// Audit trail constants
pub mod audit {
    /// Tracing target for signed audit records
    pub const TARGET: &str = "audit";
    /// Event type for gate decisions
    pub const EVENT_AUTH_DECISION: &str = "AUTH_DECISION";
}

/// Configuration environment variables and defaults
pub mod config {
    pub const ENV_SIGNING_KEY: &str = "KEYGATE_SIGNING_KEY";
    pub const ENV_TOKEN_TTL_SECS: &str = "KEYGATE_TOKEN_TTL_SECS";
    pub const ENV_ISSUER: &str = "KEYGATE_ISSUER";
    pub const ENV_LOG_LEVEL: &str = "KEYGATE_LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "KEYGATE_LOG_FORMAT";

    pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
    pub const DEFAULT_ISSUER: &str = "keygate";
}
