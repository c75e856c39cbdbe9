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

//! Configuration loaded once at process start.
//!
//! The signing key is the only required value for issuing or validating
//! tokens; it is read here and then handed to `TokenIssuer`/`TokenValidator`
//! constructors as an immutable value, never looked up ambiently afterwards.

use serde::{Deserialize, Serialize};
use std::env;

use crate::core::constants::config as keys;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HMAC signing secret for tokens; at least 32 bytes.
    pub signing_key: Option<String>,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_secs: u64,
    /// Value of the `iss` claim stamped on issued tokens.
    pub issuer: String,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            signing_key: env::var(keys::ENV_SIGNING_KEY).ok(),
            token_ttl_secs: env::var(keys::ENV_TOKEN_TTL_SECS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(keys::DEFAULT_TOKEN_TTL_SECS),
            issuer: env::var(keys::ENV_ISSUER)
                .unwrap_or_else(|_| keys::DEFAULT_ISSUER.to_string()),
            log_level: env::var(keys::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(keys::ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signing_key: None,
            token_ttl_secs: keys::DEFAULT_TOKEN_TTL_SECS,
            issuer: keys::DEFAULT_ISSUER.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}
