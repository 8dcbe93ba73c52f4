// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared reqwest client construction for the HTTP adapters

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};

/// Build a client with optional bearer auth and an opt-in insecure-TLS
/// mode for clusters fronted by self-signed certificates.
pub(crate) fn client(
    token: Option<&str>,
    user_agent: Option<&str>,
    insecure: bool,
) -> Result<reqwest::Client, String> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| format!("invalid token: {}", e))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    if let Some(agent) = user_agent {
        let value =
            HeaderValue::from_str(agent).map_err(|e| format!("invalid user agent: {}", e))?;
        headers.insert(USER_AGENT, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .danger_accept_invalid_certs(insecure)
        .build()
        .map_err(|e| e.to_string())
}
