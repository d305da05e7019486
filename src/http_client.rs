use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

const REQUEST_TIMEOUT_SECS: u64 = 15;
// The FPL API answers plain clients, but a browser-ish UA avoids the
// occasional bot filter in front of it.
const FPL_USER_AGENT: &str = "Mozilla/5.0";

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client for the FPL API: browser-style user agent on every
/// request, single timeout policy.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(FPL_USER_AGENT));
        Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}
