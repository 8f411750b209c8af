// src/core/net.rs
// Blocking HTTPS GET. Runs are sequential, so one client is built per run and reused.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::Result;

pub fn client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// GET `url` and return the body. Non-2xx statuses are errors.
pub fn http_get(client: &Client, url: &str) -> Result<String> {
    logd!("GET {url}");
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}
