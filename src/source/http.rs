// src/source/http.rs
// Bridge process answering `GET <base>/<NAME>` with the value as plain text.
// 404 means the variable is unknown to the running aircraft.

use reqwest::StatusCode;
use reqwest::blocking::Client;

use super::{ValueSession, ValueSource};
use crate::core::net;
use crate::error::{Error, QueryError, Result};

pub struct HttpSource {
    base: String,
    client: Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self { base: base.trim_end_matches('/').to_string(), client: net::client()? })
    }
}

impl ValueSource for HttpSource {
    fn connect(&self) -> Result<Box<dyn ValueSession>> {
        // Any HTTP answer proves the bridge is up; only transport errors are fatal.
        self.client
            .get(&self.base)
            .send()
            .map_err(|e| Error::Connect(format!("{}: {e}", self.base)))?;
        Ok(Box::new(HttpSession { base: self.base.clone(), client: self.client.clone() }))
    }

    fn describe(&self) -> String {
        format!("bridge {}", self.base)
    }
}

struct HttpSession {
    base: String,
    client: Client,
}

impl ValueSession for HttpSession {
    fn query(&mut self, name: &str) -> std::result::Result<String, QueryError> {
        let url = format!("{}/{}", self.base, name);
        let resp = self.client.get(&url).send().map_err(|e| QueryError::Failed(e.to_string()))?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(QueryError::NotFound),
            s if s.is_success() => {
                let body = resp.text().map_err(|e| QueryError::Failed(e.to_string()))?;
                Ok(body.trim().to_string())
            }
            s => Err(QueryError::Failed(format!("HTTP {s}"))),
        }
    }
}
