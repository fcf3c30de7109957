use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::COOKIE;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::RequestError;
use crate::headers::HeaderMapping;

pub struct ExecutionContext {
    pub client: reqwest::blocking::Client,
    pub config: Config,
}

impl ExecutionContext {
    pub fn new(config: Config) -> Result<ExecutionContext> {
        // timeouts are set per request, the client itself must never cut one short
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("while building the http client")?;
        return Ok(ExecutionContext { client, config });
    }

    fn get(&self, url: &str, timeout: Option<Duration>, cookie: Option<&str>) -> Result<reqwest::blocking::Response, RequestError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        debug!(url, ?timeout, with_cookie = cookie.is_some(), "sending GET");
        let response = request.send()?.error_for_status()?;
        debug!(url, status = %response.status(), "received response");
        return Ok(response);
    }

    /// GETs `url` and returns all response headers; 4xx and 5xx count as failures.
    pub fn fetch_headers(&self, url: &str, timeout: Option<Duration>) -> Result<HeaderMapping, RequestError> {
        let response = self.get(url, timeout, None)?;
        return Ok(HeaderMapping::from_header_map(response.headers()));
    }

    /// Announces the fetch on the console and never fails on the network side:
    /// a failed request comes back as the `{"Error": message}` placeholder.
    pub fn fetch_and_report(&self, out: &mut impl Write, url: &str, timeout: Option<Duration>) -> std::io::Result<HeaderMapping> {
        writeln!(out, "\nFetching headers for: {}", url)?;
        return headers_or_placeholder(out, self.fetch_headers(url, timeout));
    }

    /// GETs `url` with `Cookie: <cookie>` as the only extra header and returns the body.
    pub fn send_request_with_cookie(&self, url: &str, cookie: &str) -> Result<String, RequestError> {
        let response = self.get(url, self.config.cookie_timeout, Some(cookie))?;
        return Ok(response.text()?);
    }
}

pub fn headers_or_placeholder(out: &mut impl Write, result: Result<HeaderMapping, RequestError>) -> std::io::Result<HeaderMapping> {
    return match result {
        Ok(headers) => Ok(headers),
        Err(e) => {
            warn!(error = %e, "fetching headers failed");
            writeln!(out, "Error fetching headers: {}", e)?;
            Ok(HeaderMapping::error_placeholder(e.message()))
        }
    };
}
