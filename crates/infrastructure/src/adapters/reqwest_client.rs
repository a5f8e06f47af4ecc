//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.

use std::error::Error as _;
use std::time::{Duration, Instant};

use apitester_application::ports::{HttpClient, HttpClientError};
use apitester_domain::{BodyPayload, HttpMethod, RequestSpec, ResponseSpec};
use reqwest::{Client, Method};
use tracing::debug;

const USER_AGENT: &str = concat!("apitester/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Certificate verification is a client-level setting in reqwest, so a
/// second client with verification disabled serves `verify_tls = false`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    insecure_client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client.
    ///
    /// Redirects are followed up to 10 hops.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, HttpClientError> {
        Ok(Self {
            client: Self::build(false)?,
            insecure_client: Self::build(true)?,
        })
    }

    fn build(accept_invalid_certs: bool) -> Result<Client, HttpClientError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Joins an error with its sources so the root cause is visible.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_secs: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_secs };
        }

        let message = Self::describe(error);
        let lower = message.to_lowercase();

        if error.is_builder() && !lower.contains("header") {
            return HttpClientError::InvalidUrl(message);
        }

        if error.is_connect() {
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError(message);
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused(message);
            }
            if lower.contains("certificate") || lower.contains("tls") {
                return HttpClientError::TlsError(message);
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let client = if request.verify_tls {
            &self.client
        } else {
            &self.insecure_client
        };
        let timeout_secs = request.timeout_secs;

        let mut builder = client
            .request(Self::to_reqwest_method(request.method), &request.url)
            .timeout(Duration::from_secs(timeout_secs));

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if !request.params.is_empty() {
            let params: Vec<(&str, &str)> = request
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            builder = builder.query(&params);
        }

        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        builder = match request.body_payload() {
            Some(BodyPayload::Json(value)) => builder.json(value),
            Some(BodyPayload::Raw(text)) => builder.body(text.into_owned()),
            None => builder,
        };

        debug!(method = %request.method, url = %request.url, timeout_secs, "sending request");
        let start = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_secs))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_secs))?
            .to_vec();
        let elapsed = start.elapsed();

        debug!(status = status.as_u16(), bytes = body.len(), ?elapsed, "response received");

        let mut spec = ResponseSpec::new(status.as_u16(), headers, body, elapsed);
        if let Some(reason) = status.canonical_reason() {
            spec = spec.with_status_text(reason);
        }
        Ok(spec)
    }
}
