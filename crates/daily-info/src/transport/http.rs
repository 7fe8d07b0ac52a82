use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::config::CbrConfig;
use crate::errors::{CbrError, Result};
use crate::models::{Arguments, RawResponse};

use super::envelope::{build_request, parse_response};
use super::traits::SoapTransport;

/// SOAP-over-HTTP transport.
pub struct HttpSoapTransport {
    client: Client,
    endpoint: String,
    namespace: String,
}

impl HttpSoapTransport {
    pub fn new(config: &CbrConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: config.endpoint.clone(),
            namespace: config.namespace.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn soap_action(&self, remote: &str) -> String {
        format!("\"{}{}\"", self.namespace, remote)
    }
}

#[async_trait]
impl SoapTransport for HttpSoapTransport {
    async fn invoke(&self, remote: &str, params: &Arguments) -> Result<RawResponse> {
        let body = build_request(&self.namespace, remote, params);
        debug!(
            "DailyInfo request: {} with {} params ({} bytes)",
            remote,
            params.len(),
            body.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", self.soap_action(remote))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CbrError::Timeout {
                        operation: remote.to_string(),
                    }
                } else {
                    CbrError::transport(remote, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CbrError::transport(remote, format!("Failed to read body: {}", e)))?;
        debug!("DailyInfo response: {} {} ({} bytes)", remote, status, text.len());

        // ASMX reports faults with HTTP 500, so the body is checked first
        match parse_response(remote, &text) {
            Err(fault @ CbrError::Fault { .. }) => Err(fault),
            _ if !status.is_success() => Err(CbrError::transport(remote, format!("HTTP {}", status))),
            parsed => parsed,
        }
    }
}
