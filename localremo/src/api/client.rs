use std::net::SocketAddr;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Body, Client, RequestBuilder, Response, StatusCode};
use shared::protocol::{JSON_CONTENT_TYPE, MESSAGES_PATH, REQUESTED_WITH_HEADER, REQUESTED_WITH_LOCAL};
use shared::types::IrSignal;
use crate::api::scope::RequestScope;
use crate::error::{Error, Operation, Result};

/// Client for the device's local `/messages` API.
///
/// Owns one HTTP client; create it once and pass it to whoever needs it.
#[derive(Debug, Clone)]
pub struct SignalClient {
    http: Client,
}

impl SignalClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder().build().map_err(Error::HttpClient)?;
        Ok(Self { http })
    }

    /// GET the signal the device last received.
    pub async fn fetch_signal(&self, scope: &RequestScope, addr: SocketAddr) -> Result<IrSignal> {
        let operation = Operation::Fetch;
        let url = messages_url(addr);
        tracing::debug!("GET {}", url);

        let request = self.tag(self.http.get(&url));
        let body = scope
            .run(operation, async move {
                let response = request
                    .send()
                    .await
                    .map_err(|source| Error::Transport { operation, source })?;
                let response = ensure_ok(operation, response)?;
                response
                    .bytes()
                    .await
                    .map_err(|source| Error::Transport { operation, source })
            })
            .await?;

        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            origin: format!("{} response", operation),
            source,
        })
    }

    /// POST `body` to the device as-is; the response body is ignored.
    pub async fn submit_signal(
        &self,
        scope: &RequestScope,
        addr: SocketAddr,
        body: impl Into<Body>,
    ) -> Result<()> {
        let operation = Operation::Submit;
        let url = messages_url(addr);
        tracing::debug!("POST {}", url);

        let request = self
            .tag(self.http.post(&url))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);

        scope
            .run(operation, async move {
                let response = request
                    .send()
                    .await
                    .map_err(|source| Error::Transport { operation, source })?;
                ensure_ok(operation, response).map(|_| ())
            })
            .await
    }

    fn tag(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_LOCAL)
            .header(ACCEPT, JSON_CONTENT_TYPE)
    }
}

fn messages_url(addr: SocketAddr) -> String {
    format!("http://{}{}", addr, MESSAGES_PATH)
}

fn ensure_ok(operation: Operation, response: Response) -> Result<Response> {
    let status = response.status();
    if status != StatusCode::OK {
        tracing::debug!("{} answered {}", operation, status);
        return Err(Error::Status { operation, status });
    }
    Ok(response)
}
