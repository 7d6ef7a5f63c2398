// Hand-crafted async HTTP client for the company-directory backend.
//
// JSON REST endpoints relative to the configured base URL.
// Every request races its cancellation token; a fired token drops the
// in-flight request (aborting the connection) and yields Error::Cancelled.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{CompanyRecord, CreateCompanyRequest};

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the directory backend.
///
/// Cheaply cloneable; the underlying `reqwest::Client` holds the
/// connection pool.
#[derive(Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DirectoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (test seam).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so relative
    /// joins append instead of replacing the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /companies` — the full directory listing.
    pub async fn list_companies(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<CompanyRecord>, Error> {
        self.get("companies", cancel).await
    }

    /// `POST /companies` — register a new company. The response body is
    /// discarded.
    pub async fn create_company(
        &self,
        req: &CreateCompanyRequest,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        self.post_no_response("companies", req, cancel).await
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"companies"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining a relative path works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = async {
                let resp = self.http.get(url).send().await?;
                Self::handle_response(resp).await
            } => result,
        }
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = async {
                let resp = self.http.post(url).json(body).send().await?;
                Self::handle_empty(resp).await
            } => result,
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            if let Some(message) = err.message {
                return Error::Api {
                    status: status.as_u16(),
                    message,
                };
            }
        }

        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        }
    }
}
