// ── Directory facade ──
//
// The main entry point for consumers. Owns the backend client plus one
// request lifecycle controller per logical view: the company listing
// and the create-company form. Consumers read {status, data, error}
// reactively through the fetch streams and trigger loads/creates here.

use std::sync::Arc;

use tracing::debug;

use firmdir_api::{DirectoryClient, TlsMode, TransportConfig};

use crate::config::{DirectoryConfig, TlsVerification};
use crate::error::CoreError;
use crate::fetch::{FetchOutcome, FetchState, Fetcher};
use crate::model::Company;
use crate::stream::FetchStream;
use crate::validate::NewCompany;

/// Facade over the directory backend.
pub struct Directory {
    client: DirectoryClient,
    companies: Fetcher<Vec<Company>>,
    create: Fetcher<()>,
}

impl Directory {
    /// Build a directory from connection settings.
    pub fn new(config: &DirectoryConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            tls: match config.tls {
                TlsVerification::System => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
        };
        let client = DirectoryClient::new(config.base_url.as_str(), &transport)?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client (test seam).
    pub fn from_client(client: DirectoryClient) -> Self {
        Self {
            client,
            companies: Fetcher::new(),
            create: Fetcher::new(),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Load the company listing.
    ///
    /// Re-triggering while a previous load is pending supersedes it:
    /// the old request is cancelled and only this call's result can
    /// reach the listing state.
    pub async fn load_companies(&self) -> FetchOutcome<Arc<Vec<Company>>> {
        let client = self.client.clone();
        self.companies
            .dispatch(move |cancel| async move {
                let records = client.list_companies(&cancel).await?;
                debug!(count = records.len(), "directory listing fetched");
                Ok(records.into_iter().map(Company::from).collect())
            })
            .await
    }

    /// Validate and register a new company.
    ///
    /// Validation runs before any request is issued; a violation comes
    /// back as `Failed` without touching the create state, mirroring a
    /// form that blocks submission client-side. Callers gate follow-up
    /// work (e.g. navigating to the listing) on an `Ok` outcome.
    pub async fn create_company(&self, input: NewCompany) -> FetchOutcome<Arc<()>> {
        let req = match input.into_request() {
            Ok(req) => req,
            Err(err) => return FetchOutcome::Failed(Arc::new(err)),
        };

        let client = self.client.clone();
        self.create
            .dispatch(move |cancel| async move {
                client.create_company(&req, &cancel).await?;
                debug!(company = %req.company_name, "company registered");
                Ok(())
            })
            .await
    }

    // ── State observation ────────────────────────────────────────────

    /// Subscribe to company-listing state changes.
    pub fn companies(&self) -> FetchStream<Vec<Company>> {
        self.companies.subscribe()
    }

    /// Point-in-time company-listing state.
    pub fn companies_state(&self) -> FetchState<Vec<Company>> {
        self.companies.state()
    }

    /// Subscribe to create-request state changes.
    pub fn create(&self) -> FetchStream<()> {
        self.create.subscribe()
    }

    /// Point-in-time create-request state.
    pub fn create_state(&self) -> FetchState<()> {
        self.create.state()
    }
}
