// Wire types for the directory backend.
//
// Field names follow the backend's camelCase JSON, with `companyITIN`
// called out explicitly since rename_all would produce `companyItin`.

use serde::{Deserialize, Serialize};

/// A company as returned by `GET /companies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    pub company_name: String,
    #[serde(rename = "companyITIN")]
    pub company_itin: u64,
    pub phone: u64,
    pub country: String,
    pub email: String,
}

/// Payload for `POST /companies`. The backend assigns the id; the
/// response body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub company_name: String,
    #[serde(rename = "companyITIN")]
    pub company_itin: u64,
    pub phone: u64,
    pub country: String,
    pub email: String,
}
