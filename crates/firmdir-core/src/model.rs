// ── Domain model ──
//
// Canonical company type, decoupled from the backend's wire shape.

use serde::Serialize;

use firmdir_api::CompanyRecord;

/// A company in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    /// Backend-assigned identifier (opaque string).
    pub id: String,
    pub name: String,
    /// Individual taxpayer identification number.
    pub itin: u64,
    pub phone: u64,
    pub country: String,
    pub email: String,
}

impl From<CompanyRecord> for Company {
    fn from(rec: CompanyRecord) -> Self {
        Self {
            id: rec.id,
            name: rec.company_name,
            itin: rec.company_itin,
            phone: rec.phone,
            country: rec.country,
            email: rec.email,
        }
    }
}
