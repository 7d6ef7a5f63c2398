// ── Add-company form validation ──
//
// Schema-style field rules on the create input. Violations are collapsed
// to one message per field (the first), which is what form consumers
// render next to each input.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::Validate;

use firmdir_api::CreateCompanyRequest;

use crate::error::CoreError;

/// Input for registering a new company.
///
/// `itin` and `phone` are numeric by construction; the string fields
/// carry the schema rules.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewCompany {
    #[validate(length(min = 2, message = "Company name must be at least 2 characters"))]
    pub name: String,

    pub itin: u64,

    pub phone: u64,

    #[validate(length(min = 2, message = "Country must be at least 2 characters"))]
    pub country: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

impl NewCompany {
    /// Validate and convert into the wire request.
    ///
    /// On violation returns [`CoreError::Validation`] carrying the first
    /// message per offending field; no request is built.
    pub fn into_request(self) -> Result<CreateCompanyRequest, CoreError> {
        if let Err(errs) = self.validate() {
            let mut fields = BTreeMap::new();
            for (field, errors) in errs.field_errors() {
                if let Some(first) = errors.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map_or_else(|| first.code.to_string(), ToString::to_string);
                    fields.insert(field.to_string(), message);
                }
            }
            return Err(CoreError::Validation { fields });
        }

        Ok(CreateCompanyRequest {
            company_name: self.name,
            company_itin: self.itin,
            phone: self.phone,
            country: self.country,
            email: self.email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> NewCompany {
        NewCompany {
            name: "Tech Solutions".into(),
            itin: 12_345_678,
            phone: 1_112_223_333,
            country: "USA".into(),
            email: "contact@techsolutions.com".into(),
        }
    }

    #[test]
    fn valid_input_converts_to_request() {
        let req = valid_input().into_request().unwrap();
        assert_eq!(req.company_name, "Tech Solutions");
        assert_eq!(req.company_itin, 12_345_678);
        assert_eq!(req.email, "contact@techsolutions.com");
    }

    #[test]
    fn short_name_is_rejected_with_field_message() {
        let input = NewCompany {
            name: "T".into(),
            ..valid_input()
        };
        let err = input.into_request().unwrap_err();
        let fields = err.validation_fields().unwrap();
        assert_eq!(
            fields.get("name").map(String::as_str),
            Some("Company name must be at least 2 characters")
        );
    }

    #[test]
    fn bad_email_and_short_country_both_reported() {
        let input = NewCompany {
            country: "U".into(),
            email: "not-an-email".into(),
            ..valid_input()
        };
        let err = input.into_request().unwrap_err();
        let fields = err.validation_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("Invalid email")
        );
        assert_eq!(
            fields.get("country").map(String::as_str),
            Some("Country must be at least 2 characters")
        );
    }
}
