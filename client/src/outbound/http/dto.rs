//! Wire payloads that are not domain types.
//!
//! Contacts travel as [`Contact`](crate::domain::Contact) directly; these DTOs
//! cover the update body and the auxiliary response shapes.

use serde::{Deserialize, Serialize};

use crate::domain::{ContactFields, ContactId};

/// `PUT` body: the full record, id included.
#[derive(Debug, Serialize)]
pub(super) struct UpdateContactDto<'a> {
    pub(super) contact_id: &'a ContactId,
    #[serde(flatten)]
    pub(super) fields: &'a ContactFields,
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

/// Sign-in success body.
#[derive(Debug, Default, Deserialize)]
pub(super) struct SignInResponseDto {
    #[serde(default)]
    pub(super) token: Option<String>,
}

/// Extract the service's `message` string from an error body, if any.
pub(super) fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.message)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(br#"{"message":"Contact not found"}"#.as_slice(), Some("Contact not found"))]
    #[case(br#"{"error":"nope"}"#.as_slice(), None)]
    #[case(br#"{"message":42}"#.as_slice(), None)]
    #[case(b"<html>502</html>".as_slice(), None)]
    #[case(b"".as_slice(), None)]
    fn extracts_string_messages_only(#[case] body: &[u8], #[case] expected: Option<&str>) {
        assert_eq!(error_message(body).as_deref(), expected);
    }

    #[test]
    fn update_body_carries_id_and_fields() {
        let id = ContactId::new("7").expect("id");
        let fields = ContactFields::new("Acme", "a@b.com", "1234567", "");
        let body = UpdateContactDto {
            contact_id: &id,
            fields: &fields,
        };

        assert_eq!(
            serde_json::to_value(&body).expect("serialises"),
            json!({
                "contact_id": "7",
                "companyName": "Acme",
                "companyEmail": "a@b.com",
                "companyPhone": "1234567",
                "companyAddress": ""
            })
        );
    }
}
