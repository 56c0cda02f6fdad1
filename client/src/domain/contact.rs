//! Contact record model.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Validation errors returned by [`ContactId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactIdError {
    /// The id was empty or only whitespace.
    Blank,
}

impl fmt::Display for ContactIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "contact id must not be blank"),
        }
    }
}

impl std::error::Error for ContactIdError {}

/// Server-assigned contact identifier.
///
/// The client never generates one; it only carries ids received from the
/// contact service, byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactId(String);

impl ContactId {
    /// Validate and construct a [`ContactId`].
    ///
    /// Any id with visible content is accepted unchanged; the service owns
    /// the format.
    ///
    /// # Examples
    /// ```
    /// use contact_client::domain::ContactId;
    ///
    /// assert!(ContactId::new("abc123").is_ok());
    /// assert!(ContactId::new("   ").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, ContactIdError> {
        let id = raw.into();
        if id.trim().is_empty() {
            return Err(ContactIdError::Blank);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ContactId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ContactId> for String {
    fn from(value: ContactId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ContactId {
    type Error = ContactIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Inputs of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    /// `companyName`.
    CompanyName,
    /// `companyEmail`.
    CompanyEmail,
    /// `companyPhone`.
    CompanyPhone,
    /// `companyAddress`.
    CompanyAddress,
}

impl ContactField {
    /// Every contact field in form order.
    pub const ALL: [Self; 4] = [
        Self::CompanyName,
        Self::CompanyEmail,
        Self::CompanyPhone,
        Self::CompanyAddress,
    ];

    /// Wire name used by the contact service.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::CompanyEmail => "companyEmail",
            Self::CompanyPhone => "companyPhone",
            Self::CompanyAddress => "companyAddress",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The four descriptive attributes of a contact.
///
/// Used both as the raw form draft and as the content of a stored record;
/// nothing here is validated. A missing or `null` attribute decodes as an
/// empty string so one sparse record cannot sink a whole listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    /// Company name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,
    /// Company email address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_email: String,
    /// Company phone number.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_phone: String,
    /// Free-text postal address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_address: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ContactFields {
    /// Build the attributes from borrowed strings.
    #[must_use]
    pub fn new(
        company_name: impl Into<String>,
        company_email: impl Into<String>,
        company_phone: impl Into<String>,
        company_address: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            company_email: company_email.into(),
            company_phone: company_phone.into(),
            company_address: company_address.into(),
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::CompanyName => &self.company_name,
            ContactField::CompanyEmail => &self.company_email,
            ContactField::CompanyPhone => &self.company_phone,
            ContactField::CompanyAddress => &self.company_address,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::CompanyName => &mut self.company_name,
            ContactField::CompanyEmail => &mut self.company_email,
            ContactField::CompanyPhone => &mut self.company_phone,
            ContactField::CompanyAddress => &mut self.company_address,
        };
        *slot = value;
    }
}

/// Contact attributes that passed [`ContactSchema`](super::ContactSchema).
///
/// Only the schema constructs values of this type, so holding one proves the
/// name, email and phone rules were met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedContact(ContactFields);

impl ValidatedContact {
    pub(crate) const fn new_unchecked(fields: ContactFields) -> Self {
        Self(fields)
    }

    /// Validated attributes.
    #[must_use]
    pub const fn fields(&self) -> &ContactFields {
        &self.0
    }

    /// Consume into the raw attributes.
    #[must_use]
    pub fn into_fields(self) -> ContactFields {
        self.0
    }
}

/// A contact record held by the client.
///
/// ## Invariants
/// - `id` was assigned by the contact service and never changes.
///
/// The wire shape is flat: `contact_id` sits next to the four attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "contact_id")]
    id: ContactId,
    #[serde(flatten)]
    fields: ContactFields,
}

impl Contact {
    /// Build a record from its parts.
    #[must_use]
    pub const fn new(id: ContactId, fields: ContactFields) -> Self {
        Self { id, fields }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> &ContactId {
        &self.id
    }

    /// Descriptive attributes.
    #[must_use]
    pub const fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Split into identifier and attributes.
    #[must_use]
    pub fn into_parts(self) -> (ContactId, ContactFields) {
        (self.id, self.fields)
    }
}
