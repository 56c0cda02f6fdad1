//! Rulesets for the contact, sign-in and registration forms.

use super::account::{
    LoginCredentials, LoginDraft, LoginField, Registration, RegistrationDraft, RegistrationField,
};
use super::contact::{ContactField, ContactFields, ValidatedContact};
use super::validation::{FieldChecks, FieldErrors, FormSchema};

/// Minimum company name length.
pub const COMPANY_NAME_MIN: usize = 2;
/// Minimum company phone length; the value is not parsed as a phone number.
pub const COMPANY_PHONE_MIN: usize = 7;
/// Minimum registration name length.
pub const ACCOUNT_NAME_MIN: usize = 2;
/// Minimum sign-in password length.
pub const LOGIN_PASSWORD_MIN: usize = 1;
/// Minimum registration password length.
pub const REGISTRATION_PASSWORD_MIN: usize = 6;

/// Contact form rules. The address is accepted as-is, including empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactSchema;

impl FormSchema for ContactSchema {
    type Field = ContactField;
    type Draft = ContactFields;
    type Valid = ValidatedContact;

    fn assign(draft: &mut Self::Draft, field: Self::Field, value: String) {
        draft.set(field, value);
    }

    fn validate(draft: &Self::Draft) -> Result<Self::Valid, FieldErrors<Self::Field>> {
        FieldChecks::new()
            .min_length(
                ContactField::CompanyName,
                &draft.company_name,
                COMPANY_NAME_MIN,
                "Name is required",
            )
            .email(
                ContactField::CompanyEmail,
                &draft.company_email,
                "Enter a valid email",
            )
            .min_length(
                ContactField::CompanyPhone,
                &draft.company_phone,
                COMPANY_PHONE_MIN,
                "Phone number must be at least 7 digits",
            )
            .finish(|| ValidatedContact::new_unchecked(draft.clone()))
    }
}

/// Sign-in form rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginSchema;

impl FormSchema for LoginSchema {
    type Field = LoginField;
    type Draft = LoginDraft;
    type Valid = LoginCredentials;

    fn assign(draft: &mut Self::Draft, field: Self::Field, value: String) {
        match field {
            LoginField::Email => draft.email = value,
            LoginField::Password => draft.password = value,
        }
    }

    fn validate(draft: &Self::Draft) -> Result<Self::Valid, FieldErrors<Self::Field>> {
        FieldChecks::new()
            .email(LoginField::Email, &draft.email, "Invalid email address")
            .min_length(
                LoginField::Password,
                &draft.password,
                LOGIN_PASSWORD_MIN,
                "Password is required",
            )
            .finish(|| LoginCredentials::new_unchecked(draft.email.clone(), draft.password.clone()))
    }
}

/// Registration form rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationSchema;

impl FormSchema for RegistrationSchema {
    type Field = RegistrationField;
    type Draft = RegistrationDraft;
    type Valid = Registration;

    fn assign(draft: &mut Self::Draft, field: Self::Field, value: String) {
        match field {
            RegistrationField::Name => draft.name = value,
            RegistrationField::Email => draft.email = value,
            RegistrationField::Password => draft.password = value,
        }
    }

    fn validate(draft: &Self::Draft) -> Result<Self::Valid, FieldErrors<Self::Field>> {
        FieldChecks::new()
            .min_length(
                RegistrationField::Name,
                &draft.name,
                ACCOUNT_NAME_MIN,
                "Name is required",
            )
            .email(RegistrationField::Email, &draft.email, "Invalid email address")
            .min_length(
                RegistrationField::Password,
                &draft.password,
                REGISTRATION_PASSWORD_MIN,
                "Password must be at least 6 characters",
            )
            .finish(|| {
                Registration::new_unchecked(
                    draft.name.clone(),
                    draft.email.clone(),
                    draft.password.clone(),
                )
            })
    }
}
