//! Declarative form validation primitives.
//!
//! Schemas evaluate every field independently and report all violations at
//! once. Validation never touches the network or the contact list store, so
//! it is safe to run on every keystroke.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A declarative ruleset binding raw form input to a validated value.
///
/// # Examples
/// ```
/// use contact_client::domain::{ContactField, ContactFields, ContactSchema, FormSchema};
///
/// let mut draft = ContactFields::default();
/// ContactSchema::assign(&mut draft, ContactField::CompanyName, "A".to_owned());
/// let errors = ContactSchema::validate(&draft).unwrap_err();
/// assert!(errors.get(ContactField::CompanyName).is_some());
/// assert!(errors.get(ContactField::CompanyEmail).is_some());
/// ```
pub trait FormSchema {
    /// Identifies one input of the form.
    type Field: Copy + Ord + fmt::Debug + fmt::Display;
    /// Raw values as typed by the user.
    type Draft: Clone + Default + fmt::Debug + PartialEq;
    /// Values that satisfied every rule.
    type Valid: Clone + fmt::Debug;

    /// Store a raw value for `field` in the draft.
    fn assign(draft: &mut Self::Draft, field: Self::Field, value: String);

    /// Evaluate every rule, collecting all field errors.
    fn validate(draft: &Self::Draft) -> Result<Self::Valid, FieldErrors<Self::Field>>;
}

/// The rule a field value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value had fewer than `min` characters.
    MinLength {
        /// Smallest accepted character count.
        min: usize,
    },
    /// Value did not match the email grammar.
    Email,
}

/// A single field-level violation with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    rule: Rule,
    message: &'static str,
}

impl FieldError {
    /// Build a violation for `rule` shown to the user as `message`.
    #[must_use]
    pub const fn new(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }

    /// Rule that failed.
    #[must_use]
    pub const fn rule(&self) -> Rule {
        self.rule
    }

    /// Message displayed next to the field.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

/// All violations found in one validation pass, keyed by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, FieldError>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    /// Error recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: F) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in field order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    /// Failing fields without their errors.
    #[must_use]
    pub fn fields(&self) -> Vec<F> {
        self.errors.keys().copied().collect()
    }

    fn insert(&mut self, field: F, error: FieldError) {
        self.errors.entry(field).or_insert(error);
    }
}

impl<F: Ord + Copy + fmt::Display> fmt::Display for FieldErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", error.message())?;
            first = false;
        }
        Ok(())
    }
}

impl<F: Ord + Copy + fmt::Debug + fmt::Display> std::error::Error for FieldErrors<F> {}

/// Accumulates per-field checks so a schema can report every violation.
pub(crate) struct FieldChecks<F: Ord> {
    errors: FieldErrors<F>,
}

impl<F: Ord + Copy> FieldChecks<F> {
    pub(crate) fn new() -> Self {
        Self {
            errors: FieldErrors::default(),
        }
    }

    pub(crate) fn min_length(
        mut self,
        field: F,
        value: &str,
        min: usize,
        message: &'static str,
    ) -> Self {
        if !has_min_length(value, min) {
            self.errors
                .insert(field, FieldError::new(Rule::MinLength { min }, message));
        }
        self
    }

    pub(crate) fn email(mut self, field: F, value: &str, message: &'static str) -> Self {
        if !is_email(value) {
            self.errors.insert(field, FieldError::new(Rule::Email, message));
        }
        self
    }

    /// Yield `valid` when every check passed.
    pub(crate) fn finish<T>(self, valid: impl FnOnce() -> T) -> Result<T, FieldErrors<F>> {
        if self.errors.is_empty() {
            Ok(valid())
        } else {
            Err(self.errors)
        }
    }
}

/// Whether `value` holds at least `min` characters.
///
/// Characters are Unicode scalar values and surrounding whitespace counts.
#[must_use]
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Leading dots and consecutive dots are rejected separately; the
        // regex crate has no lookahead.
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` matches the email grammar accepted by every form.
///
/// # Examples
/// ```
/// use contact_client::domain::is_email;
///
/// assert!(is_email("a@b.com"));
/// assert!(!is_email("a@b"));
/// assert!(!is_email(".a@b.com"));
/// ```
#[must_use]
pub fn is_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    email_regex().is_match(value)
}
