//! Plain-text output for the command line.

use std::fmt;
use std::io::{self, Write};

use crate::domain::{Contact, FieldErrors};

/// Write one tab-separated line per contact, or a notice when there are none.
pub fn write_contacts(out: &mut impl Write, contacts: &[Contact]) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(out, "No contacts found.");
    }
    writeln!(out, "ID\tCOMPANY\tEMAIL\tPHONE\tADDRESS")?;
    for contact in contacts {
        write_contact(out, contact)?;
    }
    Ok(())
}

/// Write a single contact line.
pub fn write_contact(out: &mut impl Write, contact: &Contact) -> io::Result<()> {
    let fields = contact.fields();
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}",
        contact.id(),
        fields.company_name,
        fields.company_email,
        fields.company_phone,
        fields.company_address
    )
}

/// One line per failing field: `field: message`.
#[must_use]
pub fn format_field_errors<F>(errors: &FieldErrors<F>) -> String
where
    F: Ord + Copy + fmt::Display,
{
    errors
        .iter()
        .map(|(field, error)| format!("{field}: {}", error.message()))
        .collect::<Vec<_>>()
        .join("\n")
}
