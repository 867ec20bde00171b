// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loading drafts and attachments from disk.

use serde::Deserialize;
use signup_domain::{Attachment, CountryCatalog, DomainError, FieldUpdate};
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Errors raised while reading command-line inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// A file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The draft file is not valid JSON for a draft.
    #[error("Invalid draft file '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A draft value was rejected before validation.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The attachment type could not be inferred from its extension.
    #[error("Cannot infer the type of '{}'; pass --attachment-type", .0.display())]
    UnknownAttachmentType(PathBuf),
    /// The reference time is not an RFC 3339 timestamp.
    #[error("Invalid reference time '{value}': {error}")]
    InvalidTime { value: String, error: String },
}

/// A draft as stored in a JSON file, using the wire field names.
///
/// Absent keys are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftFile {
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: Option<String>,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    pub terms_accepted: bool,
    pub bot_check_token: String,
}

impl DraftFile {
    /// Reads a draft file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` or `InputError::Json` if the file cannot be
    /// read or parsed.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let contents: String = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Converts the file into the input events that fill in the form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCountry` if the country is not in the
    /// catalog and `DomainError::InvalidDate` if the birth date is malformed.
    pub fn into_updates(self, countries: &CountryCatalog) -> Result<Vec<FieldUpdate>, InputError> {
        let country = self
            .country
            .as_deref()
            .map(|name| countries.select(name))
            .transpose()?;
        let date_of_birth: Option<Date> = self.date_of_birth.as_deref().map(parse_date).transpose()?;

        Ok(vec![
            FieldUpdate::FullName(self.full_name),
            FieldUpdate::PhoneNumber(self.phone_number),
            FieldUpdate::Address(self.address),
            FieldUpdate::City(self.city),
            FieldUpdate::Postcode(self.postcode),
            FieldUpdate::Country(country),
            FieldUpdate::Email(self.email),
            FieldUpdate::Username(self.username),
            FieldUpdate::Password(self.password),
            FieldUpdate::ConfirmPassword(self.confirm_password),
            FieldUpdate::DateOfBirth(date_of_birth),
            FieldUpdate::TermsAccepted(self.terms_accepted),
            FieldUpdate::BotCheckToken(self.bot_check_token),
        ])
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses the `--now` override.
///
/// # Errors
///
/// Returns `InputError::InvalidTime` if the value is not RFC 3339.
pub fn parse_now(value: &str) -> Result<OffsetDateTime, InputError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| InputError::InvalidTime {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Infers an attachment MIME type from the file extension.
#[must_use]
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let extension: String = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

/// Reads an attachment from disk.
///
/// The explicit `content_type` wins over the inferred one, so unsupported
/// files can still be handed to the validator.
///
/// # Errors
///
/// Returns `InputError::Io` if the file cannot be read and
/// `InputError::UnknownAttachmentType` if no type is given or inferred.
pub fn load_attachment(path: &Path, content_type: Option<&str>) -> Result<Attachment, InputError> {
    let content_type: &str = content_type
        .or_else(|| guess_content_type(path))
        .ok_or_else(|| InputError::UnknownAttachmentType(path.to_path_buf()))?;
    let bytes: Vec<u8> = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name: String = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Attachment::from_bytes(file_name, content_type, bytes))
}
