// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// MIME types accepted for the identity confirmation attachment.
pub const ALLOWED_ATTACHMENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/jpg", "application/pdf"];

/// Countries offered by the country selector unless a custom list is configured.
pub const DEFAULT_COUNTRIES: [&str; 11] = [
    "Switzerland",
    "Germany",
    "Austria",
    "USA",
    "Canada",
    "UK",
    "France",
    "Italy",
    "Spain",
    "Japan",
    "China",
];

/// Identifies a single field of the registration draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    FullName,
    PhoneNumber,
    Address,
    City,
    Postcode,
    Country,
    Email,
    Username,
    Password,
    ConfirmPassword,
    DateOfBirth,
    IdConfirmation,
    TermsAccepted,
    BotCheckToken,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Self; 14] = [
        Self::FullName,
        Self::PhoneNumber,
        Self::Address,
        Self::City,
        Self::Postcode,
        Self::Country,
        Self::Email,
        Self::Username,
        Self::Password,
        Self::ConfirmPassword,
        Self::DateOfBirth,
        Self::IdConfirmation,
        Self::TermsAccepted,
        Self::BotCheckToken,
    ];

    /// Returns the wire name used for this field in form state and error maps.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::PhoneNumber => "phoneNumber",
            Self::Address => "address",
            Self::City => "city",
            Self::Postcode => "postcode",
            Self::Country => "country",
            Self::Email => "email",
            Self::Username => "username",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::DateOfBirth => "dateOfBirth",
            Self::IdConfirmation => "idConfirmation",
            Self::TermsAccepted => "termsAccepted",
            Self::BotCheckToken => "botCheckToken",
        }
    }

    /// Returns the human-readable label shown next to the input.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::PhoneNumber => "Phone Number",
            Self::Address => "Address",
            Self::City => "City",
            Self::Postcode => "Postcode",
            Self::Country => "Country",
            Self::Email => "Email",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::DateOfBirth => "Date of Birth",
            Self::IdConfirmation => "ID Confirmation",
            Self::TermsAccepted => "Accept Terms & Conditions",
            Self::BotCheckToken => "Bot verification",
        }
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A country chosen from a [`CountryCatalog`].
///
/// There is no public constructor: a `Country` only exists once it has been
/// selected from a catalog, so a draft never holds an unlisted value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Country(String);

impl Country {
    /// Returns the country name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed list of countries offered by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCatalog {
    names: Vec<String>,
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRIES)
    }
}

impl CountryCatalog {
    /// Creates a catalog from a list of names. Duplicates are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name: String = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    /// Returns the selectable names in display order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Selects a country by its exact name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCountry` if the name is not listed.
    pub fn select(&self, name: &str) -> Result<Country, DomainError> {
        self.names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .map(|found| Country(found.clone()))
            .ok_or_else(|| DomainError::UnknownCountry(name.to_string()))
    }
}

/// A file supplied by the file picker.
///
/// Validation only looks at `declared_size` and `content_type`; the bytes are
/// carried through untouched for submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The original file name.
    pub file_name: String,
    /// The declared MIME type.
    pub content_type: String,
    /// The declared size in bytes.
    pub declared_size: u64,
    /// The file contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment whose declared size is the buffer length.
    #[must_use]
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            declared_size: bytes.len() as u64,
            bytes,
        }
    }

    /// Creates an attachment carrying only picker metadata and no contents.
    #[must_use]
    pub fn metadata_only(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        declared_size: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            declared_size,
            bytes: Vec::new(),
        }
    }
}

// Contents are elided so debug logs never dump uploaded documents.
impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("declared_size", &self.declared_size)
            .finish_non_exhaustive()
    }
}

/// A single user input event against the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FullName(String),
    PhoneNumber(String),
    Address(String),
    City(String),
    Postcode(String),
    Country(Option<Country>),
    Email(String),
    Username(String),
    Password(String),
    ConfirmPassword(String),
    DateOfBirth(Option<Date>),
    IdConfirmation(Option<Attachment>),
    TermsAccepted(bool),
    BotCheckToken(String),
}

impl FieldUpdate {
    /// Returns the field this update targets.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::FullName(_) => Field::FullName,
            Self::PhoneNumber(_) => Field::PhoneNumber,
            Self::Address(_) => Field::Address,
            Self::City(_) => Field::City,
            Self::Postcode(_) => Field::Postcode,
            Self::Country(_) => Field::Country,
            Self::Email(_) => Field::Email,
            Self::Username(_) => Field::Username,
            Self::Password(_) => Field::Password,
            Self::ConfirmPassword(_) => Field::ConfirmPassword,
            Self::DateOfBirth(_) => Field::DateOfBirth,
            Self::IdConfirmation(_) => Field::IdConfirmation,
            Self::TermsAccepted(_) => Field::TermsAccepted,
            Self::BotCheckToken(_) => Field::BotCheckToken,
        }
    }
}

/// The in-progress sign-up form state.
///
/// Created empty when the form is shown, mutated one field at a time, and
/// discarded after a successful submission. Nothing here is enforced
/// structurally; all constraints are checked by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub country: Option<Country>,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub date_of_birth: Option<Date>,
    pub id_confirmation: Option<Attachment>,
    pub terms_accepted: bool,
    /// Opaque token issued by the bot-check widget.
    pub bot_check_token: String,
}

impl RegistrationDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one input event to the draft.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FullName(value) => self.full_name = value,
            FieldUpdate::PhoneNumber(value) => self.phone_number = value,
            FieldUpdate::Address(value) => self.address = value,
            FieldUpdate::City(value) => self.city = value,
            FieldUpdate::Postcode(value) => self.postcode = value,
            FieldUpdate::Country(value) => self.country = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::Username(value) => self.username = value,
            FieldUpdate::Password(value) => self.password = value,
            FieldUpdate::ConfirmPassword(value) => self.confirm_password = value,
            FieldUpdate::DateOfBirth(value) => self.date_of_birth = value,
            FieldUpdate::IdConfirmation(value) => self.id_confirmation = value,
            FieldUpdate::TermsAccepted(value) => self.terms_accepted = value,
            FieldUpdate::BotCheckToken(value) => self.bot_check_token = value,
        }
    }

    /// Resets every field to its empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns whether every field is still in its initial state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
