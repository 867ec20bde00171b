// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while constructing draft values.
///
/// These are distinct from per-field validation violations: a `DomainError`
/// means a value could not be placed into the draft at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The country is not part of the selectable catalog.
    #[error("Country '{0}' is not in the list of selectable countries")]
    UnknownCountry(String),
    /// The field name does not identify any draft field.
    #[error("Unknown field: '{0}'")]
    UnknownField(String),
    /// A date string could not be parsed.
    #[error("Failed to parse date '{date_string}': {error}")]
    InvalidDate {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

/// The kind of rule a draft field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ValidationErrorKind {
    /// The field is empty, unset, or (for the terms checkbox) unchecked.
    Missing,
    /// The value does not have the expected shape.
    FormatInvalid,
    /// The value is shorter than the policy minimum.
    TooShort,
    /// The value contains whitespace where none is allowed.
    ContainsWhitespace,
    /// The password has no character from the special set.
    MissingSpecialChar,
    /// The password has no digit.
    MissingDigit,
    /// The confirmation differs from the password.
    Mismatch,
    /// The birth date is after the adulthood cutoff.
    TooYoung,
    /// The attachment exceeds the size limit.
    TooLarge,
    /// The attachment MIME type is not accepted.
    UnsupportedType,
}

impl ValidationErrorKind {
    /// Returns the stable identifier for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::FormatInvalid => "FormatInvalid",
            Self::TooShort => "TooShort",
            Self::ContainsWhitespace => "ContainsWhitespace",
            Self::MissingSpecialChar => "MissingSpecialChar",
            Self::MissingDigit => "MissingDigit",
            Self::Mismatch => "Mismatch",
            Self::TooYoung => "TooYoung",
            Self::TooLarge => "TooLarge",
            Self::UnsupportedType => "UnsupportedType",
        }
    }
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
