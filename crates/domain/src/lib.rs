// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model and rules for the sign-up form.
//!
//! A `RegistrationDraft` holds the form state. `Validator` checks it
//! against a `ValidationPolicy` and a reference time, and returns a
//! `ValidationResult` that maps each invalid `Field` to its violations.
//! The feedback helpers derive the avatar and the live rule hints from the
//! same draft.
//!
//! This crate does no I/O. Encoding and submission live in `signup-client`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod feedback;
mod password_policy;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, ValidationErrorKind};
pub use feedback::{
    AvatarDisplay, EmailHint, HintState, PLACEHOLDER_AVATAR, PasswordHints, PortraitOverrides,
    SUMMARY_NOTICE, UsernameHints, initials, summary_notice,
};
pub use password_policy::{DEFAULT_SPECIAL_CHARS, PasswordPolicy};
pub use types::{
    ALLOWED_ATTACHMENT_TYPES, Attachment, Country, CountryCatalog, DEFAULT_COUNTRIES, Field,
    FieldUpdate, RegistrationDraft,
};
pub use validation::{
    ValidationPolicy, ValidationResult, Validator, Violation, adulthood_cutoff, is_valid_email,
    validate_draft,
};
